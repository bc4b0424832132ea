//! Utility Module
//!
//! File and argument helpers for the command-line caller.

pub mod file_ops;

pub use file_ops::{read_key_file, read_text_arg, FileError};
