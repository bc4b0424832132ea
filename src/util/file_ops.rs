//! File Operations for the command-line caller
//!
//! Reads key files and message arguments.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Largest key file accepted; PEM keys are a few kilobytes at most
pub const MAX_KEY_FILE_SIZE: u64 = 64 * 1024;

/// Errors that can occur during file operations
#[derive(Debug, Error)]
pub enum FileError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is {size}, larger than the {limit} limit for key files")]
    FileTooLarge { path: PathBuf, size: String, limit: String },

    #[error("{0} is not valid UTF-8 text")]
    NotText(PathBuf),
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> FileError + '_ {
    move |source| FileError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a PEM or base64 key file as text
pub fn read_key_file(path: &Path) -> FileResult<String> {
    let size = get_file_size(path)?;
    if size > MAX_KEY_FILE_SIZE {
        return Err(FileError::FileTooLarge {
            path: path.to_path_buf(),
            size: format_file_size(size),
            limit: format_file_size(MAX_KEY_FILE_SIZE),
        });
    }
    let data = fs::read(path).map_err(io_error(path))?;
    String::from_utf8(data).map_err(|_| FileError::NotText(path.to_path_buf()))
}

/// Resolve a message argument: `-` reads all of stdin, anything else is used as-is
pub fn read_text_arg(arg: &str) -> FileResult<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(io_error(Path::new("<stdin>")))?;
    Ok(text)
}

/// Get file size in bytes
pub fn get_file_size(path: &Path) -> FileResult<u64> {
    let metadata = fs::metadata(path).map_err(io_error(path))?;
    Ok(metadata.len())
}

/// Format file size for display
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
