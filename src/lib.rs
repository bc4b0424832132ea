//! Stateless RSA operations over PEM keys.
//!
//! Eight entry points (`encrypt`, `encrypt64`, `decrypt`, `decrypt64`, `sign`,
//! `sign64`, `verify`, `verify64`) take plain strings and return a string, a
//! bool, or a classified [`CryptoError`]. Encryption and signatures use
//! PKCS#1 v1.5; signatures hash with SHA-256 unless configured otherwise.

pub mod config;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod rsa;
pub mod util;

#[cfg(test)]
mod test_keys;

pub use config::EngineConfig;
pub use encoding::TextEncoding;
pub use engine::{
    decrypt, decrypt64, encrypt, encrypt64, sign, sign64, verify, verify64, CryptoEngine,
};
pub use error::{CryptoError, ErrorKind, Result};
pub use rsa::SignatureHash;
