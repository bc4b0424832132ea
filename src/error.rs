//! Error taxonomy for every RSA operation.
//!
//! Each failure surfaced by the engine is exactly one of these kinds, carrying a
//! human-readable message. Callers that only need an opaque label can use
//! [`CryptoError::label`]; callers that want to branch use [`CryptoError::kind`].

use thiserror::Error;

/// Classified failure of a single RSA operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The key string is not valid PEM/base64, does not decode to a known key
    /// structure, or has the wrong role for the operation.
    #[error("invalid key format: {0}")]
    InvalidKeyFormat(String),

    /// The key structure decoded but is not an RSA key.
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// The plaintext does not fit in one padded block for this key.
    #[error("message too long: {0}")]
    MessageTooLong(String),

    /// Hex or base64 input could not be decoded.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Ciphertext length or padding check failed.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// Decryption succeeded but the recovered bytes are not UTF-8.
    #[error("invalid utf-8: {0}")]
    InvalidUtf8(String),
}

/// Fieldless mirror of [`CryptoError`] for matching without the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidKeyFormat,
    UnsupportedKeyType,
    MessageTooLong,
    InvalidEncoding,
    DecryptionFailed,
    InvalidUtf8,
}

impl CryptoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::InvalidKeyFormat(_) => ErrorKind::InvalidKeyFormat,
            CryptoError::UnsupportedKeyType(_) => ErrorKind::UnsupportedKeyType,
            CryptoError::MessageTooLong(_) => ErrorKind::MessageTooLong,
            CryptoError::InvalidEncoding(_) => ErrorKind::InvalidEncoding,
            CryptoError::DecryptionFailed(_) => ErrorKind::DecryptionFailed,
            CryptoError::InvalidUtf8(_) => ErrorKind::InvalidUtf8,
        }
    }

    /// Stable label for hosts that reject with `(label, message)` pairs.
    pub fn label(&self) -> &'static str {
        self.kind().label()
    }

    /// The descriptive message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            CryptoError::InvalidKeyFormat(m)
            | CryptoError::UnsupportedKeyType(m)
            | CryptoError::MessageTooLong(m)
            | CryptoError::InvalidEncoding(m)
            | CryptoError::DecryptionFailed(m)
            | CryptoError::InvalidUtf8(m) => m,
        }
    }
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::InvalidKeyFormat => "InvalidKeyFormat",
            ErrorKind::UnsupportedKeyType => "UnsupportedKeyType",
            ErrorKind::MessageTooLong => "MessageTooLong",
            ErrorKind::InvalidEncoding => "InvalidEncoding",
            ErrorKind::DecryptionFailed => "DecryptionFailed",
            ErrorKind::InvalidUtf8 => "InvalidUtf8",
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CryptoError>;
