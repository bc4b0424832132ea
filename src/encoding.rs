//! Textual encodings for ciphertext and signatures.
//!
//! Each operation pair (`encrypt`/`encrypt64`, ...) runs one transform and
//! differs only in the [`TextEncoding`] applied at the edge.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{CryptoError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Lowercase hex; decoding accepts either case.
    Hex,
    /// Standard alphabet with padding.
    Base64,
}

impl TextEncoding {
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Hex => "hex",
            TextEncoding::Base64 => "base64",
        }
    }

    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Hex => hex::encode(bytes),
            TextEncoding::Base64 => STANDARD.encode(bytes),
        }
    }

    /// Decode text produced by [`TextEncoding::encode`]. Surrounding and embedded
    /// whitespace (line-wrapped base64) is ignored.
    pub fn decode(self, text: &str) -> Result<Vec<u8>> {
        let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        match self {
            TextEncoding::Hex => hex::decode(&compact)
                .map_err(|e| CryptoError::InvalidEncoding(format!("invalid hex: {}", e))),
            TextEncoding::Base64 => STANDARD
                .decode(compact.as_bytes())
                .map_err(|e| CryptoError::InvalidEncoding(format!("invalid base64: {}", e))),
        }
    }
}
