//! RSA Encryption Implementation
//!
//! Implements RSA encryption with PKCS#1 v1.5 padding.

use super::bigint::{from_bytes, to_bytes_padded};
use super::key::RsaPublicKey;
use super::padding::pad_pkcs1_v15;
use crate::error::Result;

/// Encrypt bytes using RSA public key
/// Returns ciphertext as exactly `key.size()` bytes
pub fn encrypt_bytes(plaintext: &[u8], public_key: &RsaPublicKey) -> Result<Vec<u8>> {
    let key_bytes = public_key.size();

    // Apply PKCS#1 v1.5 padding; the leading zero byte keeps m below n
    let padded = pad_pkcs1_v15(plaintext, key_bytes)?;
    let m = from_bytes(&padded);

    // Compute c = m^e mod n
    let c = public_key.public_op(&m);

    Ok(to_bytes_padded(&c, key_bytes))
}

/// Encrypt a string using RSA public key
pub fn encrypt_string(plaintext: &str, public_key: &RsaPublicKey) -> Result<Vec<u8>> {
    encrypt_bytes(plaintext.as_bytes(), public_key)
}
