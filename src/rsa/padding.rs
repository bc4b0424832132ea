//! PKCS#1 v1.5 Padding
//!
//! Implements RSA PKCS#1 v1.5 padding for encryption and signatures.

use rand::Rng;

use crate::error::{CryptoError, Result};

/// Bytes consumed by encryption padding: 0x00 0x02, at least 8 bytes of PS, 0x00
pub const ENCRYPTION_OVERHEAD: usize = 11;

/// Minimum length of the padding string, for both block types
const MIN_PS_LEN: usize = 8;

/// Largest message that fits in one block of a `key_size`-byte modulus
pub fn max_message_len(key_size: usize) -> usize {
    key_size.saturating_sub(ENCRYPTION_OVERHEAD)
}

/// PKCS#1 v1.5 Padding for encryption
/// Format: 0x00 || 0x02 || PS || 0x00 || data
/// PS = padding string of non-zero random bytes (at least 8 bytes)
pub fn pad_pkcs1_v15(data: &[u8], key_size: usize) -> Result<Vec<u8>> {
    let max = max_message_len(key_size);
    if data.len() > max {
        return Err(CryptoError::MessageTooLong(format!(
            "max {} bytes for a {}-bit key, got {}",
            max,
            key_size * 8,
            data.len()
        )));
    }

    let ps_len = key_size - data.len() - 3;
    let mut rng = rand::thread_rng();

    let mut result = Vec::with_capacity(key_size);
    result.push(0x00);
    result.push(0x02);
    result.extend((0..ps_len).map(|_| rng.gen_range(1..=u8::MAX)));
    result.push(0x00);
    result.extend_from_slice(data);

    Ok(result)
}

/// Remove PKCS#1 v1.5 padding from a decrypted block of exactly `k` bytes.
/// Every failure reports the same message so the error does not say which check failed.
pub fn unpad_pkcs1_v15(block: &[u8]) -> Result<Vec<u8>> {
    let failed = || CryptoError::DecryptionFailed("padding check failed".to_string());

    if block.len() < ENCRYPTION_OVERHEAD || block[0] != 0x00 || block[1] != 0x02 {
        return Err(failed());
    }

    // Find the separator byte (0x00)
    let separator_pos = block[2..]
        .iter()
        .position(|&b| b == 0x00)
        .map(|pos| pos + 2)
        .ok_or_else(failed)?;

    if separator_pos < 2 + MIN_PS_LEN {
        return Err(failed());
    }

    Ok(block[separator_pos + 1..].to_vec())
}

/// PKCS#1 v1.5 Signature padding (EMSA-PKCS1-v1_5)
/// Format: 0x00 || 0x01 || PS (0xFF) || 0x00 || DigestInfo prefix || digest
pub fn pad_for_signature(digest_info_prefix: &[u8], digest: &[u8], key_size: usize) -> Result<Vec<u8>> {
    let t_len = digest_info_prefix.len() + digest.len();
    if key_size < t_len + ENCRYPTION_OVERHEAD {
        return Err(CryptoError::MessageTooLong(format!(
            "a {}-bit key is too small to hold a {}-byte DigestInfo",
            key_size * 8,
            t_len
        )));
    }

    let mut result = Vec::with_capacity(key_size);
    result.push(0x00);
    result.push(0x01);
    result.resize(key_size - t_len - 1, 0xFF);
    result.push(0x00);
    result.extend_from_slice(digest_info_prefix);
    result.extend_from_slice(digest);

    Ok(result)
}
