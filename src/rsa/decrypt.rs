//! RSA Decryption Implementation
//!
//! Implements RSA decryption, using CRT when the key carries the parameters.

use super::bigint::{from_bytes, to_bytes_padded};
use super::key::RsaPrivateKey;
use super::padding::unpad_pkcs1_v15;
use crate::error::{CryptoError, Result};

/// Decrypt ciphertext bytes using RSA private key
/// Returns plaintext as bytes
pub fn decrypt_bytes(ciphertext: &[u8], private_key: &RsaPrivateKey) -> Result<Vec<u8>> {
    // Validate ciphertext size
    let key_bytes = private_key.size();
    if ciphertext.len() != key_bytes {
        return Err(CryptoError::DecryptionFailed(format!(
            "invalid ciphertext length: expected {} bytes, got {}",
            key_bytes,
            ciphertext.len()
        )));
    }

    let c = from_bytes(ciphertext);
    if &c >= private_key.n() {
        return Err(CryptoError::DecryptionFailed(
            "ciphertext is out of range for this key".to_string(),
        ));
    }

    let m = private_key.private_op(&c);

    // Restore leading zeros before checking the 0x00 0x02 header
    let block = to_bytes_padded(&m, key_bytes);
    unpad_pkcs1_v15(&block)
}

/// Decrypt ciphertext to a string
pub fn decrypt_to_string(ciphertext: &[u8], private_key: &RsaPrivateKey) -> Result<String> {
    let plaintext = decrypt_bytes(ciphertext, private_key)?;
    String::from_utf8(plaintext)
        .map_err(|e| CryptoError::InvalidUtf8(format!("decrypted message is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::encrypt::encrypt_bytes;
    use crate::rsa::parse::{parse_private_key, parse_public_key};
    use crate::test_keys::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    fn test_roundtrip(message: &[u8]) {
        let public_key = parse_public_key(RSA2048_SPKI_PUBLIC).unwrap();
        let private_key = parse_private_key(RSA2048_PKCS8_PRIVATE).unwrap();

        let ciphertext = encrypt_bytes(message, &public_key).unwrap();
        let decrypted = decrypt_bytes(&ciphertext, &private_key).unwrap();
        assert_eq!(message, decrypted.as_slice());
    }

    #[test]
    fn test_decrypt_bytes() {
        let public_key = parse_public_key(RSA1024_SPKI_PUBLIC).unwrap();
        let private_key = parse_private_key(RSA1024_PKCS8_PRIVATE).unwrap();
        let message = b"Hello, RSA!";

        let ciphertext = encrypt_bytes(message, &public_key).unwrap();
        let decrypted = decrypt_bytes(&ciphertext, &private_key).unwrap();

        assert_eq!(message.as_slice(), decrypted.as_slice());
    }

    #[test]
    fn test_decrypt_string() {
        let public_key = parse_public_key(RSA1024_SPKI_PUBLIC).unwrap();
        let private_key = parse_private_key(RSA1024_PKCS8_PRIVATE).unwrap();
        let message = "Test message for RSA decryption";

        let ciphertext = encrypt_bytes(message.as_bytes(), &public_key).unwrap();
        let decrypted = decrypt_to_string(&ciphertext, &private_key).unwrap();

        assert_eq!(message, decrypted);
    }

    #[test]
    fn test_decrypt_openssl_ciphertext() {
        let private_key = parse_private_key(RSA2048_PKCS1_PRIVATE).unwrap();
        let ciphertext = STANDARD.decode(HELLO_WORLD_CIPHERTEXT_B64.trim()).unwrap();

        let decrypted = decrypt_to_string(&ciphertext, &private_key).unwrap();
        assert_eq!(decrypted, "hello world");
    }

    #[test]
    fn test_decrypt_invalid_size() {
        let private_key = parse_private_key(RSA1024_PKCS8_PRIVATE).unwrap();
        let result = decrypt_bytes(&[0u8; 10], &private_key);
        assert!(matches!(result, Err(CryptoError::DecryptionFailed(_))));
    }

    #[test]
    fn test_decrypt_out_of_range() {
        let private_key = parse_private_key(RSA1024_PKCS8_PRIVATE).unwrap();
        let result = decrypt_bytes(&[0xFFu8; 128], &private_key);
        assert!(matches!(result, Err(CryptoError::DecryptionFailed(_))));
    }

    #[test]
    fn test_decrypt_wrong_key() {
        let public_key = parse_public_key(RSA2048_SPKI_PUBLIC).unwrap();
        let other_key = parse_private_key(RSA1024_PKCS8_PRIVATE).unwrap();

        let ciphertext = encrypt_bytes(b"Test", &public_key).unwrap();

        // Should fail - wrong key
        let result = decrypt_bytes(&ciphertext, &other_key);
        assert!(matches!(result, Err(CryptoError::DecryptionFailed(_))));
    }

    #[test]
    fn test_decrypt_invalid_utf8() {
        let public_key = parse_public_key(RSA1024_SPKI_PUBLIC).unwrap();
        let private_key = parse_private_key(RSA1024_PKCS8_PRIVATE).unwrap();

        let ciphertext = encrypt_bytes(&[0xC3, 0x28, 0xFF], &public_key).unwrap();
        let result = decrypt_to_string(&ciphertext, &private_key);
        assert!(matches!(result, Err(CryptoError::InvalidUtf8(_))));
    }

    #[test]
    fn test_roundtrip_various_sizes() {
        // Test various message sizes
        let test_cases: Vec<Vec<u8>> = vec![
            b"".to_vec(),
            b"A".to_vec(),
            b"AB".to_vec(),
            b"Hello".to_vec(),
            b"Hello, World!".to_vec(),
            vec![0u8; 100],
            vec![255u8; 245],
        ];

        for message in test_cases {
            test_roundtrip(&message);
        }
    }
}
