//! RSA Signatures
//!
//! RSASSA-PKCS1-v1_5 signing and verification over a fixed digest.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use subtle::ConstantTimeEq;

use super::bigint::{from_bytes, to_bytes_padded};
use super::key::{RsaPrivateKey, RsaPublicKey};
use super::padding::pad_for_signature;
use crate::error::{CryptoError, Result};

/// Digest applied to the message before signing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum SignatureHash {
    Sha1,
    #[default]
    Sha256,
    Sha512,
}

// DER-encoded DigestInfo headers, RFC 8017 section 9.2 note 1
const SHA1_PREFIX: &[u8] = &[
    0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a, 0x05, 0x00, 0x04, 0x14,
];
const SHA256_PREFIX: &[u8] = &[
    0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01,
    0x05, 0x00, 0x04, 0x20,
];
const SHA512_PREFIX: &[u8] = &[
    0x30, 0x51, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x03,
    0x05, 0x00, 0x04, 0x40,
];

impl SignatureHash {
    pub fn digest_info_prefix(self) -> &'static [u8] {
        match self {
            SignatureHash::Sha1 => SHA1_PREFIX,
            SignatureHash::Sha256 => SHA256_PREFIX,
            SignatureHash::Sha512 => SHA512_PREFIX,
        }
    }

    pub fn digest(self, message: &[u8]) -> Vec<u8> {
        match self {
            SignatureHash::Sha1 => Sha1::digest(message).to_vec(),
            SignatureHash::Sha256 => Sha256::digest(message).to_vec(),
            SignatureHash::Sha512 => Sha512::digest(message).to_vec(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SignatureHash::Sha1 => "sha1",
            SignatureHash::Sha256 => "sha256",
            SignatureHash::Sha512 => "sha512",
        }
    }

    /// EMSA-PKCS1-v1_5 encoding of `message` for a `key_size`-byte modulus.
    /// The message length never matters here; only the key can be too small.
    fn encode(self, message: &[u8], key_size: usize) -> Result<Vec<u8>> {
        pad_for_signature(self.digest_info_prefix(), &self.digest(message), key_size).map_err(
            |_| {
                CryptoError::MessageTooLong(format!(
                    "a {}-bit key is too small for {} signatures",
                    key_size * 8,
                    self
                ))
            },
        )
    }
}

impl fmt::Display for SignatureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignatureHash {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha1" => Ok(SignatureHash::Sha1),
            "sha256" => Ok(SignatureHash::Sha256),
            "sha512" => Ok(SignatureHash::Sha512),
            other => Err(format!(
                "unknown signature hash '{}', expected sha1, sha256 or sha512",
                other
            )),
        }
    }
}

impl TryFrom<String> for SignatureHash {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Sign `message` with the private key; the signature is exactly `key.size()` bytes.
///
/// The signature is checked against the public exponent before it is released,
/// so a private key whose `d` does not match `e` fails with `InvalidKeyFormat`.
/// A key too small to hold the DigestInfo of `hash` fails with `MessageTooLong`,
/// whatever the length of `message`.
pub fn sign_bytes(message: &[u8], private_key: &RsaPrivateKey, hash: SignatureHash) -> Result<Vec<u8>> {
    let key_bytes = private_key.size();
    let em = hash.encode(message, key_bytes)?;
    let m = from_bytes(&em);

    // s = m^d mod n
    let s = private_key.private_op(&m);
    if private_key.to_public_key().public_op(&s) != m {
        return Err(CryptoError::InvalidKeyFormat(
            "private exponent does not match the public key".to_string(),
        ));
    }
    Ok(to_bytes_padded(&s, key_bytes))
}

/// Check `signature` over `message`. A signature that does not match, including
/// one of the wrong length or out of range for the key, yields `false`.
pub fn verify_bytes(
    signature: &[u8],
    message: &[u8],
    public_key: &RsaPublicKey,
    hash: SignatureHash,
) -> bool {
    let key_bytes = public_key.size();
    if signature.len() != key_bytes {
        return false;
    }

    let s = from_bytes(signature);
    if &s >= public_key.n() {
        return false;
    }

    // No signature can exist when the DigestInfo does not fit the key
    let expected = match hash.encode(message, key_bytes) {
        Ok(em) => em,
        Err(_) => return false,
    };

    let em = to_bytes_padded(&public_key.public_op(&s), key_bytes);
    em.as_slice().ct_eq(expected.as_slice()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::RsaBigInt;
    use crate::rsa::parse::{parse_private_key, parse_public_key};
    use crate::test_keys::*;

    fn key_pair() -> (RsaPrivateKey, RsaPublicKey) {
        (
            parse_private_key(RSA2048_PKCS8_PRIVATE).unwrap(),
            parse_public_key(RSA2048_SPKI_PUBLIC).unwrap(),
        )
    }

    #[test]
    fn test_matches_openssl_signatures() {
        let (private_key, public_key) = key_pair();
        let cases = [
            (SignatureHash::Sha1, HELLO_WORLD_SHA1_SIG_HEX),
            (SignatureHash::Sha256, HELLO_WORLD_SHA256_SIG_HEX),
            (SignatureHash::Sha512, HELLO_WORLD_SHA512_SIG_HEX),
        ];

        for (hash, expected_hex) in cases {
            let expected = hex::decode(expected_hex.trim()).unwrap();
            // PKCS#1 v1.5 signatures are deterministic
            let signature = sign_bytes(b"hello world", &private_key, hash).unwrap();
            assert_eq!(signature, expected, "{} signature differs from OpenSSL", hash);
            assert!(verify_bytes(&expected, b"hello world", &public_key, hash));
        }
    }

    #[test]
    fn test_sign_verify() {
        let (private_key, public_key) = key_pair();
        let signature = sign_bytes(b"payload", &private_key, SignatureHash::Sha256).unwrap();

        assert_eq!(signature.len(), 256);
        assert!(verify_bytes(&signature, b"payload", &public_key, SignatureHash::Sha256));
        assert!(!verify_bytes(&signature, b"Payload", &public_key, SignatureHash::Sha256));
    }

    #[test]
    fn test_hash_mismatch_does_not_verify() {
        let (private_key, public_key) = key_pair();
        let signature = sign_bytes(b"payload", &private_key, SignatureHash::Sha1).unwrap();
        assert!(!verify_bytes(&signature, b"payload", &public_key, SignatureHash::Sha256));
    }

    #[test]
    fn test_wrong_key_does_not_verify() {
        let (private_key, _) = key_pair();
        let other = parse_public_key(RSA1024_SPKI_PUBLIC).unwrap();
        let signature = sign_bytes(b"payload", &private_key, SignatureHash::Sha256).unwrap();
        assert!(!verify_bytes(&signature, b"payload", &other, SignatureHash::Sha256));
    }

    #[test]
    fn test_malformed_signatures_are_false() {
        let (_, public_key) = key_pair();
        assert!(!verify_bytes(&[], b"m", &public_key, SignatureHash::Sha256));
        assert!(!verify_bytes(&[0u8; 255], b"m", &public_key, SignatureHash::Sha256));
        assert!(!verify_bytes(&[0xFFu8; 256], b"m", &public_key, SignatureHash::Sha256));
        assert!(!verify_bytes(&[0u8; 256], b"m", &public_key, SignatureHash::Sha256));
    }

    #[test]
    fn test_mismatched_private_exponent_refuses_to_sign() {
        let (private_key, public_key) = key_pair();
        let forged = RsaPrivateKey::new(
            public_key.n().clone(),
            public_key.e().clone(),
            RsaBigInt::from(3u8),
            None,
        )
        .unwrap();

        let result = sign_bytes(b"payload", &forged, SignatureHash::Sha256);
        assert!(matches!(result, Err(CryptoError::InvalidKeyFormat(_))));
        assert!(sign_bytes(b"payload", &private_key, SignatureHash::Sha256).is_ok());
    }

    #[test]
    fn test_key_too_small_for_digest() {
        let small = parse_private_key(RSA512_PKCS8_PRIVATE).unwrap();

        let err = sign_bytes(b"", &small, SignatureHash::Sha512).unwrap_err();
        assert!(matches!(err, CryptoError::MessageTooLong(_)));
        assert_eq!(err.message(), "a 512-bit key is too small for sha512 signatures");

        // 19 + 32 + 11 bytes still fits in 64
        let signature = sign_bytes(b"", &small, SignatureHash::Sha256).unwrap();
        assert!(verify_bytes(&signature, b"", &small.to_public_key(), SignatureHash::Sha256));
        assert!(!verify_bytes(&signature, b"", &small.to_public_key(), SignatureHash::Sha512));
    }

    #[test]
    fn test_hash_from_str() {
        assert_eq!("SHA-256".parse::<SignatureHash>().unwrap(), SignatureHash::Sha256);
        assert_eq!("sha1".parse::<SignatureHash>().unwrap(), SignatureHash::Sha1);
        assert_eq!("Sha512".parse::<SignatureHash>().unwrap(), SignatureHash::Sha512);
        assert!("md5".parse::<SignatureHash>().is_err());
        assert_eq!(SignatureHash::default(), SignatureHash::Sha256);
    }
}
