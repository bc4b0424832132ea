//! The eight string-in, string-out RSA operations.
//!
//! Every call parses its key, runs one transform and encodes the result; nothing
//! outlives the call. Failures are always one of the [`CryptoError`] kinds.
//!
//! | Operation   | Inputs                          | Output             |
//! |-------------|---------------------------------|--------------------|
//! | `encrypt`   | message, public key             | ciphertext, hex    |
//! | `encrypt64` | message, public key             | ciphertext, base64 |
//! | `decrypt`   | ciphertext (hex), private key   | message            |
//! | `decrypt64` | ciphertext (base64), private key| message            |
//! | `sign`      | message, private key            | signature, hex     |
//! | `sign64`    | message, private key            | signature, base64  |
//! | `verify`    | signature (hex), message, key   | bool               |
//! | `verify64`  | signature (base64), message, key| bool               |

use tracing::{debug, instrument};

use crate::config::EngineConfig;
use crate::encoding::TextEncoding;
use crate::error::{CryptoError, Result};
use crate::rsa::{
    decrypt_to_string, encrypt_string, parse_private_key, parse_public_key, sign_bytes,
    verify_bytes, SignatureHash,
};

/// Stateless RSA operations. The only setting is the signature digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CryptoEngine {
    signature_hash: SignatureHash,
}

impl CryptoEngine {
    pub fn new(signature_hash: SignatureHash) -> Self {
        Self { signature_hash }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.signature_hash)
    }

    pub fn signature_hash(&self) -> SignatureHash {
        self.signature_hash
    }

    pub fn encrypt(&self, message: &str, public_key: &str) -> Result<String> {
        self.encrypt_as(message, public_key, TextEncoding::Hex)
    }

    pub fn encrypt64(&self, message: &str, public_key: &str) -> Result<String> {
        self.encrypt_as(message, public_key, TextEncoding::Base64)
    }

    pub fn decrypt(&self, ciphertext: &str, private_key: &str) -> Result<String> {
        self.decrypt_as(ciphertext, private_key, TextEncoding::Hex)
    }

    pub fn decrypt64(&self, ciphertext: &str, private_key: &str) -> Result<String> {
        self.decrypt_as(ciphertext, private_key, TextEncoding::Base64)
    }

    pub fn sign(&self, message: &str, private_key: &str) -> Result<String> {
        self.sign_as(message, private_key, TextEncoding::Hex)
    }

    pub fn sign64(&self, message: &str, private_key: &str) -> Result<String> {
        self.sign_as(message, private_key, TextEncoding::Base64)
    }

    pub fn verify(&self, signature: &str, message: &str, public_key: &str) -> Result<bool> {
        self.verify_as(signature, message, public_key, TextEncoding::Hex)
    }

    pub fn verify64(&self, signature: &str, message: &str, public_key: &str) -> Result<bool> {
        self.verify_as(signature, message, public_key, TextEncoding::Base64)
    }

    /// Encrypt the UTF-8 bytes of `message` with PKCS#1 v1.5 padding.
    ///
    /// # Errors
    ///
    /// [`CryptoError::InvalidKeyFormat`] / [`CryptoError::UnsupportedKeyType`] for a bad key,
    /// [`CryptoError::MessageTooLong`] when the message exceeds `key bytes - 11`.
    #[instrument(skip_all, fields(encoding = encoding.name()))]
    pub fn encrypt_as(&self, message: &str, public_key: &str, encoding: TextEncoding) -> Result<String> {
        let key = parse_public_key(public_key)?;
        debug!(bits = key.bit_length(), len = message.len(), "encrypting");
        let ciphertext = encrypt_string(message, &key)?;
        Ok(encoding.encode(&ciphertext))
    }

    /// Decrypt `ciphertext` back to the original message.
    ///
    /// # Errors
    ///
    /// [`CryptoError::InvalidEncoding`] if the text does not decode,
    /// [`CryptoError::DecryptionFailed`] on a length or padding mismatch,
    /// [`CryptoError::InvalidUtf8`] when the recovered bytes are not UTF-8.
    #[instrument(skip_all, fields(encoding = encoding.name()))]
    pub fn decrypt_as(&self, ciphertext: &str, private_key: &str, encoding: TextEncoding) -> Result<String> {
        let key = parse_private_key(private_key)?;
        let bytes = encoding.decode(ciphertext)?;
        debug!(bits = key.bit_length(), crt = key.has_crt(), "decrypting");
        decrypt_to_string(&bytes, &key)
    }

    #[instrument(skip_all, fields(encoding = encoding.name(), hash = self.signature_hash.name()))]
    pub fn sign_as(&self, message: &str, private_key: &str, encoding: TextEncoding) -> Result<String> {
        let key = parse_private_key(private_key)?;
        debug!(bits = key.bit_length(), "signing");
        let signature = sign_bytes(message.as_bytes(), &key, self.signature_hash)?;
        Ok(encoding.encode(&signature))
    }

    /// Check a signature. A well-formed signature that does not match gives
    /// `Ok(false)`; only malformed key or signature text is an error.
    #[instrument(skip_all, fields(encoding = encoding.name(), hash = self.signature_hash.name()))]
    pub fn verify_as(
        &self,
        signature: &str,
        message: &str,
        public_key: &str,
        encoding: TextEncoding,
    ) -> Result<bool> {
        let key = parse_public_key(public_key)?;
        let signature = encoding.decode(signature)?;
        let verified = verify_bytes(&signature, message.as_bytes(), &key, self.signature_hash);
        debug!(bits = key.bit_length(), verified, "verified");
        Ok(verified)
    }
}

pub fn encrypt(message: &str, public_key: &str) -> Result<String> {
    CryptoEngine::default().encrypt(message, public_key)
}

pub fn encrypt64(message: &str, public_key: &str) -> Result<String> {
    CryptoEngine::default().encrypt64(message, public_key)
}

pub fn decrypt(ciphertext: &str, private_key: &str) -> Result<String> {
    CryptoEngine::default().decrypt(ciphertext, private_key)
}

pub fn decrypt64(ciphertext: &str, private_key: &str) -> Result<String> {
    CryptoEngine::default().decrypt64(ciphertext, private_key)
}

pub fn sign(message: &str, private_key: &str) -> Result<String> {
    CryptoEngine::default().sign(message, private_key)
}

pub fn sign64(message: &str, private_key: &str) -> Result<String> {
    CryptoEngine::default().sign64(message, private_key)
}

pub fn verify(signature: &str, message: &str, public_key: &str) -> Result<bool> {
    CryptoEngine::default().verify(signature, message, public_key)
}

pub fn verify64(signature: &str, message: &str, public_key: &str) -> Result<bool> {
    CryptoEngine::default().verify64(signature, message, public_key)
}
