//! RSA Module
//!
//! Exports all RSA-related functionality.

pub mod bigint;
pub mod key;
pub mod parse;
pub mod encrypt;
pub mod decrypt;
pub mod padding;
pub mod sign;

pub use key::{CrtParams, Key, KeyRole, RsaPrivateKey, RsaPublicKey};
pub use parse::{parse_key, parse_private_key, parse_public_key};
pub use encrypt::{encrypt_bytes, encrypt_string};
pub use decrypt::{decrypt_bytes, decrypt_to_string};
pub use padding::{max_message_len, ENCRYPTION_OVERHEAD};
pub use sign::{sign_bytes, verify_bytes, SignatureHash};
