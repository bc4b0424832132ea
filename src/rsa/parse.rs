//! Key Parser
//!
//! Turns PEM or bare base64 key text into RSA key records.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use der::{asn1::ObjectIdentifier, Decode};
use pkcs8::PrivateKeyInfo;
use spki::SubjectPublicKeyInfoRef;
use tracing::debug;

use super::bigint::from_bytes;
use super::key::{CrtParams, Key, KeyRole, RsaPrivateKey, RsaPublicKey};
use crate::error::{CryptoError, Result};

/// Pre-encapsulation boundary, RFC 7468 section 2
const PEM_PREFIX: &str = "-----BEGIN ";

/// rsaEncryption, PKCS#1 section A.1
const RSA_ENCRYPTION_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// Parse a key string that must hold a public key.
pub fn parse_public_key(input: &str) -> Result<RsaPublicKey> {
    parse_key(input, KeyRole::Public)?.into_public()
}

/// Parse a key string that must hold a private key.
pub fn parse_private_key(input: &str) -> Result<RsaPrivateKey> {
    parse_key(input, KeyRole::Private)?.into_private()
}

/// Parse PEM-armored or bare base64 key text.
///
/// PEM input is dispatched on its label. Bare base64 is tried against the
/// structures for `expected` first, then those of the other role.
pub fn parse_key(input: &str, expected: KeyRole) -> Result<Key> {
    let text = input.trim();
    if text.is_empty() {
        return Err(CryptoError::InvalidKeyFormat("key is empty".to_string()));
    }

    let key = if text.starts_with(PEM_PREFIX) {
        let (label, der) = decode_pem(text)?;
        debug!(label = %label, "parsing PEM key");
        key_from_labelled_der(label, &der)?
    } else {
        let der = decode_base64(text)?;
        key_from_bare_der(&der, expected)?
    };

    if key.role() != expected {
        return Err(CryptoError::InvalidKeyFormat(format!(
            "expected a {} key, got a {} key",
            expected,
            key.role()
        )));
    }
    Ok(key)
}

fn key_from_labelled_der(label: &str, der: &[u8]) -> Result<Key> {
    match label {
        "PUBLIC KEY" => Ok(Key::Public(public_from_spki(der)?)),
        "RSA PUBLIC KEY" => Ok(Key::Public(public_from_pkcs1(der)?)),
        "PRIVATE KEY" => Ok(Key::Private(private_from_pkcs8(der)?)),
        "RSA PRIVATE KEY" => Ok(Key::Private(private_from_pkcs1(der)?)),
        "ENCRYPTED PRIVATE KEY" => Err(CryptoError::InvalidKeyFormat(
            "password-protected private keys are not accepted".to_string(),
        )),
        other if other.ends_with(" PRIVATE KEY") || other.ends_with(" PUBLIC KEY") => {
            Err(CryptoError::UnsupportedKeyType(format!(
                "PEM label '{}' is not an RSA key",
                other
            )))
        }
        other => Err(CryptoError::InvalidKeyFormat(format!(
            "unexpected PEM label '{}'",
            other
        ))),
    }
}

type DerParser = fn(&[u8]) -> Result<Key>;

fn key_from_bare_der(der: &[u8], expected: KeyRole) -> Result<Key> {
    let public: [DerParser; 2] = [
        |d| public_from_spki(d).map(Key::Public),
        |d| public_from_pkcs1(d).map(Key::Public),
    ];
    let private: [DerParser; 2] = [
        |d| private_from_pkcs8(d).map(Key::Private),
        |d| private_from_pkcs1(d).map(Key::Private),
    ];
    let order = match expected {
        KeyRole::Public => public.iter().chain(private.iter()),
        KeyRole::Private => private.iter().chain(public.iter()),
    };

    let mut unsupported = None;
    for parser in order {
        match parser(der) {
            Ok(key) => return Ok(key),
            Err(e @ CryptoError::UnsupportedKeyType(_)) => {
                unsupported.get_or_insert(e);
            }
            Err(_) => {}
        }
    }

    Err(unsupported.unwrap_or_else(|| {
        CryptoError::InvalidKeyFormat(
            "base64 does not decode to a PKCS#1, PKCS#8 or SubjectPublicKeyInfo structure"
                .to_string(),
        )
    }))
}

/// Strip PEM armor, returning the label and the decoded DER body.
fn decode_pem(text: &str) -> Result<(&str, Vec<u8>)> {
    der::pem::decode_vec(text.as_bytes()).map_err(|e| match e {
        // RFC 1421 headers only appear on legacy encrypted keys
        der::pem::Error::HeaderDisallowed => CryptoError::InvalidKeyFormat(
            "password-protected private keys are not accepted".to_string(),
        ),
        other => CryptoError::InvalidKeyFormat(format!("malformed PEM: {}", other)),
    })
}

fn decode_base64(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let der = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| CryptoError::InvalidKeyFormat(format!("key is not valid base64: {}", e)))?;
    if der.is_empty() {
        return Err(CryptoError::InvalidKeyFormat("key body is empty".to_string()));
    }
    Ok(der)
}

fn check_rsa_oid(oid: ObjectIdentifier) -> Result<()> {
    if oid != RSA_ENCRYPTION_OID {
        return Err(CryptoError::UnsupportedKeyType(format!(
            "algorithm {} is not rsaEncryption",
            oid
        )));
    }
    Ok(())
}

fn asn1_error(structure: &str, e: der::Error) -> CryptoError {
    CryptoError::InvalidKeyFormat(format!("invalid {} structure: {}", structure, e))
}

fn public_from_pkcs1(der: &[u8]) -> Result<RsaPublicKey> {
    let key = pkcs1::RsaPublicKey::from_der(der).map_err(|e| asn1_error("PKCS#1 public key", e))?;
    RsaPublicKey::new(
        from_bytes(key.modulus.as_bytes()),
        from_bytes(key.public_exponent.as_bytes()),
    )
}

fn public_from_spki(der: &[u8]) -> Result<RsaPublicKey> {
    let info = SubjectPublicKeyInfoRef::from_der(der)
        .map_err(|e| asn1_error("SubjectPublicKeyInfo", e))?;
    check_rsa_oid(info.algorithm.oid)?;
    let inner = info.subject_public_key.as_bytes().ok_or_else(|| {
        CryptoError::InvalidKeyFormat("public key bit string is not byte aligned".to_string())
    })?;
    public_from_pkcs1(inner)
}

fn private_from_pkcs1(der: &[u8]) -> Result<RsaPrivateKey> {
    let key =
        pkcs1::RsaPrivateKey::from_der(der).map_err(|e| asn1_error("PKCS#1 private key", e))?;
    if key.version() != pkcs1::Version::TwoPrime {
        return Err(CryptoError::UnsupportedKeyType(
            "multi-prime RSA keys are not supported".to_string(),
        ));
    }

    let crt = CrtParams {
        p: from_bytes(key.prime1.as_bytes()),
        q: from_bytes(key.prime2.as_bytes()),
        d_p: from_bytes(key.exponent1.as_bytes()),
        d_q: from_bytes(key.exponent2.as_bytes()),
        q_inv: from_bytes(key.coefficient.as_bytes()),
    };
    RsaPrivateKey::new(
        from_bytes(key.modulus.as_bytes()),
        from_bytes(key.public_exponent.as_bytes()),
        from_bytes(key.private_exponent.as_bytes()),
        Some(crt),
    )
}

fn private_from_pkcs8(der: &[u8]) -> Result<RsaPrivateKey> {
    let info = PrivateKeyInfo::from_der(der).map_err(|e| asn1_error("PKCS#8", e))?;
    check_rsa_oid(info.algorithm.oid)?;
    private_from_pkcs1(info.private_key)
}
