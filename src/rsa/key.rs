//! RSA Keys
//!
//! Public and private key records plus the raw RSA primitives on them.

use std::fmt;

use num_traits::Zero;

use super::bigint::{mod_pow, RsaBigInt};
use crate::error::{CryptoError, Result};

/// Smallest modulus accepted from a parsed key.
pub const MIN_MODULUS_BITS: u64 = 512;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    n: RsaBigInt, // Modulus
    e: RsaBigInt, // Public exponent
}

/// Chinese Remainder Theorem parameters of a two-prime private key
#[derive(Clone, PartialEq, Eq)]
pub struct CrtParams {
    pub p: RsaBigInt,     // First prime factor
    pub q: RsaBigInt,     // Second prime factor
    pub d_p: RsaBigInt,   // d mod (p-1)
    pub d_q: RsaBigInt,   // d mod (q-1)
    pub q_inv: RsaBigInt, // q^(-1) mod p
}

/// RSA Private Key
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    n: RsaBigInt, // Modulus
    e: RsaBigInt, // Public exponent, kept so the matching public key can be named
    d: RsaBigInt, // Private exponent
    crt: Option<CrtParams>,
}

/// Which half of a key pair a parsed key is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Public,
    Private,
}

/// A parsed key, tagged by role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Public(RsaPublicKey),
    Private(RsaPrivateKey),
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRole::Public => write!(f, "public"),
            KeyRole::Private => write!(f, "private"),
        }
    }
}

impl Key {
    pub fn role(&self) -> KeyRole {
        match self {
            Key::Public(_) => KeyRole::Public,
            Key::Private(_) => KeyRole::Private,
        }
    }

    pub fn into_public(self) -> Result<RsaPublicKey> {
        match self {
            Key::Public(key) => Ok(key),
            Key::Private(_) => Err(CryptoError::InvalidKeyFormat(
                "expected a public key, got a private key".to_string(),
            )),
        }
    }

    pub fn into_private(self) -> Result<RsaPrivateKey> {
        match self {
            Key::Private(key) => Ok(key),
            Key::Public(_) => Err(CryptoError::InvalidKeyFormat(
                "expected a private key, got a public key".to_string(),
            )),
        }
    }
}

fn check_modulus(n: &RsaBigInt, e: &RsaBigInt) -> Result<()> {
    if n.bits() < MIN_MODULUS_BITS {
        return Err(CryptoError::InvalidKeyFormat(format!(
            "modulus is {} bits, minimum is {}",
            n.bits(),
            MIN_MODULUS_BITS
        )));
    }
    if !n.bit(0) {
        return Err(CryptoError::InvalidKeyFormat("modulus is even".to_string()));
    }
    if *e <= RsaBigInt::from(1u8) || e >= n {
        return Err(CryptoError::InvalidKeyFormat(
            "public exponent out of range".to_string(),
        ));
    }
    Ok(())
}

impl RsaPublicKey {
    pub fn new(n: RsaBigInt, e: RsaBigInt) -> Result<Self> {
        check_modulus(&n, &e)?;
        Ok(Self { n, e })
    }

    pub fn n(&self) -> &RsaBigInt {
        &self.n
    }

    pub fn e(&self) -> &RsaBigInt {
        &self.e
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Modulus length in bytes (`k` in PKCS#1)
    pub fn size(&self) -> usize {
        ((self.n.bits() + 7) / 8) as usize
    }

    /// RSAEP / RSAVP1: m^e mod n. The caller guarantees m < n.
    pub(crate) fn public_op(&self, m: &RsaBigInt) -> RsaBigInt {
        mod_pow(m, &self.e, &self.n)
    }
}

impl RsaPrivateKey {
    pub fn new(n: RsaBigInt, e: RsaBigInt, d: RsaBigInt, crt: Option<CrtParams>) -> Result<Self> {
        check_modulus(&n, &e)?;
        if d.is_zero() || d >= n {
            return Err(CryptoError::InvalidKeyFormat(
                "private exponent out of range".to_string(),
            ));
        }
        let crt = crt.filter(CrtParams::is_usable);
        if let Some(params) = &crt {
            params.check(&n, &d)?;
        }
        Ok(Self { n, e, d, crt })
    }

    pub fn n(&self) -> &RsaBigInt {
        &self.n
    }

    pub fn has_crt(&self) -> bool {
        self.crt.is_some()
    }

    /// The public half of this key pair
    pub fn to_public_key(&self) -> RsaPublicKey {
        RsaPublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Modulus length in bytes (`k` in PKCS#1)
    pub fn size(&self) -> usize {
        ((self.n.bits() + 7) / 8) as usize
    }

    /// RSADP / RSASP1: c^d mod n, using CRT when the parameters are present.
    /// The caller guarantees c < n.
    pub(crate) fn private_op(&self, c: &RsaBigInt) -> RsaBigInt {
        match &self.crt {
            Some(crt) => decrypt_crt(c, crt, &self.n),
            None => mod_pow(c, &self.d, &self.n),
        }
    }
}

impl CrtParams {
    fn is_usable(&self) -> bool {
        !(self.p.is_zero()
            || self.q.is_zero()
            || self.d_p.is_zero()
            || self.d_q.is_zero()
            || self.q_inv.is_zero())
    }

    /// p·q = n, d_p = d mod (p-1), d_q = d mod (q-1), q_inv·q ≡ 1 (mod p)
    fn check(&self, n: &RsaBigInt, d: &RsaBigInt) -> Result<()> {
        let one = RsaBigInt::from(1u8);
        let consistent = self.p > one
            && self.q > one
            && &(&self.p * &self.q) == n
            && self.d_p == d % (&self.p - &one)
            && self.d_q == d % (&self.q - &one)
            && (&self.q_inv * &self.q) % &self.p == one;
        if consistent {
            Ok(())
        } else {
            Err(CryptoError::InvalidKeyFormat(
                "CRT parameters do not match the modulus".to_string(),
            ))
        }
    }
}

/// Decrypt using Chinese Remainder Theorem (CRT)
/// This is faster than regular decryption because we work with smaller numbers
fn decrypt_crt(c: &RsaBigInt, key: &CrtParams, n: &RsaBigInt) -> RsaBigInt {
    // m1 = c^d_p mod p
    let m1 = mod_pow(c, &key.d_p, &key.p);

    // m2 = c^d_q mod q
    let m2 = mod_pow(c, &key.d_q, &key.q);

    // h = (m1 - m2) * q_inv mod p; q may exceed p, so reduce m2 first
    let m2_mod_p = &m2 % &key.p;
    let diff = if m1 >= m2_mod_p {
        m1 - m2_mod_p
    } else {
        m1 + &key.p - m2_mod_p
    };
    let h = (diff * &key.q_inv) % &key.p;

    // m = m2 + q * h
    let m = m2 + &key.q * h;

    m % n
}

// Private material stays out of logs and panic messages.
impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("bits", &self.bit_length())
            .field("crt", &self.has_crt())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for CrtParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CrtParams { .. }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::parse::parse_private_key;
    use crate::test_keys::RSA2048_PKCS1_PRIVATE;

    #[test]
    fn test_rejects_even_modulus() {
        let n = RsaBigInt::from(1u8) << 1023;
        let result = RsaPublicKey::new(n, RsaBigInt::from(65537u32));
        assert!(matches!(result, Err(CryptoError::InvalidKeyFormat(_))));
    }

    #[test]
    fn test_rejects_small_modulus() {
        let n = (RsaBigInt::from(1u8) << 256) + 1u8;
        let result = RsaPublicKey::new(n, RsaBigInt::from(65537u32));
        assert!(matches!(result, Err(CryptoError::InvalidKeyFormat(_))));
    }

    #[test]
    fn test_rejects_exponent_one() {
        let n = (RsaBigInt::from(1u8) << 1023) + 1u8;
        let result = RsaPublicKey::new(n, RsaBigInt::from(1u8));
        assert!(result.is_err());
    }

    #[test]
    fn test_crt_matches_plain_exponentiation() {
        let key = parse_private_key(RSA2048_PKCS1_PRIVATE).unwrap();
        assert!(key.has_crt());

        let plain = RsaPrivateKey {
            crt: None,
            ..key.clone()
        };
        let c = RsaBigInt::from(0xdead_beef_u64) << 1000;
        assert_eq!(key.private_op(&c), plain.private_op(&c));
    }

    #[test]
    fn test_rejects_inconsistent_crt() {
        let key = parse_private_key(RSA2048_PKCS1_PRIVATE).unwrap();
        let good = key.crt.clone().unwrap();
        let rebuild = |crt: CrtParams| {
            RsaPrivateKey::new(key.n.clone(), key.e.clone(), key.d.clone(), Some(crt))
        };

        assert!(rebuild(good.clone()).is_ok());

        let mut bad_coefficient = good.clone();
        bad_coefficient.q_inv += 1u8;
        assert!(matches!(
            rebuild(bad_coefficient),
            Err(CryptoError::InvalidKeyFormat(_))
        ));

        let mut bad_exponent = good.clone();
        bad_exponent.d_p += 2u8;
        assert!(rebuild(bad_exponent).is_err());

        let swapped_factor = CrtParams {
            q: good.p.clone(),
            ..good
        };
        assert!(rebuild(swapped_factor).is_err());
    }

    #[test]
    fn test_public_undoes_private() {
        let key = parse_private_key(RSA2048_PKCS1_PRIVATE).unwrap();
        let public = key.to_public_key();
        let m = RsaBigInt::from(42u8) << 900;
        assert_eq!(public.public_op(&key.private_op(&m)), m);
        assert_eq!(public.size(), 256);
        assert_eq!(public.bit_length(), 2048);
    }

    #[test]
    fn test_debug_hides_private_material() {
        let key = parse_private_key(RSA2048_PKCS1_PRIVATE).unwrap();
        let shown = format!("{:?}", key);
        assert!(shown.contains("2048"));
        assert!(!shown.contains(&key.d.to_string()));
    }

    #[test]
    fn test_role_conversion() {
        let key = parse_private_key(RSA2048_PKCS1_PRIVATE).unwrap();
        let public = Key::Public(key.to_public_key());
        assert_eq!(public.role(), KeyRole::Public);
        assert!(matches!(
            public.into_private(),
            Err(CryptoError::InvalidKeyFormat(_))
        ));
        assert!(Key::Private(key).into_private().is_ok());
    }
}
