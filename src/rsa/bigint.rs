//! RSA Big Integer Operations
//!
//! Wrapper around num-bigint for RSA-specific operations.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from bytes (big-endian)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Convert big integer to big-endian bytes, left-padded with zeros to `len`.
/// Values reduced mod n always fit in the modulus length.
pub fn to_bytes_padded(n: &RsaBigInt, len: usize) -> Vec<u8> {
    let bytes = if n.is_zero() { Vec::new() } else { n.to_bytes_be() };
    if bytes.len() >= len {
        return bytes;
    }
    let mut result = vec![0u8; len];
    result[len - bytes.len()..].copy_from_slice(&bytes);
    result
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply algorithm
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}
