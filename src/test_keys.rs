//! Fixture keys generated once with OpenSSL 3.0, plus artifacts OpenSSL
//! produced with them, for interoperability checks without key generation.

pub const RSA2048_PKCS8_PRIVATE: &str = include_str!("../testdata/rsa2048_pkcs8.pem");
pub const RSA2048_PKCS1_PRIVATE: &str = include_str!("../testdata/rsa2048_pkcs1.pem");
pub const RSA2048_SPKI_PUBLIC: &str = include_str!("../testdata/rsa2048_spki.pem");
pub const RSA2048_PKCS1_PUBLIC: &str = include_str!("../testdata/rsa2048_pkcs1_pub.pem");

pub const RSA1024_PKCS8_PRIVATE: &str = include_str!("../testdata/rsa1024_pkcs8.pem");
pub const RSA1024_SPKI_PUBLIC: &str = include_str!("../testdata/rsa1024_spki.pem");

/// Smallest accepted modulus; too small for a SHA-512 DigestInfo
pub const RSA512_PKCS8_PRIVATE: &str = include_str!("../testdata/rsa512_pkcs8.pem");

pub const EC_P256_PKCS8_PRIVATE: &str = include_str!("../testdata/ec_p256_pkcs8.pem");
pub const EC_P256_SPKI_PUBLIC: &str = include_str!("../testdata/ec_p256_spki.pem");

/// `openssl dgst -sign` over "hello world" with the 2048-bit key, hex
pub const HELLO_WORLD_SHA1_SIG_HEX: &str =
    include_str!("../testdata/rsa2048_hello_world_sha1.sig.hex");
pub const HELLO_WORLD_SHA256_SIG_HEX: &str =
    include_str!("../testdata/rsa2048_hello_world_sha256.sig.hex");
pub const HELLO_WORLD_SHA512_SIG_HEX: &str =
    include_str!("../testdata/rsa2048_hello_world_sha512.sig.hex");

/// `openssl pkeyutl -encrypt` (PKCS#1 v1.5) of "hello world" to the 2048-bit key, base64
pub const HELLO_WORLD_CIPHERTEXT_B64: &str =
    include_str!("../testdata/rsa2048_hello_world.ct.b64");

/// The base64 body of a PEM block, armor removed, line breaks kept.
pub fn pem_body(pem: &str) -> String {
    pem.lines()
        .filter(|l| !l.starts_with("-----"))
        .collect::<Vec<_>>()
        .join("\n")
}
