//! Textbook RSA built from first principles on `num-bigint`.
//!
//! This crate provides:
//! - Modular exponentiation, the extended Euclidean algorithm and modular inverses.
//! - Miller–Rabin primality testing and random prime generation.
//! - Key pair generation with the fixed public exponent 65537.
//! - Scalar encryption of text to hex ciphertext, and a recursive transform
//!   that encrypts every leaf of a JSON document.
//!
//! There is no padding scheme and no side-channel hardening; messages must
//! encode to an integer below the modulus.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod arith;
mod cipher;
mod codec;
mod error;
mod keys;
mod prime;
mod structure;
#[cfg(test)]
mod test_support;

pub use crate::arith::{extended_gcd, mod_inverse, mod_pow};
pub use crate::cipher::{decrypt, decrypt_bytes, encrypt, encrypt_bytes};
pub use crate::codec::{bytes_to_int, hex_to_int, int_to_bytes, int_to_hex};
pub use crate::error::{Result, RsaError};
pub use crate::keys::{
    generate_keys, KeyGenConfig, KeyGenerator, KeyPair, PrivateKey, PublicKey, PUBLIC_EXPONENT,
};
pub use crate::prime::{generate_large_prime, is_probable_prime, DEFAULT_PRIME_TEST_ROUNDS};
pub use crate::structure::{decrypt_structure, encrypt_structure};

pub use num_bigint::BigUint;
pub use serde_json::Value;
