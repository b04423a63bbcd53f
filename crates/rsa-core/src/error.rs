//! Error type for the number-theory helpers and the RSA engine.

use std::string::FromUtf8Error;

use thiserror::Error;

/// Failures reported by key generation, encryption and the structural transform.
#[derive(Debug, Error)]
pub enum RsaError {
    /// The message, read as a big-endian integer, is not below the modulus.
    #[error("message of {message_bits} bits is too large for a {modulus_bits}-bit modulus")]
    MessageTooLarge {
        /// Bit length of the message integer.
        message_bits: u64,
        /// Bit length of the modulus.
        modulus_bits: u64,
    },
    /// The ciphertext is not a valid hex string.
    #[error("ciphertext is not valid hex: {0}")]
    InvalidCiphertextEncoding(#[from] hex::FromHexError),
    /// The modulus is zero, so no residue class exists.
    #[error("modulus must be non-zero")]
    InvalidModulus,
    /// `gcd(a, n) != 1`.
    #[error("modular inverse does not exist")]
    NoInverseExists,
    /// The private exponent could not be derived from the generated primes.
    #[error("key generation failed: {0}")]
    KeyGenerationFailed(#[source] Box<RsaError>),
    /// The random source failed while drawing a prime candidate.
    #[error("failed to generate a {bits}-bit prime: {source}")]
    PrimeGenerationFailed {
        /// Requested prime size.
        bits: u64,
        /// Underlying random source error.
        #[source]
        source: rand::Error,
    },
    /// The requested prime size cannot hold a prime.
    #[error("bit size {0} is too small; primes need at least 2 bits")]
    InvalidBitSize(u64),
    /// The structural transform met a value kind it cannot encrypt.
    #[error("unsupported value type: {0}")]
    UnsupportedValueType(&'static str),
    /// The decrypted bytes are not valid UTF-8 text.
    #[error("decrypted message is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
}

/// Result alias for RSA operations.
pub type Result<T> = core::result::Result<T, RsaError>;
