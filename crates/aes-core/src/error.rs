//! Error type for the block cipher engine.

use std::string::FromUtf8Error;

use thiserror::Error;

/// Failures reported by key expansion, padding and message-level operations.
#[derive(Debug, Error)]
pub enum AesError {
    /// The key length does not match the declared size.
    #[error("key of {key_bytes} bytes does not match a {declared_bits}-bit AES key")]
    InvalidKeySize {
        /// Declared key size in bits.
        declared_bits: u32,
        /// Actual key length in bytes.
        key_bytes: usize,
    },
    /// The requested key size is not 128, 192 or 256 bits.
    #[error("AES key size must be 128, 192 or 256 bits, got {0}")]
    UnsupportedKeySize(u32),
    /// Ciphertext is not a whole number of blocks.
    #[error("ciphertext length {0} is not a multiple of 16 bytes")]
    InvalidCiphertextLength(usize),
    /// Trailing padding bytes failed validation.
    #[error("invalid padding")]
    InvalidPadding,
    /// Decrypted plaintext is not valid UTF-8 text.
    #[error("decrypted message is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
    /// The random source failed while drawing key material.
    #[error("random source failure: {0}")]
    RandomSource(#[from] rand::Error),
}

/// Result alias for block cipher operations.
pub type Result<T> = core::result::Result<T, AesError>;
