//! AES-128/192/256 block cipher implemented from FIPS-197.
//!
//! The crate provides:
//! - GF(2^8) arithmetic, word helpers and the substitution boxes.
//! - Key schedule expansion for all three key sizes.
//! - Single-block encryption and decryption.
//! - PKCS#7 padding and message-level encryption that concatenates
//!   independently encrypted blocks (ECB, no IV).
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod gf;
mod key;
mod message;
mod padding;
mod round;
mod sbox;

pub use crate::block::{state_index, Block, BLOCK_SIZE};
pub use crate::cipher::{decrypt_block, encrypt_block};
pub use crate::error::{AesError, Result};
pub use crate::gf::{gf_mul, rot_word, sub_word, xtime};
pub use crate::key::{expand_key, KeySchedule, KeySize};
pub use crate::message::{
    decrypt, decrypt_bytes, encrypt, encrypt_bytes, generate_key_with, generate_random_key,
};
pub use crate::padding::{apply_padding, remove_padding};
pub use crate::sbox::{inv_sbox, sbox};
