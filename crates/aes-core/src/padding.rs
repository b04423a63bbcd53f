//! PKCS#7 padding to the 16-byte block size.

use crate::block::BLOCK_SIZE;
use crate::error::{AesError, Result};

/// Appends `16 - len % 16` bytes, each holding that count.
///
/// Input that is already block-aligned receives a full block of padding.
pub fn apply_padding(data: &[u8]) -> Vec<u8> {
    let pad = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut padded = Vec::with_capacity(data.len() + pad);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad, pad as u8);
    padded
}

/// Validates and strips trailing padding, returning the unpadded prefix.
pub fn remove_padding(data: &[u8]) -> Result<&[u8]> {
    let &last = data.last().ok_or(AesError::InvalidPadding)?;
    let pad = last as usize;
    if pad == 0 || pad > BLOCK_SIZE || pad > data.len() {
        return Err(AesError::InvalidPadding);
    }
    let (body, tail) = data.split_at(data.len() - pad);
    if tail.iter().any(|&b| b != last) {
        return Err(AesError::InvalidPadding);
    }
    Ok(body)
}
