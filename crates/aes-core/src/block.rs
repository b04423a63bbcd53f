//! Block and state representation helpers.
//!
//! A block doubles as the cipher state: a 4×4 byte matrix stored column-major,
//! so the byte at column `c`, row `r` lives at index `c * 4 + r`.

/// Size of an AES block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES block of 16 bytes.
pub type Block = [u8; BLOCK_SIZE];

/// Returns the index of the state byte at (`col`, `row`).
#[inline]
pub const fn state_index(col: usize, row: usize) -> usize {
    col * 4 + row
}

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}
