//! GF(2^8) arithmetic and 32-bit word helpers used by the key schedule and
//! the diffusion layer.

use crate::sbox::sbox;

/// Low byte of the AES reduction polynomial x^8 + x^4 + x^3 + x + 1.
const REDUCTION: u8 = 0x1b;

/// Multiplies `byte` by x (i.e. by 2) in GF(2^8).
#[inline]
pub fn xtime(byte: u8) -> u8 {
    let shifted = byte << 1;
    if byte & 0x80 != 0 {
        shifted ^ REDUCTION
    } else {
        shifted
    }
}

/// Multiplies two field elements with the shift-and-add (Russian peasant) method.
pub fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    product
}

/// Rotates a word one byte to the left: `[a0, a1, a2, a3] -> [a1, a2, a3, a0]`.
#[inline]
pub fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

/// Applies the forward S-box to each byte of a word.
pub fn sub_word(word: u32) -> u32 {
    let [b0, b1, b2, b3] = word.to_be_bytes();
    u32::from_be_bytes([sbox(b0), sbox(b1), sbox(b2), sbox(b3)])
}
