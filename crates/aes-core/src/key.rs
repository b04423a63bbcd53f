//! Key sizes and the key schedule for AES-128/192/256.

use tracing::debug;

use crate::block::Block;
use crate::error::{AesError, Result};
use crate::gf::{rot_word, sub_word};

/// Round constants indexed by `i / Nk`; entry 0 is never used.
const RCON: [u8; 11] = [
    0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36,
];

/// Supported AES key sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 128-bit key, 10 rounds.
    Aes128,
    /// 192-bit key, 12 rounds.
    Aes192,
    /// 256-bit key, 14 rounds.
    Aes256,
}

impl KeySize {
    /// Key size in bits.
    pub const fn bits(self) -> u32 {
        match self {
            KeySize::Aes128 => 128,
            KeySize::Aes192 => 192,
            KeySize::Aes256 => 256,
        }
    }

    /// Key length in bytes.
    pub const fn key_bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Number of 32-bit words in the key (`Nk`).
    pub const fn words_in_key(self) -> usize {
        self.bits() as usize / 32
    }

    /// Number of rounds (`Nr`).
    pub const fn rounds(self) -> usize {
        self.words_in_key() + 6
    }
}

impl TryFrom<u32> for KeySize {
    type Error = u32;

    fn try_from(bits: u32) -> core::result::Result<Self, Self::Error> {
        match bits {
            128 => Ok(KeySize::Aes128),
            192 => Ok(KeySize::Aes192),
            256 => Ok(KeySize::Aes256),
            other => Err(other),
        }
    }
}

/// Expanded key schedule: `4 * (Nr + 1)` words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySchedule {
    words: Vec<u32>,
    size: KeySize,
}

impl KeySchedule {
    /// Number of rounds (`Nr`).
    pub fn rounds(&self) -> usize {
        self.size.rounds()
    }

    /// All schedule words in order.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Returns the 16-byte round key for `round` (0..=Nr), one column per word.
    pub fn round_key(&self, round: usize) -> Block {
        let mut key = [0u8; 16];
        for (col, word) in self.words[round * 4..round * 4 + 4].iter().enumerate() {
            key[col * 4..col * 4 + 4].copy_from_slice(&word.to_be_bytes());
        }
        key
    }
}

/// Expands `key` into a schedule after checking it matches `key_size_bits`.
pub fn expand_key(key: &[u8], key_size_bits: u32) -> Result<KeySchedule> {
    if key.len() * 8 != key_size_bits as usize {
        return Err(AesError::InvalidKeySize {
            declared_bits: key_size_bits,
            key_bytes: key.len(),
        });
    }
    let size = KeySize::try_from(key_size_bits).map_err(AesError::UnsupportedKeySize)?;

    let nk = size.words_in_key();
    let total_words = 4 * (size.rounds() + 1);
    let mut words = Vec::with_capacity(total_words);

    for chunk in key.chunks_exact(4) {
        words.push(u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    for i in nk..total_words {
        let mut temp = words[i - 1];
        if i % nk == 0 {
            temp = sub_word(rot_word(temp)) ^ (u32::from(RCON[i / nk]) << 24);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        words.push(words[i - nk] ^ temp);
    }

    debug!(bits = key_size_bits, words = words.len(), "expanded AES key schedule");
    Ok(KeySchedule { words, size })
}
