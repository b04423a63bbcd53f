//! Message-level encryption: PKCS#7 padding plus independent 16-byte blocks
//! (ECB, no IV or chaining).

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::block::{Block, BLOCK_SIZE};
use crate::cipher::{decrypt_block, encrypt_block};
use crate::error::{AesError, Result};
use crate::key::{expand_key, KeySize};
use crate::padding::{apply_padding, remove_padding};

/// Pads and encrypts raw bytes, concatenating the encrypted blocks.
pub fn encrypt_bytes(plaintext: &[u8], key: &[u8], key_size_bits: u32) -> Result<Vec<u8>> {
    let schedule = expand_key(key, key_size_bits)?;
    let mut data = apply_padding(plaintext);
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let mut block: Block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(chunk);
        chunk.copy_from_slice(&encrypt_block(&block, &schedule));
    }
    debug!(blocks = data.len() / BLOCK_SIZE, bits = key_size_bits, "encrypted message");
    Ok(data)
}

/// Decrypts block-aligned ciphertext and strips its padding.
pub fn decrypt_bytes(ciphertext: &[u8], key: &[u8], key_size_bits: u32) -> Result<Vec<u8>> {
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(AesError::InvalidCiphertextLength(ciphertext.len()));
    }
    let schedule = expand_key(key, key_size_bits)?;
    let mut data = ciphertext.to_vec();
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let mut block: Block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(chunk);
        chunk.copy_from_slice(&decrypt_block(&block, &schedule));
    }
    let len = remove_padding(&data)?.len();
    data.truncate(len);
    Ok(data)
}

/// Encrypts a text message under `key`, returning raw ciphertext bytes.
pub fn encrypt(message: &str, key: &[u8], key_size_bits: u32) -> Result<Vec<u8>> {
    encrypt_bytes(message.as_bytes(), key, key_size_bits)
}

/// Decrypts raw ciphertext bytes back into a text message.
pub fn decrypt(ciphertext: &[u8], key: &[u8], key_size_bits: u32) -> Result<String> {
    let plaintext = decrypt_bytes(ciphertext, key, key_size_bits)?;
    Ok(String::from_utf8(plaintext)?)
}

/// Draws a random key of the requested size from the operating system CSPRNG.
pub fn generate_random_key(key_size_bits: u32) -> Result<Vec<u8>> {
    let size = KeySize::try_from(key_size_bits).map_err(AesError::UnsupportedKeySize)?;
    generate_key_with(&mut OsRng, size)
}

/// Draws a random key of the requested size from `rng`.
pub fn generate_key_with<R: RngCore + CryptoRng>(rng: &mut R, size: KeySize) -> Result<Vec<u8>> {
    let mut key = vec![0u8; size.key_bytes()];
    rng.try_fill_bytes(&mut key)?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const KEYS: [(&[u8], u32); 3] = [
        (b"thisis16bytekey!", 128),
        (b"thisis24bytekeyforaes192", 192),
        (b"thisis32bytekeyforaes256encrypt!", 256),
    ];

    #[test]
    fn text_round_trip_all_key_sizes() {
        let messages = [
            "",
            "Test message for AES-128!",
            "exactly16bytes!!",
            "Test message for AES-256 with a strong key.",
            "ünïcödé ✓ text",
        ];
        for (key, bits) in KEYS {
            for message in messages {
                let ct = encrypt(message, key, bits).unwrap();
                assert_eq!(ct.len() % BLOCK_SIZE, 0);
                assert_eq!(decrypt(&ct, key, bits).unwrap(), message);
            }
        }
    }

    #[test]
    fn byte_round_trip_random_lengths() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for size in [KeySize::Aes128, KeySize::Aes192, KeySize::Aes256] {
            let key = generate_key_with(&mut rng, size).unwrap();
            for len in [0usize, 1, 15, 16, 17, 31, 32, 100, 257] {
                let mut plaintext = vec![0u8; len];
                rng.fill_bytes(&mut plaintext);
                let ct = encrypt_bytes(&plaintext, &key, size.bits()).unwrap();
                assert_eq!(ct.len(), (len / BLOCK_SIZE + 1) * BLOCK_SIZE);
                assert_eq!(decrypt_bytes(&ct, &key, size.bits()).unwrap(), plaintext);
            }
        }
    }

    #[test]
    fn identical_blocks_encrypt_identically() {
        let (key, bits) = KEYS[0];
        let ct = encrypt_bytes(&[0x41u8; 32], key, bits).unwrap();
        assert_eq!(&ct[..16], &ct[16..32]);
    }

    #[test]
    fn rejects_unaligned_ciphertext() {
        let (key, bits) = KEYS[0];
        let err = decrypt(&[0u8; 17], key, bits).unwrap_err();
        assert!(matches!(err, AesError::InvalidCiphertextLength(17)));
    }

    #[test]
    fn rejects_wrong_key_length() {
        let err = encrypt("hi", b"short", 128).unwrap_err();
        assert!(matches!(err, AesError::InvalidKeySize { .. }));
        let err = decrypt(&[0u8; 16], &[0u8; 16], 256).unwrap_err();
        assert!(matches!(err, AesError::InvalidKeySize { .. }));
    }

    #[test]
    fn tampered_padding_is_rejected() {
        let (key, bits) = KEYS[0];
        let schedule = expand_key(key, bits).unwrap();
        let mut bad = [5u8; 16];
        bad[15] = 0;
        let ct = encrypt_block(&bad, &schedule);
        assert!(matches!(
            decrypt_bytes(&ct, key, bits),
            Err(AesError::InvalidPadding)
        ));
    }

    #[test]
    fn random_keys_have_requested_length() {
        for bits in [128u32, 192, 256] {
            assert_eq!(generate_random_key(bits).unwrap().len(), bits as usize / 8);
        }
        assert!(matches!(
            generate_random_key(64),
            Err(AesError::UnsupportedKeySize(64))
        ));
    }
}
