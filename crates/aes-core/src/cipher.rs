//! Single-block encryption and decryption for any supported key size.

use crate::block::Block;
use crate::key::KeySchedule;
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};

/// Encrypts a single 16-byte block with an expanded key schedule.
pub fn encrypt_block(block: &Block, schedule: &KeySchedule) -> Block {
    let nr = schedule.rounds();
    let mut state = *block;

    add_round_key(&mut state, &schedule.round_key(0));

    for round in 1..nr {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, &schedule.round_key(round));
    }

    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, &schedule.round_key(nr));

    state
}

/// Decrypts a single 16-byte block with an expanded key schedule.
pub fn decrypt_block(block: &Block, schedule: &KeySchedule) -> Block {
    let nr = schedule.rounds();
    let mut state = *block;

    add_round_key(&mut state, &schedule.round_key(nr));
    for round in (1..nr).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, &schedule.round_key(round));
        inv_mix_columns(&mut state);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, &schedule.round_key(0));

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::expand_key;
    use rand::RngCore;

    fn block_from_hex(hex_str: &str) -> Block {
        let bytes = hex::decode(hex_str).expect("valid hex");
        bytes.try_into().expect("16 bytes")
    }

    #[test]
    fn encrypt_matches_fips_appendix_b() {
        let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let schedule = expand_key(&key, 128).unwrap();
        let plain = block_from_hex("3243f6a8885a308d313198a2e0370734");
        let cipher = block_from_hex("3925841d02dc09fbdc118597196a0b32");

        let ct = encrypt_block(&plain, &schedule);
        assert_eq!(ct, cipher);
        assert_eq!(decrypt_block(&ct, &schedule), plain);
    }

    #[test]
    fn matches_fips_appendix_c_vectors() {
        let plain = block_from_hex("00112233445566778899aabbccddeeff");
        let cases = [
            (
                "000102030405060708090a0b0c0d0e0f",
                128,
                "69c4e0d86a7b0430d8cdb78070b4c55a",
            ),
            (
                "000102030405060708090a0b0c0d0e0f1011121314151617",
                192,
                "dda97ca4864cdfe06eaf70a0ec0d7191",
            ),
            (
                "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
                256,
                "8ea2b7ca516745bfeafc49904b496089",
            ),
        ];

        for (key_hex, bits, cipher_hex) in cases {
            let key = hex::decode(key_hex).unwrap();
            let schedule = expand_key(&key, bits).unwrap();
            let expected = block_from_hex(cipher_hex);
            assert_eq!(encrypt_block(&plain, &schedule), expected, "AES-{bits}");
            assert_eq!(decrypt_block(&expected, &schedule), plain, "AES-{bits}");
        }
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for bits in [128u32, 192, 256] {
            for _ in 0..50 {
                let mut key = vec![0u8; bits as usize / 8];
                let mut block = [0u8; 16];
                rng.fill_bytes(&mut key);
                rng.fill_bytes(&mut block);
                let schedule = expand_key(&key, bits).unwrap();
                let ct = encrypt_block(&block, &schedule);
                assert_eq!(decrypt_block(&ct, &schedule), block);
            }
        }
    }
}
