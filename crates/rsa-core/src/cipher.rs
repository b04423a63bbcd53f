//! Textbook RSA over single integers: `c = m^e mod n`, `m = c^d mod n`.
//!
//! No padding is applied and messages are never chunked, so a message must
//! encode to an integer below the modulus.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::arith::mod_pow;
use crate::codec::{bytes_to_int, hex_to_int, int_to_bytes, int_to_hex};
use crate::error::{Result, RsaError};

/// Encrypts raw bytes, returning the ciphertext integer as hex.
pub fn encrypt_bytes(
    message: &[u8],
    public_exponent: &BigUint,
    modulus: &BigUint,
) -> Result<String> {
    let m = bytes_to_int(message);
    if &m >= modulus {
        return Err(RsaError::MessageTooLarge {
            message_bits: m.bits(),
            modulus_bits: modulus.bits(),
        });
    }
    let c = mod_pow(&m, public_exponent, modulus);
    Ok(int_to_hex(&c))
}

/// Decrypts a hex ciphertext into the minimal big-endian plaintext bytes.
pub fn decrypt_bytes(
    ciphertext: &str,
    private_exponent: &BigUint,
    modulus: &BigUint,
) -> Result<Vec<u8>> {
    let c = hex_to_int(ciphertext)?;
    if modulus.is_zero() {
        return Err(RsaError::InvalidModulus);
    }
    let m = mod_pow(&c, private_exponent, modulus);
    Ok(int_to_bytes(&m))
}

/// Encrypts a text message with the public exponent.
pub fn encrypt(message: &str, public_exponent: &BigUint, modulus: &BigUint) -> Result<String> {
    encrypt_bytes(message.as_bytes(), public_exponent, modulus)
}

/// Decrypts a hex ciphertext back into text.
///
/// A leading NUL in the original message is lost, since the plaintext integer
/// carries no length.
pub fn decrypt(ciphertext: &str, private_exponent: &BigUint, modulus: &BigUint) -> Result<String> {
    let bytes = decrypt_bytes(ciphertext, private_exponent, modulus)?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{KeyGenerator, KeyPair};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn textbook() -> (BigUint, BigUint, BigUint) {
        // p = 61, q = 53
        (BigUint::from(17u32), BigUint::from(2753u32), BigUint::from(3233u32))
    }

    fn test_keys() -> KeyPair {
        KeyGenerator::new(ChaCha20Rng::from_seed([31u8; 32]))
            .generate(256)
            .unwrap()
    }

    #[test]
    fn textbook_vector() {
        let (e, d, n) = textbook();
        let ct = encrypt("A", &e, &n).unwrap();
        assert_eq!(ct, "0ae6");
        assert_eq!(decrypt(&ct, &d, &n).unwrap(), "A");
    }

    #[test]
    fn round_trips_messages() {
        let keys = test_keys();
        let messages = [
            "Hello",
            "A very long message that exceeds normal length",
            "ünïcödé ✓",
            "",
        ];
        for message in messages {
            let ct = encrypt(message, &keys.public_exponent, &keys.modulus).unwrap();
            let pt = decrypt(&ct, &keys.private_exponent, &keys.modulus).unwrap();
            assert_eq!(pt, message);
        }
    }

    #[test]
    fn empty_message_encrypts_to_empty_hex() {
        let keys = test_keys();
        let ct = encrypt("", &keys.public_exponent, &keys.modulus).unwrap();
        assert_eq!(ct, "");
    }

    #[test]
    fn leading_nul_is_lost() {
        let keys = test_keys();
        let ct = encrypt("\0abc", &keys.public_exponent, &keys.modulus).unwrap();
        let pt = decrypt(&ct, &keys.private_exponent, &keys.modulus).unwrap();
        assert_eq!(pt, "abc");
    }

    #[test]
    fn oversized_message_is_rejected() {
        let keys = test_keys();
        let oversized = vec![0xffu8; keys.modulus.bits() as usize / 8 + 1];
        let err = encrypt_bytes(&oversized, &keys.public_exponent, &keys.modulus).unwrap_err();
        assert!(matches!(err, RsaError::MessageTooLarge { .. }));

        let just_above = int_to_bytes(&(&keys.modulus + 1u8));
        let err = encrypt_bytes(&just_above, &keys.public_exponent, &keys.modulus).unwrap_err();
        assert!(matches!(err, RsaError::MessageTooLarge { .. }));

        let (e, _, n) = textbook();
        assert!(matches!(
            encrypt("AB", &e, &n),
            Err(RsaError::MessageTooLarge { .. })
        ));
    }

    #[test]
    fn message_equal_to_modulus_is_rejected() {
        let (e, _, n) = textbook();
        let bytes = int_to_bytes(&n);
        assert!(matches!(
            encrypt_bytes(&bytes, &e, &n),
            Err(RsaError::MessageTooLarge { .. })
        ));
    }

    #[test]
    fn malformed_ciphertext_is_rejected() {
        let keys = test_keys();
        let err = decrypt("not hex", &keys.private_exponent, &keys.modulus).unwrap_err();
        assert!(matches!(err, RsaError::InvalidCiphertextEncoding(_)));
    }

    #[test]
    fn zero_modulus_is_rejected() {
        let zero = BigUint::zero();
        assert!(matches!(
            decrypt("01", &BigUint::from(3u8), &zero),
            Err(RsaError::InvalidModulus)
        ));
        assert!(matches!(
            encrypt("", &BigUint::from(3u8), &zero),
            Err(RsaError::MessageTooLarge { .. })
        ));
    }
}
