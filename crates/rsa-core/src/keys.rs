//! RSA key pairs and their generation from two random primes.

use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde_json::Value;
use tracing::{debug, warn};

use crate::arith::mod_inverse;
use crate::cipher::{decrypt, encrypt};
use crate::error::{Result, RsaError};
use crate::prime::{generate_large_prime, DEFAULT_PRIME_TEST_ROUNDS};
use crate::structure::{decrypt_structure, encrypt_structure};

/// Fixed public exponent `e = 2^16 + 1`.
pub const PUBLIC_EXPONENT: u32 = 65537;

/// Public and private exponents sharing one modulus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    /// Public exponent `e`.
    pub public_exponent: BigUint,
    /// Private exponent `d`, with `e * d ≡ 1 (mod phi)`.
    pub private_exponent: BigUint,
    /// Modulus `n = p * q`.
    pub modulus: BigUint,
}

impl KeyPair {
    /// Bit length of the modulus.
    pub fn modulus_bits(&self) -> u64 {
        self.modulus.bits()
    }

    /// The `(e, n)` half of the pair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            exponent: self.public_exponent.clone(),
            modulus: self.modulus.clone(),
        }
    }

    /// The `(d, n)` half of the pair.
    pub fn private_key(&self) -> PrivateKey {
        PrivateKey {
            exponent: self.private_exponent.clone(),
            modulus: self.modulus.clone(),
        }
    }
}

/// Encrypting half of a key pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    /// Public exponent.
    pub exponent: BigUint,
    /// Modulus.
    pub modulus: BigUint,
}

impl PublicKey {
    /// Encrypts a text message to a hex ciphertext.
    pub fn encrypt(&self, message: &str) -> Result<String> {
        encrypt(message, &self.exponent, &self.modulus)
    }

    /// Encrypts every scalar leaf of a document.
    pub fn encrypt_structure(&self, value: &Value) -> Result<Value> {
        encrypt_structure(value, &self.exponent, &self.modulus)
    }
}

/// Decrypting half of a key pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKey {
    /// Private exponent.
    pub exponent: BigUint,
    /// Modulus.
    pub modulus: BigUint,
}

impl PrivateKey {
    /// Decrypts a hex ciphertext to text.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String> {
        decrypt(ciphertext, &self.exponent, &self.modulus)
    }

    /// Decrypts every scalar leaf of a document.
    pub fn decrypt_structure(&self, value: &Value) -> Result<Value> {
        decrypt_structure(value, &self.exponent, &self.modulus)
    }
}

/// Configuration for key generation.
#[derive(Clone, Debug)]
pub struct KeyGenConfig {
    /// Miller–Rabin rounds per prime candidate. Zero is treated as one.
    pub prime_test_rounds: u32,
    /// Search for `p` and `q` on two threads.
    pub concurrent_primes: bool,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            prime_test_rounds: DEFAULT_PRIME_TEST_ROUNDS,
            concurrent_primes: false,
        }
    }
}

/// Key pair generator parametrized by an RNG.
pub struct KeyGenerator<R: RngCore + CryptoRng> {
    rng: R,
    config: KeyGenConfig,
}

impl<R: RngCore + CryptoRng> KeyGenerator<R> {
    /// Creates a new generator with default configuration.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            config: KeyGenConfig::default(),
        }
    }

    /// Creates a generator with explicit configuration.
    pub fn with_config(rng: R, config: KeyGenConfig) -> Self {
        Self { rng, config }
    }

    /// Generates a key pair from two `bit_size`-bit primes.
    ///
    /// The modulus therefore has `2 * bit_size - 1` or `2 * bit_size` bits.
    pub fn generate(&mut self, bit_size: u64) -> Result<KeyPair> {
        let (p, q) = if self.config.concurrent_primes {
            self.prime_pair_concurrent(bit_size)?
        } else {
            let rounds = self.config.prime_test_rounds;
            let p = generate_large_prime(bit_size, rounds, &mut self.rng)?;
            let q = generate_large_prime(bit_size, rounds, &mut self.rng)?;
            (p, q)
        };

        let keys = key_pair_from_primes(&p, &q)?;
        debug!(
            bit_size,
            modulus_bits = keys.modulus_bits(),
            "generated RSA key pair"
        );
        Ok(keys)
    }

    fn prime_pair_concurrent(&mut self, bits: u64) -> Result<(BigUint, BigUint)> {
        let rounds = self.config.prime_test_rounds;
        let mut seeds = [[0u8; 32]; 2];
        for seed in seeds.iter_mut() {
            self.rng
                .try_fill_bytes(seed)
                .map_err(|source| RsaError::PrimeGenerationFailed { bits, source })?;
        }
        let [seed_p, seed_q] = seeds;

        std::thread::scope(|scope| -> Result<(BigUint, BigUint)> {
            let q_handle = scope.spawn(move || {
                generate_large_prime(bits, rounds, &mut ChaCha20Rng::from_seed(seed_q))
            });
            let p = generate_large_prime(bits, rounds, &mut ChaCha20Rng::from_seed(seed_p));
            let q = q_handle
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
            Ok((p?, q?))
        })
    }
}

/// Derives `n = p * q` and `d = e^-1 mod (p - 1)(q - 1)` with the fixed `e`.
fn key_pair_from_primes(p: &BigUint, q: &BigUint) -> Result<KeyPair> {
    let modulus = p * q;
    let phi = (p - 1u8) * (q - 1u8);
    let public_exponent = BigUint::from(PUBLIC_EXPONENT);

    let private_exponent = mod_inverse(&public_exponent, &phi).map_err(|err| {
        warn!(modulus_bits = modulus.bits(), "public exponent is not invertible modulo phi");
        RsaError::KeyGenerationFailed(Box::new(err))
    })?;

    Ok(KeyPair {
        public_exponent,
        private_exponent,
        modulus,
    })
}

/// Generates a key pair from two `bit_size`-bit primes using the OS CSPRNG.
pub fn generate_keys(bit_size: u64) -> Result<KeyPair> {
    KeyGenerator::new(OsRng).generate(bit_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::mod_pow;
    use crate::test_support::FailingRng;
    use num_bigint::RandBigInt;

    fn seeded(seed: u8) -> ChaCha20Rng {
        ChaCha20Rng::from_seed([seed; 32])
    }

    #[test]
    fn generated_exponents_invert_each_other() {
        let keys = KeyGenerator::new(seeded(41)).generate(256).unwrap();
        assert_eq!(keys.public_exponent, BigUint::from(PUBLIC_EXPONENT));
        assert!(keys.modulus_bits() >= 511);

        let mut rng = seeded(42);
        for _ in 0..10 {
            let m = rng.gen_biguint_below(&keys.modulus);
            let c = mod_pow(&m, &keys.public_exponent, &keys.modulus);
            assert_eq!(mod_pow(&c, &keys.private_exponent, &keys.modulus), m);
        }
    }

    #[test]
    fn same_seed_same_keys() {
        let a = KeyGenerator::new(seeded(43)).generate(128).unwrap();
        let b = KeyGenerator::new(seeded(43)).generate(128).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn concurrent_prime_search_produces_working_keys() {
        let config = KeyGenConfig {
            concurrent_primes: true,
            ..KeyGenConfig::default()
        };
        let keys = KeyGenerator::with_config(seeded(44), config)
            .generate(256)
            .unwrap();
        let ct = keys.public_key().encrypt("concurrent").unwrap();
        assert_eq!(keys.private_key().decrypt(&ct).unwrap(), "concurrent");
    }

    #[test]
    fn round_trip_with_2048_bit_modulus() {
        let keys = generate_keys(1024).unwrap();
        assert!(keys.modulus_bits() >= 2047);

        let message = "The quick brown fox jumps over the lazy dog".repeat(5);
        let ct = keys.public_key().encrypt(&message).unwrap();
        assert_eq!(keys.private_key().decrypt(&ct).unwrap(), message);
        assert_eq!(keys.private_key().decrypt("").unwrap(), "");
    }

    #[test]
    fn random_source_failure_is_propagated() {
        let err = KeyGenerator::new(FailingRng).generate(64).unwrap_err();
        assert!(matches!(err, RsaError::PrimeGenerationFailed { bits: 64, .. }));

        let config = KeyGenConfig {
            concurrent_primes: true,
            ..KeyGenConfig::default()
        };
        let err = KeyGenerator::with_config(FailingRng, config)
            .generate(64)
            .unwrap_err();
        assert!(matches!(err, RsaError::PrimeGenerationFailed { .. }));
    }

    #[test]
    fn non_invertible_exponent_fails_key_generation() {
        // 917519 = 14 * 65537 + 1, so 65537 divides phi.
        let p = BigUint::from(917_519u32);
        let q = BigUint::from(1_000_003u32);
        let err = key_pair_from_primes(&p, &q).unwrap_err();
        match err {
            RsaError::KeyGenerationFailed(cause) => {
                assert!(matches!(*cause, RsaError::NoInverseExists));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn key_pair_from_textbook_primes() {
        let keys = key_pair_from_primes(&BigUint::from(61u32), &BigUint::from(53u32)).unwrap();
        assert_eq!(keys.modulus, BigUint::from(3233u32));
        // 65537 * 2753 = 180423361 = 57826 * 3120 + 1
        assert_eq!(keys.private_exponent, BigUint::from(2753u32));
    }

    #[test]
    fn degenerate_bit_size_is_rejected() {
        assert!(matches!(
            KeyGenerator::new(seeded(45)).generate(0),
            Err(RsaError::InvalidBitSize(0))
        ));
    }
}
