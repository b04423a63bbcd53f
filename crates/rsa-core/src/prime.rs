//! Probabilistic primality testing and random prime generation.

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, ToPrimitive, Zero};
use rand::{CryptoRng, RngCore};
use tracing::{debug, trace};

use crate::arith::mod_pow;
use crate::error::{Result, RsaError};

/// Miller–Rabin rounds used when the caller does not choose.
pub const DEFAULT_PRIME_TEST_ROUNDS: u32 = 10;

const SMALL_PRIMES: [u32; 54] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Tests `n` for primality: trial division by small primes, then `rounds`
/// Miller–Rabin rounds with random witnesses.
///
/// A composite passes with probability at most `4^-rounds`. At least one
/// round always runs, so `rounds == 0` behaves like `1`.
pub fn is_probable_prime<R: RngCore + ?Sized>(n: &BigUint, rounds: u32, rng: &mut R) -> bool {
    if let Some(small) = n.to_u32() {
        if small < 2 {
            return false;
        }
        if SMALL_PRIMES.contains(&small) {
            return true;
        }
    }
    if SMALL_PRIMES.iter().any(|&p| (n % p).is_zero()) {
        return false;
    }
    // Every composite below 257^2 has a factor in SMALL_PRIMES.
    if n < &BigUint::from(257u32 * 257) {
        return true;
    }

    let one = BigUint::one();
    let two = BigUint::from(2u8);
    let n_minus_one = n - 1u8;

    // n - 1 = d * 2^s with d odd.
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for _ in 0..rounds.max(1) {
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = mod_pow(&a, &d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = &x * &x % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }

    true
}

/// Draws random `bits`-bit integers until one passes [`is_probable_prime`].
///
/// The top bit is forced so the result has exactly `bits` bits; the low bit
/// is forced so only odd candidates are tested.
pub fn generate_large_prime<R: RngCore + CryptoRng + ?Sized>(
    bits: u64,
    rounds: u32,
    rng: &mut R,
) -> Result<BigUint> {
    if bits < 2 {
        return Err(RsaError::InvalidBitSize(bits));
    }

    let byte_len = ((bits + 7) / 8) as usize;
    let excess = byte_len as u64 * 8 - bits;
    let top_bit = BigUint::one() << (bits - 1);
    let mut buf = vec![0u8; byte_len];
    let mut attempts: u64 = 0;

    loop {
        attempts += 1;
        rng.try_fill_bytes(&mut buf)
            .map_err(|source| RsaError::PrimeGenerationFailed { bits, source })?;
        buf[0] &= 0xff >> excess;

        let mut candidate = BigUint::from_bytes_be(&buf);
        candidate |= &top_bit;
        candidate |= BigUint::one();

        if is_probable_prime(&candidate, rounds, rng) {
            debug!(bits, attempts, "found probable prime");
            return Ok(candidate);
        }
        trace!(bits, attempts, "rejected prime candidate");
    }
}
