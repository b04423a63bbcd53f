//! Modular arithmetic over arbitrary-precision integers.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Result, RsaError};

/// Computes `base^exp mod modulus` with right-to-left square-and-multiply.
///
/// `modulus` must be non-zero.
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;
    let digits: Vec<u64> = exp.iter_u64_digits().collect();

    for (idx, &digit) in digits.iter().enumerate() {
        // Skip the squarings above the top set bit of the last digit.
        let width = if idx + 1 == digits.len() {
            64 - digit.leading_zeros()
        } else {
            64
        };
        let mut bits = digit;
        for _ in 0..width {
            if bits & 1 == 1 {
                result = &result * &base % modulus;
            }
            base = &base * &base % modulus;
            bits >>= 1;
        }
    }

    result
}

/// Iterative extended Euclidean algorithm.
///
/// Returns `(gcd, x, y)` such that `a*x + b*y = gcd`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = &old_x - &q * &x;
        old_x = std::mem::replace(&mut x, next_x);

        let next_y = &old_y - &q * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    (old_r, old_x, old_y)
}

/// Returns `x` in `[0, n)` with `a*x ≡ 1 (mod n)`.
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Result<BigUint> {
    if n.is_zero() {
        return Err(RsaError::NoInverseExists);
    }
    let a = BigInt::from(a.clone());
    let n = BigInt::from(n.clone());
    let (gcd, x, _) = extended_gcd(&a, &n);
    if !gcd.is_one() {
        return Err(RsaError::NoInverseExists);
    }
    x.mod_floor(&n)
        .to_biguint()
        .ok_or(RsaError::NoInverseExists)
}
