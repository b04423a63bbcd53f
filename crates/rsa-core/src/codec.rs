//! Conversions between text, raw bytes, big integers and hex.
//!
//! Integers carry no length prefix: leading zero bytes of a message do not
//! survive the trip through an integer, and zero encodes as the empty string.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::Result;

/// Interprets `bytes` as a big-endian unsigned integer.
pub fn bytes_to_int(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Minimal big-endian byte representation; empty for zero.
pub fn int_to_bytes(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

/// Lowercase hex of the minimal byte representation.
pub fn int_to_hex(value: &BigUint) -> String {
    hex::encode(int_to_bytes(value))
}

/// Parses a hex string (either case, even length) into an integer.
pub fn hex_to_int(text: &str) -> Result<BigUint> {
    Ok(bytes_to_int(&hex::decode(text)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RsaError;

    #[test]
    fn zero_is_empty() {
        assert!(int_to_bytes(&BigUint::zero()).is_empty());
        assert_eq!(int_to_hex(&BigUint::zero()), "");
        assert_eq!(hex_to_int("").unwrap(), BigUint::zero());
    }

    #[test]
    fn text_bytes_are_big_endian() {
        assert_eq!(bytes_to_int(b"AB"), BigUint::from(0x4142u32));
        assert_eq!(int_to_hex(&BigUint::from(0x0ae6u32)), "0ae6");
        assert_eq!(hex_to_int("0AE6").unwrap(), BigUint::from(2790u32));
    }

    #[test]
    fn leading_zero_bytes_are_dropped() {
        let value = bytes_to_int(b"\0\0hi");
        assert_eq!(int_to_bytes(&value), b"hi");
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(matches!(
            hex_to_int("abc"),
            Err(RsaError::InvalidCiphertextEncoding(_))
        ));
        assert!(matches!(
            hex_to_int("zz"),
            Err(RsaError::InvalidCiphertextEncoding(_))
        ));
    }
}
