//! Recursive encryption of JSON-shaped documents.
//!
//! Strings are encrypted as text and numbers are encrypted as their decimal
//! text. Arrays and objects keep their shape. Decryption yields strings for
//! every leaf, so a number that went in comes back as its decimal text.
//! `null` and booleans abort the whole transform.

use num_bigint::BigUint;
use serde_json::{Map, Number, Value};

use crate::cipher::{decrypt, encrypt};
use crate::error::{Result, RsaError};

/// Encrypts every scalar leaf of `value`.
pub fn encrypt_structure(
    value: &Value,
    public_exponent: &BigUint,
    modulus: &BigUint,
) -> Result<Value> {
    transform(value, &|text: &str| encrypt(text, public_exponent, modulus))
}

/// Decrypts every scalar leaf of `value`.
///
/// Numeric leaves are read as their decimal text and decrypted like any other
/// ciphertext string.
pub fn decrypt_structure(
    value: &Value,
    private_exponent: &BigUint,
    modulus: &BigUint,
) -> Result<Value> {
    transform(value, &|text: &str| decrypt(text, private_exponent, modulus))
}

fn transform<F>(value: &Value, leaf: &F) -> Result<Value>
where
    F: Fn(&str) -> Result<String>,
{
    match value {
        Value::String(text) => leaf(text).map(Value::String),
        Value::Number(number) => leaf(&number_text(number)).map(Value::String),
        Value::Array(items) => items
            .iter()
            .map(|item| transform(item, leaf))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(entries) => entries
            .iter()
            .map(|(key, item)| Ok((key.clone(), transform(item, leaf)?)))
            .collect::<Result<Map<_, _>>>()
            .map(Value::Object),
        Value::Bool(_) => Err(RsaError::UnsupportedValueType("boolean")),
        Value::Null => Err(RsaError::UnsupportedValueType("null")),
    }
}

/// Decimal text of a number; floats use the shortest round-trip form.
fn number_text(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        int.to_string()
    } else if let Some(int) = number.as_u64() {
        int.to_string()
    } else if let Some(float) = number.as_f64() {
        float.to_string()
    } else {
        number.to_string()
    }
}
