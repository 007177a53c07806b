//! Value Module
//!
//! Stored value kinds, generated keys, and conversions back from raw bytes.

use std::fmt;

use uuid::Uuid;

use crate::error::{CacheError, Result};

// == Key ==
/// Opaque key issued by [`Cache::store`](crate::cache::Cache::store).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(String);

impl Key {
    /// Generates a fresh random (v4 UUID) key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// == Value ==
/// A value accepted by the cache.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
}

impl Value {
    /// Encodes the value as stored: UTF-8 text, raw bytes, or decimal text for
    /// numbers.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Value::Text(text) => text.as_bytes().to_vec(),
            Value::Bytes(bytes) => bytes.clone(),
            Value::Int(n) => n.to_string().into_bytes(),
            Value::Float(x) => x.to_string().into_bytes(),
        }
    }

    /// Literal-style representation used in call history.
    pub fn repr(&self) -> String {
        match self {
            Value::Text(text) => format!("{:?}", text),
            Value::Bytes(bytes) => format!("b\"{}\"", bytes.escape_ascii()),
            Value::Int(n) => n.to_string(),
            Value::Float(x) => format!("{:?}", x),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(bytes: &[u8; N]) -> Self {
        Value::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

// == Conversions ==
/// Decodes raw bytes as UTF-8 text.
pub fn to_text(raw: Vec<u8>) -> Result<String> {
    String::from_utf8(raw).map_err(|e| CacheError::Conversion(e.to_string()))
}

/// Parses raw bytes as a base-10 integer.
pub fn to_int(raw: Vec<u8>) -> Result<i64> {
    let text = to_text(raw)?;
    text.parse()
        .map_err(|e| CacheError::Conversion(format!("'{}' is not an integer: {}", text, e)))
}

/// Parses raw bytes as a float.
pub fn to_float(raw: Vec<u8>) -> Result<f64> {
    let text = to_text(raw)?;
    text.parse()
        .map_err(|e| CacheError::Conversion(format!("'{}' is not a float: {}", text, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_distinct() {
        let a = Key::generate();
        let b = Key::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_to_bytes() {
        assert_eq!(Value::from("foo").to_bytes(), b"foo");
        assert_eq!(Value::from(b"\x00\xff").to_bytes(), vec![0x00, 0xff]);
        assert_eq!(Value::from(-123).to_bytes(), b"-123");
        assert_eq!(Value::from(3.5).to_bytes(), b"3.5");
    }

    #[test]
    fn test_repr() {
        assert_eq!(Value::from("foo").repr(), "\"foo\"");
        assert_eq!(Value::from(b"hi\n").repr(), "b\"hi\\n\"");
        assert_eq!(Value::from(42).repr(), "42");
        assert_eq!(Value::from(1.0).repr(), "1.0");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(to_text(b"hello".to_vec()).unwrap(), "hello");
        assert_eq!(to_int(b"-17".to_vec()).unwrap(), -17);
        assert_eq!(to_float(b"2.25".to_vec()).unwrap(), 2.25);
    }

    #[test]
    fn test_conversion_errors() {
        assert!(matches!(
            to_int(b"abc".to_vec()),
            Err(CacheError::Conversion(_))
        ));
        assert!(matches!(
            to_float(b"1.2.3".to_vec()),
            Err(CacheError::Conversion(_))
        ));
        assert!(matches!(
            to_text(vec![0xff, 0xfe]),
            Err(CacheError::Conversion(_))
        ));
    }

    #[test]
    fn test_float_round_trip_through_text() {
        for x in [0.1, 1.0, -2.5e-10, 1e300] {
            assert_eq!(to_float(Value::from(x).to_bytes()).unwrap(), x);
        }
    }
}
