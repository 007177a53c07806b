//! Cache Module
//!
//! Typed facade for storing values under generated keys.

mod facade;
mod value;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use facade::Cache;
pub use value::{to_float, to_int, to_text, Key, Value};
