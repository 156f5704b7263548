//! # Fallback Configuration
//!
//! `Fallbacks` holds the substitute values used when a coercion rejects its
//! input. The defaults are 0 for numbers and integers and the empty string
//! for text. An application can override any subset once, from JSON, and
//! route its coercions through the configured instance.

use serde::{Deserialize, Serialize};

use crate::error::SafeError;
use crate::scalar::{self, NumOr};
use crate::value::Value;

/// Substitute values for the scalar coercions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Fallbacks {
    /// Returned by [`Fallbacks::num`] when conversion yields NaN.
    pub number: f64,
    /// Returned by [`Fallbacks::int`] when no integer can be read.
    pub integer: i64,
    /// Returned by [`Fallbacks::str`] for non-string input.
    pub string: String,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            number: 0.0,
            integer: 0,
            string: String::new(),
        }
    }
}

impl Fallbacks {
    /// Parse a configuration. Omitted fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SafeError::InvalidFallbacks`] for malformed JSON, unknown
    /// fields, or fields of the wrong type.
    pub fn from_json(text: &str) -> Result<Self, SafeError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn num(&self, value: &Value) -> f64 {
        scalar::safe_num(value, self.number)
    }

    pub fn int(&self, value: &Value) -> i64 {
        scalar::safe_int(value, self.integer)
    }

    pub fn str<'a>(&'a self, value: &'a Value) -> &'a str {
        scalar::safe_str(value, &self.string)
    }

    /// [`scalar::num_or`] with the configured number as fallback.
    pub fn num_or(&self, value: &Value) -> NumOr<f64> {
        scalar::num_or(value, self.number)
    }
}
