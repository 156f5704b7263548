//! # safeval-core — Safe Accessors for Loosely-Typed Values
//!
//! Coerces loosely-typed, possibly missing or null values into well-typed
//! primitives and containers, so downstream code can stay branch-free.
//!
//! ## Key Design Principles
//!
//! 1. **Coercions never fail.** Invalid input is absorbed by substituting a
//!    fallback (`safe_num`, `safe_int`, `safe_str`) or a shared empty
//!    placeholder (`safe_array`, `safe_obj`). NaN is never a valid numeric
//!    output.
//!
//! 2. **One loose value model.** Every accessor takes a [`Value`], which
//!    separates a missing value (`Undefined`) from an explicit `Null` and a
//!    plain mapping (`Object`) from a named record kind (`Record`).
//!
//! 3. **Frozen shared placeholders.** The empty sequence and empty mapping
//!    are `static` items handed out by shared reference, never mutated.
//!
//! 4. **Misuse is the only error.** A strict dictionary lookup without a
//!    default returns [`SafeError::MissingDefault`]; nothing else in the
//!    coercion path produces an error.
//!
//! ## Crate Policy
//!
//! - No I/O, no global mutable state.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod container;
pub mod dict;
pub mod error;
pub mod scalar;
pub mod temporal;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use config::Fallbacks;
pub use container::{
    empty_primitives, is_object, safe_array, safe_obj, EmptyPrimitives, EMPTY_ARRAY,
    EMPTY_OBJECT,
};
pub use dict::{safe_dict, DictOptions, Dictionary, Lookup, SafeDict};
pub use error::SafeError;
pub use scalar::{is_number_like, num_or, safe_int, safe_num, safe_str, serial_no, NumOr};
pub use temporal::Timestamp;
pub use value::{Map, Record, Value};
