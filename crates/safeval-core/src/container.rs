//! # Container Guards
//!
//! Guarantees a value usable as an ordered sequence or a plain keyed
//! mapping. A value of the right shape is handed back unchanged; anything
//! else gets a shared, immutable empty placeholder.
//!
//! ## Invariant
//!
//! The placeholders are `static` items. They are created once, never
//! mutated, and the same instance is returned to every caller, so callers
//! only ever see them through shared references.

use once_cell::sync::Lazy;
use tracing::trace;

use crate::value::{Map, Value};

/// The shared empty sequence.
pub static EMPTY_ARRAY: [Value; 0] = [];

/// The shared empty mapping returned by [`safe_obj`].
pub static EMPTY_OBJECT: Map = Map::new();

/// Marker key carried by [`EmptyPrimitives::object`].
pub const EMPTY_MARKER_KEY: &str = "__proto_";

/// The frozen set of empty placeholders.
///
/// `object` keeps a descriptive marker entry
/// (`__proto_` → `{ "type": "EmptyObject" }`), so it is *not* key-empty.
/// [`safe_obj`] does not hand it out; it returns [`EMPTY_OBJECT`].
#[derive(Debug)]
pub struct EmptyPrimitives {
    pub array: &'static [Value],
    pub object: Map,
}

static EMPTY_PRIMITIVES: Lazy<EmptyPrimitives> = Lazy::new(|| {
    let marker: Map = [("type", "EmptyObject")].into_iter().collect();
    let mut object = Map::new();
    object.insert(EMPTY_MARKER_KEY, marker);
    EmptyPrimitives {
        array: &EMPTY_ARRAY,
        object,
    }
});

/// The process-wide placeholder set.
pub fn empty_primitives() -> &'static EmptyPrimitives {
    &EMPTY_PRIMITIVES
}

/// Sequence guard: the elements of an `Array`, otherwise the shared empty
/// sequence.
pub fn safe_array(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items.as_slice(),
        other => {
            trace!(kind = other.kind(), "sequence guard substituted empty array");
            &EMPTY_ARRAY[..]
        }
    }
}

/// Mapping guard: the mapping of a plain `Object`, otherwise the shared
/// empty mapping.
///
/// The check is by kind, not by shape. A [`Value::Record`] with the same
/// fields as an accepted object is still rejected.
pub fn safe_obj(value: &Value) -> &Map {
    match value {
        Value::Object(map) => map,
        other => {
            trace!(kind = other.kind(), "mapping guard substituted empty object");
            &EMPTY_OBJECT
        }
    }
}

/// Plain-mapping predicate: true only for [`Value::Object`].
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}
