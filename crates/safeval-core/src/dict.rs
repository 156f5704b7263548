//! # Typed Dictionary Lookup
//!
//! [`SafeDict`] is a short-lived view over a caller's mapping and an
//! optional default value. It offers two accessors:
//!
//! - [`SafeDict::get`] never fails. A missing key, an absent entry, or a
//!   mapping entry that holds null all resolve to the default.
//! - [`SafeDict::strict`] insists on a configured default. Without one it
//!   returns [`SafeError::MissingDefault`] for every key, since calling it
//!   that way is a programming mistake rather than a data condition.
//!
//! The view borrows both the mapping and the default and owns nothing.
//! The mapping is abstracted by [`Dictionary`], implemented for the std
//! hash and B-tree maps and for [`Map`].

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use tracing::debug;

use crate::error::SafeError;
use crate::value::{Map, Value};

/// A mapping that can be queried by a borrowed key.
pub trait Dictionary<Q: ?Sized> {
    type Value;

    /// The entry for `key`, or `None` when there is no usable entry.
    fn lookup(&self, key: &Q) -> Option<&Self::Value>;

    /// Whether a value stands for "nothing" in this mapping. A default
    /// that is absent counts as no default at all.
    fn is_absent(_value: &Self::Value) -> bool {
        false
    }
}

impl<K, V, Q, S> Dictionary<Q> for HashMap<K, V, S>
where
    K: Borrow<Q> + Hash + Eq,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Value = V;

    fn lookup(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }
}

impl<K, V, Q> Dictionary<Q> for BTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Value = V;

    fn lookup(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }
}

/// Entries holding `Null` or `Undefined` count as absent.
impl Dictionary<str> for Map {
    type Value = Value;

    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| !v.is_nullish())
    }

    fn is_absent(value: &Value) -> bool {
        value.is_nullish()
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The mapping held a value for the key.
    Found(T),
    /// The configured default stood in.
    Default(T),
}

impl<T> Lookup<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Found(v) | Self::Default(v) => v,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }
}

/// Construction options for [`safe_dict`].
#[derive(Debug)]
pub struct DictOptions<'a, M: ?Sized, V> {
    pub map: &'a M,
    pub default: Option<&'a V>,
}

// Copy regardless of `M` and `V`.
impl<M: ?Sized, V> Clone for DictOptions<'_, M, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized, V> Copy for DictOptions<'_, M, V> {}

/// A borrowed mapping plus an optional default.
#[derive(Debug)]
pub struct SafeDict<'a, M: ?Sized, V> {
    map: &'a M,
    default: Option<&'a V>,
}

impl<M: ?Sized, V> Clone for SafeDict<'_, M, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized, V> Copy for SafeDict<'_, M, V> {}

/// Build a [`SafeDict`] from its options.
pub fn safe_dict<M: ?Sized, V>(options: DictOptions<'_, M, V>) -> SafeDict<'_, M, V> {
    SafeDict::new(options.map, options.default)
}

impl<'a, M: ?Sized, V> SafeDict<'a, M, V> {
    pub fn new(map: &'a M, default: Option<&'a V>) -> Self {
        Self { map, default }
    }

    /// The default as given at construction, if any.
    pub fn default_value(&self) -> Option<&'a V> {
        self.default
    }

    /// The default, unless the mapping considers it absent.
    fn usable_default<Q: ?Sized>(&self) -> Option<&'a V>
    where
        M: Dictionary<Q, Value = V>,
    {
        self.default.filter(|d| !<M as Dictionary<Q>>::is_absent(d))
    }

    /// The value for `key`, falling back to the default.
    ///
    /// A `None` key resolves to the default without consulting the mapping.
    /// Returns `None` only when the key has no usable entry and no default
    /// was configured.
    pub fn get<Q: ?Sized>(&self, key: Option<&Q>) -> Option<&'a V>
    where
        M: Dictionary<Q, Value = V>,
    {
        self.resolve(key).map(Lookup::into_inner)
    }

    /// Like [`get`](Self::get), but reports whether the mapping or the
    /// default supplied the value.
    pub fn resolve<Q: ?Sized>(&self, key: Option<&Q>) -> Option<Lookup<&'a V>>
    where
        M: Dictionary<Q, Value = V>,
    {
        let map: &'a M = self.map;
        key.and_then(|k| map.lookup(k))
            .map(Lookup::Found)
            .or_else(|| self.usable_default::<Q>().map(Lookup::Default))
    }

    /// The value for `key`, requiring that a default was configured.
    ///
    /// # Errors
    ///
    /// Returns [`SafeError::MissingDefault`] when the dictionary has no
    /// default, or only a null one, whatever the key.
    pub fn strict<Q: ?Sized>(&self, key: Option<&Q>) -> Result<&'a V, SafeError>
    where
        M: Dictionary<Q, Value = V>,
    {
        if self.usable_default::<Q>().is_none() {
            debug!("strict lookup on a dictionary without a default");
            return Err(SafeError::MissingDefault);
        }
        self.get(key).ok_or(SafeError::MissingDefault)
    }
}
