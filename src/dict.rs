//! The base associative container with typed-key buckets.
//!
//! `Dict` stores entries in one bucket per key tag, each bucket keyed by the
//! key's string representation. That is the whole trick: the number `1` and
//! the string `"1"` share a representation but live in different buckets, so
//! they never collide. The singleton tags (NaN, null, undefined) hold at most
//! one entry each and are stored as options.
//!
//! Iteration order is bucket order: booleans, numbers, strings, NaN, null,
//! undefined. Order within a bucket is unspecified and not stable across
//! mutations.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::key::{num_repr, Key, Value};

/// An associative container keyed by runtime-typed values.
///
/// ```
/// use pycollections::Dict;
///
/// let mut d: Dict<&str> = Dict::new();
/// d.set(1, "number one").unwrap();
/// d.set("1", "string one").unwrap();
/// assert_eq!(d.get(1).unwrap(), &"number one");
/// assert_eq!(d.get("1").unwrap(), &"string one");
/// assert_eq!(d.len(), 2);
/// ```
#[derive(Clone, PartialEq)]
pub struct Dict<V> {
    bools: HashMap<String, V>,
    numbers: HashMap<String, V>,
    strings: HashMap<String, V>,
    nan: Option<V>,
    null: Option<V>,
    undefined: Option<V>,
}

impl<V> Dict<V> {
    pub fn new() -> Self {
        Self {
            bools: HashMap::new(),
            numbers: HashMap::new(),
            strings: HashMap::new(),
            nan: None,
            null: None,
            undefined: None,
        }
    }

    /// Seeds from `[key, value]` pairs. Later duplicates overwrite earlier
    /// ones; fails on the first unhashable key.
    pub fn try_from_pairs<K, I>(pairs: I) -> Result<Self>
    where
        K: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut dict = Self::new();
        dict.update_pairs(pairs)?;
        Ok(dict)
    }

    /// Seeds from a plain string-keyed structure. Infallible: strings are
    /// always hashable.
    pub fn from_entries<S, I>(entries: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, V)>,
    {
        let mut dict = Self::new();
        dict.update_entries(entries);
        dict
    }

    /// Builds a dict mapping every key to a clone of `value`.
    pub fn from_keys<K, I>(keys: I, value: V) -> Result<Self>
    where
        V: Clone,
        K: Into<Value>,
        I: IntoIterator<Item = K>,
    {
        let mut dict = Self::new();
        for key in keys {
            dict.set(key, value.clone())?;
        }
        Ok(dict)
    }

    /// Stores `value` under `key`, silently overwriting. Returns the previous
    /// value, if any.
    pub fn set(&mut self, key: impl Into<Value>, value: V) -> Result<Option<V>> {
        let key = Key::try_from(key.into())?;
        Ok(self.insert_key(key, value))
    }

    /// Strict lookup: fails with [`Error::KeyNotFound`] when absent.
    /// Hashability is validated first, even for keys that turn out missing.
    pub fn get(&self, key: impl Into<Value>) -> Result<&V> {
        let key = Key::try_from(key.into())?;
        self.get_key(&key).ok_or_else(|| Error::not_found(key))
    }

    /// Fallback lookup: `Ok(None)` when absent. The caller supplies the
    /// default via `unwrap_or`.
    pub fn get_opt(&self, key: impl Into<Value>) -> Result<Option<&V>> {
        let key = Key::try_from(key.into())?;
        Ok(self.get_key(&key))
    }

    pub fn contains_key(&self, key: impl Into<Value>) -> Result<bool> {
        let key = Key::try_from(key.into())?;
        Ok(self.has_key(&key))
    }

    /// Strict removal: fails with [`Error::KeyNotFound`] when absent, returns
    /// the removed value otherwise.
    pub fn remove(&mut self, key: impl Into<Value>) -> Result<V> {
        let key = Key::try_from(key.into())?;
        self.remove_key(&key).ok_or_else(|| Error::not_found(key))
    }

    /// Fallback removal: `Ok(None)` when absent.
    pub fn remove_opt(&mut self, key: impl Into<Value>) -> Result<Option<V>> {
        let key = Key::try_from(key.into())?;
        Ok(self.remove_key(&key))
    }

    /// Removes and returns the first `(key, value)` pair per iteration order.
    /// Fails with a key-less [`Error::KeyNotFound`] when empty.
    pub fn pop_first(&mut self) -> Result<(Key, V)> {
        let key = self.first_key()?;
        let value = self.remove_key(&key).expect("first key is present");
        Ok((key, value))
    }

    pub fn len(&self) -> usize {
        self.bools.len()
            + self.numbers.len()
            + self.strings.len()
            + usize::from(self.nan.is_some())
            + usize::from(self.null.is_some())
            + usize::from(self.undefined.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry. Previously returned key/value/item snapshots are
    /// owned copies and stay intact.
    pub fn clear(&mut self) {
        self.bools.clear();
        self.numbers.clear();
        self.strings.clear();
        self.nan = None;
        self.null = None;
        self.undefined = None;
    }

    /// Canonical iteration order: booleans, numbers, strings, NaN, null,
    /// undefined. Keys are re-materialized from bucket storage.
    pub fn iter(&self) -> impl Iterator<Item = (Key, &V)> + '_ {
        self.bools
            .iter()
            .map(|(repr, v)| (Key::Bool(repr.as_str() == "true"), v))
            .chain(self.numbers.iter().map(|(repr, v)| (parse_num_key(repr), v)))
            .chain(self.strings.iter().map(|(s, v)| (Key::Str(s.clone()), v)))
            .chain(self.nan.iter().map(|v| (Key::Nan, v)))
            .chain(self.null.iter().map(|v| (Key::Null, v)))
            .chain(self.undefined.iter().map(|v| (Key::Undefined, v)))
    }

    /// Snapshot of the keys, in iteration order.
    pub fn keys(&self) -> Vec<Key> {
        self.iter().map(|(k, _)| k).collect()
    }

    /// Snapshot of the values, in iteration order.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Snapshot of the `(key, value)` pairs, in iteration order.
    pub fn items(&self) -> Vec<(Key, V)>
    where
        V: Clone,
    {
        self.iter().map(|(k, v)| (k, v.clone())).collect()
    }

    /// First key per iteration order. Fails key-less when empty, because the
    /// first key can itself be the literal `undefined`.
    pub fn first_key(&self) -> Result<Key> {
        self.iter().map(|(k, _)| k).next().ok_or_else(Error::empty)
    }

    /// First key (in iteration order) satisfying `pred`. Short-circuits only
    /// on a match; a total miss visits every entry and fails key-less.
    pub fn first_matching_key(&self, mut pred: impl FnMut(&Key) -> bool) -> Result<Key> {
        self.iter()
            .map(|(k, _)| k)
            .find(|k| pred(k))
            .ok_or_else(Error::empty)
    }

    /// Read-modify-write: replaces the current value with `f(current)`.
    /// Strict on the base dict: a missing key fails with `KeyNotFound`.
    pub fn adjust(&mut self, key: impl Into<Value>, f: impl FnOnce(&V) -> V) -> Result<()> {
        let key = Key::try_from(key.into())?;
        let current = self
            .get_key(&key)
            .ok_or_else(|| Error::not_found(key.clone()))?;
        let next = f(current);
        self.insert_key(key, next);
        Ok(())
    }

    /// [`adjust`](Dict::adjust) applied to each key in turn.
    pub fn adjust_each<K, I, F>(&mut self, keys: I, mut f: F) -> Result<()>
    where
        K: Into<Value>,
        I: IntoIterator<Item = K>,
        F: FnMut(&Key, &V) -> V,
    {
        for key in keys {
            let key = Key::try_from(key.into())?;
            let current = self
                .get_key(&key)
                .ok_or_else(|| Error::not_found(key.clone()))?;
            let next = f(&key, current);
            self.insert_key(key, next);
        }
        Ok(())
    }

    /// Recomputes every stored value in place. Keys are untouched, so
    /// mutation during the walk is safe.
    pub fn adjust_all<F>(&mut self, mut f: F)
    where
        F: FnMut(&Key, &V) -> V,
    {
        for (repr, value) in self.bools.iter_mut() {
            let key = Key::Bool(repr.as_str() == "true");
            *value = f(&key, value);
        }
        for (repr, value) in self.numbers.iter_mut() {
            let key = parse_num_key(repr);
            *value = f(&key, value);
        }
        for (repr, value) in self.strings.iter_mut() {
            let key = Key::Str(repr.clone());
            *value = f(&key, value);
        }
        if let Some(value) = self.nan.as_mut() {
            *value = f(&Key::Nan, value);
        }
        if let Some(value) = self.null.as_mut() {
            *value = f(&Key::Null, value);
        }
        if let Some(value) = self.undefined.as_mut() {
            *value = f(&Key::Undefined, value);
        }
    }

    /// Merges `[key, value]` pairs, last-write-wins.
    pub fn update_pairs<K, I>(&mut self, pairs: I) -> Result<()>
    where
        K: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Merges a plain string-keyed structure.
    pub fn update_entries<S, I>(&mut self, entries: I)
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, V)>,
    {
        for (key, value) in entries {
            self.insert_key(Key::Str(key.into()), value);
        }
    }

    /// Merges another dict's entries, last-write-wins.
    pub fn update_dict(&mut self, other: &Dict<V>)
    where
        V: Clone,
    {
        for (key, value) in other.iter() {
            self.insert_key(key, value.clone());
        }
    }

    // === Key-typed bucket primitives (shared with the derived containers) ===

    pub(crate) fn insert_key(&mut self, key: Key, value: V) -> Option<V> {
        match key {
            Key::Bool(b) => self.bools.insert(bool_repr(b).to_string(), value),
            Key::Num(n) => self.numbers.insert(num_repr(n), value),
            Key::Str(s) => self.strings.insert(s, value),
            Key::Nan => self.nan.replace(value),
            Key::Null => self.null.replace(value),
            Key::Undefined => self.undefined.replace(value),
        }
    }

    pub(crate) fn get_key(&self, key: &Key) -> Option<&V> {
        match key {
            Key::Bool(b) => self.bools.get(bool_repr(*b)),
            Key::Num(n) => self.numbers.get(num_repr(*n).as_str()),
            Key::Str(s) => self.strings.get(s.as_str()),
            Key::Nan => self.nan.as_ref(),
            Key::Null => self.null.as_ref(),
            Key::Undefined => self.undefined.as_ref(),
        }
    }

    pub(crate) fn get_key_mut(&mut self, key: &Key) -> Option<&mut V> {
        match key {
            Key::Bool(b) => self.bools.get_mut(bool_repr(*b)),
            Key::Num(n) => self.numbers.get_mut(num_repr(*n).as_str()),
            Key::Str(s) => self.strings.get_mut(s.as_str()),
            Key::Nan => self.nan.as_mut(),
            Key::Null => self.null.as_mut(),
            Key::Undefined => self.undefined.as_mut(),
        }
    }

    pub(crate) fn remove_key(&mut self, key: &Key) -> Option<V> {
        match key {
            Key::Bool(b) => self.bools.remove(bool_repr(*b)),
            Key::Num(n) => self.numbers.remove(num_repr(*n).as_str()),
            Key::Str(s) => self.strings.remove(s.as_str()),
            Key::Nan => self.nan.take(),
            Key::Null => self.null.take(),
            Key::Undefined => self.undefined.take(),
        }
    }

    pub(crate) fn has_key(&self, key: &Key) -> bool {
        self.get_key(key).is_some()
    }
}

#[inline]
fn bool_repr(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

fn parse_num_key(repr: &str) -> Key {
    let n = repr
        .parse::<f64>()
        .expect("number bucket reprs round-trip through parse");
    Key::Num(n)
}

impl<V> Default for Dict<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for Dict<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
