//! Insertion-ordered dict: iteration replays the order keys first appeared.

use std::fmt;

use crate::dict::Dict;
use crate::error::{Error, Result};
use crate::key::{Key, Value};

/// A [`Dict`] that remembers insertion order.
///
/// Setting an existing key replaces its value in place; the key keeps its
/// original position. Removing a key closes the gap, so surviving keys stay
/// contiguous and later insertions append at the end.
///
/// Order is tracked with a key vector plus a reverse index dict, so removal is
/// O(n) in the number of later keys but every lookup stays O(1).
#[derive(Clone)]
pub struct OrderedDict<V> {
    dict: Dict<V>,
    // order[i] holds the i-th inserted surviving key; indices maps each key
    // back to its slot. Both are updated together.
    order: Vec<Key>,
    indices: Dict<usize>,
}

impl<V> OrderedDict<V> {
    pub fn new() -> Self {
        Self {
            dict: Dict::new(),
            order: Vec::new(),
            indices: Dict::new(),
        }
    }

    pub fn try_from_pairs<K, I>(pairs: I) -> Result<Self>
    where
        K: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut dict = Self::new();
        dict.update_pairs(pairs)?;
        Ok(dict)
    }

    pub fn from_entries<S, I>(entries: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, V)>,
    {
        let mut dict = Self::new();
        dict.update_entries(entries);
        dict
    }

    /// Every key mapped to a clone of the same value, ordered as given.
    pub fn from_keys<K, I>(keys: I, value: V) -> Result<Self>
    where
        K: Into<Value>,
        I: IntoIterator<Item = K>,
        V: Clone,
    {
        let mut dict = Self::new();
        for key in keys {
            dict.set(key, value.clone())?;
        }
        Ok(dict)
    }

    /// Inserts or replaces. A new key appends to the order; an existing key
    /// keeps its position. Returns the previous value, if any.
    pub fn set(&mut self, key: impl Into<Value>, value: V) -> Result<Option<V>> {
        let key = Key::try_from(key.into())?;
        Ok(self.set_key(key, value))
    }

    pub fn get(&self, key: impl Into<Value>) -> Result<&V> {
        self.dict.get(key)
    }

    pub fn get_opt(&self, key: impl Into<Value>) -> Result<Option<&V>> {
        self.dict.get_opt(key)
    }

    pub fn contains_key(&self, key: impl Into<Value>) -> Result<bool> {
        self.dict.contains_key(key)
    }

    /// Strict removal. Later keys shift down one slot to keep the order
    /// contiguous.
    pub fn remove(&mut self, key: impl Into<Value>) -> Result<V> {
        let key = Key::try_from(key.into())?;
        self.remove_key(&key).ok_or_else(|| Error::not_found(key))
    }

    pub fn remove_opt(&mut self, key: impl Into<Value>) -> Result<Option<V>> {
        let key = Key::try_from(key.into())?;
        Ok(self.remove_key(&key))
    }

    /// Removes and returns the oldest entry.
    pub fn pop_first(&mut self) -> Result<(Key, V)> {
        let key = self.order.first().cloned().ok_or_else(Error::empty)?;
        let value = self
            .remove_key(&key)
            .expect("ordered key present in buckets");
        Ok((key, value))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.dict.clear();
        self.order.clear();
        self.indices.clear();
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, &V)> + '_ {
        self.order.iter().map(|key| {
            (
                key.clone(),
                self.dict
                    .get_key(key)
                    .expect("ordered key present in buckets"),
            )
        })
    }

    pub fn keys(&self) -> Vec<Key> {
        self.order.clone()
    }

    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn items(&self) -> Vec<(Key, V)>
    where
        V: Clone,
    {
        self.iter().map(|(k, v)| (k, v.clone())).collect()
    }

    /// The oldest key. Fails key-less when empty.
    pub fn first_key(&self) -> Result<Key> {
        self.order.first().cloned().ok_or_else(Error::empty)
    }

    /// The oldest key satisfying `pred`; a total miss fails key-less.
    pub fn first_matching_key(&self, mut pred: impl FnMut(&Key) -> bool) -> Result<Key> {
        self.order
            .iter()
            .find(|k| pred(k))
            .cloned()
            .ok_or_else(Error::empty)
    }

    /// Strict read-modify-write. The key already exists, so order is
    /// untouched.
    pub fn adjust(&mut self, key: impl Into<Value>, f: impl FnOnce(&V) -> V) -> Result<()> {
        self.dict.adjust(key, f)
    }

    /// [`adjust`](OrderedDict::adjust) applied to each key in turn.
    pub fn adjust_each<K, I, F>(&mut self, keys: I, f: F) -> Result<()>
    where
        K: Into<Value>,
        I: IntoIterator<Item = K>,
        F: FnMut(&Key, &V) -> V,
    {
        self.dict.adjust_each(keys, f)
    }

    /// Recomputes every stored value, visiting entries in insertion order.
    pub fn adjust_all<F>(&mut self, mut f: F)
    where
        F: FnMut(&Key, &V) -> V,
    {
        let Self { dict, order, .. } = self;
        for key in order.iter() {
            let value = dict
                .get_key_mut(key)
                .expect("ordered key present in buckets");
            *value = f(key, value);
        }
    }

    /// Merges `[key, value]` pairs, last-write-wins; new keys append in the
    /// order encountered.
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
            self.set_key(Key::Str(key.into()), value);
        }
    }

    /// Merges a plain dict's entries, last-write-wins.
    pub fn update_dict(&mut self, other: &Dict<V>)
    where
        V: Clone,
    {
        for (key, value) in other.iter() {
            self.set_key(key, value.clone());
        }
    }

    fn set_key(&mut self, key: Key, value: V) -> Option<V> {
        let previous = self.dict.insert_key(key.clone(), value);
        if previous.is_none() {
            self.indices.insert_key(key.clone(), self.order.len());
            self.order.push(key);
        }
        previous
    }

    fn remove_key(&mut self, key: &Key) -> Option<V> {
        let idx = self.indices.remove_key(key)?;
        self.order.remove(idx);
        // Keys that came after the removed one shift down a slot.
        for later in &self.order[idx..] {
            *self
                .indices
                .get_key_mut(later)
                .expect("ordered key is indexed") -= 1;
        }
        self.dict.remove_key(key)
    }
}

impl<V> Default for OrderedDict<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for OrderedDict<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Equality is order-sensitive, unlike the base dict.
impl<V: PartialEq> PartialEq for OrderedDict<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}
