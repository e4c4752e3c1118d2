//! Multiset: a dict from hashable keys to signed occurrence counts.

use std::fmt;

use crate::default_dict::DefaultDict;
use crate::dict::Dict;
use crate::error::Result;
use crate::key::{Key, Value};

/// A counting container backed by a zero-defaulting [`DefaultDict`].
///
/// Counts are signed: subtracting below zero is allowed and preserved, but a
/// key with a non-positive count contributes nothing to
/// [`elements`](Counter::elements).
///
/// ```
/// use pycollections::Counter;
///
/// let c = Counter::from_elements("aacabb".chars()).unwrap();
/// assert_eq!(c.count('a').unwrap(), 3);
/// assert_eq!(c.count('b').unwrap(), 2);
/// assert_eq!(c.count('c').unwrap(), 1);
/// assert_eq!(c.most_common(Some(2)).len(), 2);
/// ```
///
/// There is deliberately no `from_keys` on `Counter`: filling a counter with
/// one uniform value is meaningless.
#[derive(Clone)]
pub struct Counter {
    counts: DefaultDict<i64>,
}

impl Counter {
    pub fn new() -> Self {
        Self {
            counts: DefaultDict::new(|| 0),
        }
    }

    /// Seeds initial counts verbatim (not as increments). Negative counts are
    /// allowed.
    pub fn from_counts<K, I>(pairs: I) -> Result<Self>
    where
        K: Into<Value>,
        I: IntoIterator<Item = (K, i64)>,
    {
        let mut counter = Self::new();
        for (key, count) in pairs {
            counter.counts.set(key, count)?;
        }
        Ok(counter)
    }

    /// Seeds verbatim counts from a plain string-keyed structure.
    pub fn from_entries<S, I>(entries: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, i64)>,
    {
        let mut counter = Self::new();
        counter.counts.update_entries(entries);
        counter
    }

    /// Counts occurrences: every element of the sequence increments its key
    /// by one.
    pub fn from_elements<K, I>(elements: I) -> Result<Self>
    where
        K: Into<Value>,
        I: IntoIterator<Item = K>,
    {
        let mut counter = Self::new();
        counter.update_elements(elements)?;
        Ok(counter)
    }

    /// Non-vivifying count read: missing keys read as zero and nothing is
    /// stored.
    pub fn count(&self, key: impl Into<Value>) -> Result<i64> {
        Ok(self.counts.get_opt(key)?.copied().unwrap_or(0))
    }

    /// Vivifying count read: a missing key is stored with count zero, which
    /// then shows up in `len`/`iter`.
    pub fn get(&mut self, key: impl Into<Value>) -> Result<i64> {
        Ok(*self.counts.get(key)?)
    }

    /// Sets a count verbatim. Returns the previous count, if any.
    pub fn set(&mut self, key: impl Into<Value>, count: i64) -> Result<Option<i64>> {
        self.counts.set(key, count)
    }

    /// Increments each key's count by the corresponding source value.
    pub fn update_counts<K, I>(&mut self, pairs: I) -> Result<()>
    where
        K: Into<Value>,
        I: IntoIterator<Item = (K, i64)>,
    {
        for (key, delta) in pairs {
            self.counts.adjust(key, |count| count + delta)?;
        }
        Ok(())
    }

    /// Increments from a plain string-keyed structure.
    pub fn update_entries<S, I>(&mut self, entries: I)
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, i64)>,
    {
        for (key, delta) in entries {
            self.counts
                .adjust(key.into(), |count| count + delta)
                .expect("string keys are always hashable");
        }
    }

    /// Increments each element's count by one (counts occurrences).
    pub fn update_elements<K, I>(&mut self, elements: I) -> Result<()>
    where
        K: Into<Value>,
        I: IntoIterator<Item = K>,
    {
        self.counts.adjust_each(elements, |_, count| count + 1)
    }

    /// Decrements each key's count by the corresponding source value.
    pub fn subtract_counts<K, I>(&mut self, pairs: I) -> Result<()>
    where
        K: Into<Value>,
        I: IntoIterator<Item = (K, i64)>,
    {
        for (key, delta) in pairs {
            self.counts.adjust(key, |count| count - delta)?;
        }
        Ok(())
    }

    /// Decrements from a plain string-keyed structure.
    pub fn subtract_entries<S, I>(&mut self, entries: I)
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, i64)>,
    {
        for (key, delta) in entries {
            self.counts
                .adjust(key.into(), |count| count - delta)
                .expect("string keys are always hashable");
        }
    }

    /// Decrements each element's count by one.
    pub fn subtract_elements<K, I>(&mut self, elements: I) -> Result<()>
    where
        K: Into<Value>,
        I: IntoIterator<Item = K>,
    {
        self.counts.adjust_each(elements, |_, count| count - 1)
    }

    /// Every key repeated `count` times, in iteration order. Non-positive
    /// counts contribute nothing (clamped, not a negative repeat).
    pub fn elements(&self) -> Vec<Key> {
        let mut out = Vec::new();
        for (key, &count) in self.iter() {
            for _ in 0..count.max(0) {
                out.push(key.clone());
            }
        }
        out
    }

    /// `(key, count)` pairs sorted by descending count; ties keep their
    /// iteration order (stable sort). `n` truncates; `None` returns all.
    pub fn most_common(&self, n: Option<usize>) -> Vec<(Key, i64)> {
        let mut items = self.items();
        items.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(n) = n {
            items.truncate(n);
        }
        items
    }

    /// Like [`most_common`](Counter::most_common) but ascending.
    pub fn least_common(&self, n: Option<usize>) -> Vec<(Key, i64)> {
        let mut items = self.items();
        items.sort_by(|a, b| a.1.cmp(&b.1));
        if let Some(n) = n {
            items.truncate(n);
        }
        items
    }

    // === Forwarded surface ===

    pub fn contains_key(&self, key: impl Into<Value>) -> Result<bool> {
        self.counts.contains_key(key)
    }

    pub fn remove(&mut self, key: impl Into<Value>) -> Result<i64> {
        self.counts.remove(key)
    }

    pub fn remove_opt(&mut self, key: impl Into<Value>) -> Result<Option<i64>> {
        self.counts.remove_opt(key)
    }

    pub fn pop_first(&mut self) -> Result<(Key, i64)> {
        self.counts.pop_first()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Key, &i64)> + '_ {
        self.counts.iter()
    }

    pub fn keys(&self) -> Vec<Key> {
        self.counts.keys()
    }

    pub fn values(&self) -> Vec<i64> {
        self.counts.values()
    }

    pub fn items(&self) -> Vec<(Key, i64)> {
        self.counts.items()
    }

    pub fn first_key(&self) -> Result<Key> {
        self.counts.first_key()
    }

    pub fn first_matching_key(&self, pred: impl FnMut(&Key) -> bool) -> Result<Key> {
        self.counts.first_matching_key(pred)
    }

    pub fn as_dict(&self) -> &Dict<i64> {
        self.counts.as_dict()
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl PartialEq for Counter {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}
