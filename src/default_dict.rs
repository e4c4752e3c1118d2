//! Auto-vivifying dict: a lookup miss computes, stores, and returns a default.

use std::fmt;
use std::rc::Rc;

use crate::dict::Dict;
use crate::error::{Error, Result};
use crate::key::{Key, Value};

/// A [`Dict`] with a default-value factory.
///
/// A strict [`get`](DefaultDict::get) that misses invokes the factory, stores
/// the result, and returns it — an observable mutation caused by a read. The
/// non-vivifying fallback form is [`get_opt`](DefaultDict::get_opt).
///
/// The factory is held behind `Rc`, so clones share it, and a factory may
/// close over a shared handle to the very container being built (chained
/// auto-vivification).
pub struct DefaultDict<V> {
    dict: Dict<V>,
    factory: Rc<dyn Fn() -> V>,
}

impl<V> DefaultDict<V> {
    pub fn new(factory: impl Fn() -> V + 'static) -> Self {
        Self {
            dict: Dict::new(),
            factory: Rc::new(factory),
        }
    }

    pub fn try_from_pairs<K, I>(factory: impl Fn() -> V + 'static, pairs: I) -> Result<Self>
    where
        K: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut dict = Self::new(factory);
        dict.update_pairs(pairs)?;
        Ok(dict)
    }

    pub fn from_entries<S, I>(factory: impl Fn() -> V + 'static, entries: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, V)>,
    {
        let mut dict = Self::new(factory);
        dict.update_entries(entries);
        dict
    }

    pub fn from_dict(factory: impl Fn() -> V + 'static, dict: Dict<V>) -> Self {
        Self {
            dict,
            factory: Rc::new(factory),
        }
    }

    /// Vivifying lookup: a miss stores `factory()` under the key and returns
    /// a reference to the stored value.
    pub fn get(&mut self, key: impl Into<Value>) -> Result<&V> {
        let key = Key::try_from(key.into())?;
        self.ensure(&key);
        Ok(self
            .dict
            .get_key(&key)
            .expect("entry exists after vivification"))
    }

    /// Fallback lookup that bypasses vivification entirely: a miss is
    /// `Ok(None)` and nothing is stored.
    pub fn get_opt(&self, key: impl Into<Value>) -> Result<Option<&V>> {
        self.dict.get_opt(key)
    }

    /// Read-modify-write that vivifies: a missing key is first given the
    /// factory default, then `f` runs on it.
    pub fn adjust(&mut self, key: impl Into<Value>, f: impl FnOnce(&V) -> V) -> Result<()> {
        let key = Key::try_from(key.into())?;
        self.ensure(&key);
        let current = self.dict.get_key(&key).expect("entry exists after vivification");
        let next = f(current);
        self.dict.insert_key(key, next);
        Ok(())
    }

    /// [`adjust`](DefaultDict::adjust) applied to each key in turn.
    pub fn adjust_each<K, I, F>(&mut self, keys: I, mut f: F) -> Result<()>
    where
        K: Into<Value>,
        I: IntoIterator<Item = K>,
        F: FnMut(&Key, &V) -> V,
    {
        for key in keys {
            let key = Key::try_from(key.into())?;
            self.ensure(&key);
            let current = self.dict.get_key(&key).expect("entry exists after vivification");
            let next = f(&key, current);
            self.dict.insert_key(key, next);
        }
        Ok(())
    }

    fn ensure(&mut self, key: &Key) {
        if !self.dict.has_key(key) {
            let value = (self.factory)();
            self.dict.insert_key(key.clone(), value);
        }
    }

    // === Forwarded Dict surface ===

    pub fn set(&mut self, key: impl Into<Value>, value: V) -> Result<Option<V>> {
        self.dict.set(key, value)
    }

    pub fn contains_key(&self, key: impl Into<Value>) -> Result<bool> {
        self.dict.contains_key(key)
    }

    pub fn remove(&mut self, key: impl Into<Value>) -> Result<V> {
        self.dict.remove(key)
    }

    pub fn remove_opt(&mut self, key: impl Into<Value>) -> Result<Option<V>> {
        self.dict.remove_opt(key)
    }

    pub fn pop_first(&mut self) -> Result<(Key, V)> {
        self.dict.pop_first()
    }

    pub fn len(&self) -> usize {
        self.dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    pub fn clear(&mut self) {
        self.dict.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Key, &V)> + '_ {
        self.dict.iter()
    }

    pub fn keys(&self) -> Vec<Key> {
        self.dict.keys()
    }

    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.dict.values()
    }

    pub fn items(&self) -> Vec<(Key, V)>
    where
        V: Clone,
    {
        self.dict.items()
    }

    pub fn first_key(&self) -> Result<Key> {
        self.dict.first_key()
    }

    pub fn first_matching_key(&self, pred: impl FnMut(&Key) -> bool) -> Result<Key> {
        self.dict.first_matching_key(pred)
    }

    pub fn update_pairs<K, I>(&mut self, pairs: I) -> Result<()>
    where
        K: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.dict.update_pairs(pairs)
    }

    pub fn update_entries<S, I>(&mut self, entries: I)
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, V)>,
    {
        self.dict.update_entries(entries);
    }

    pub fn update_dict(&mut self, other: &Dict<V>)
    where
        V: Clone,
    {
        self.dict.update_dict(other);
    }

    /// The underlying plain dict.
    pub fn as_dict(&self) -> &Dict<V> {
        &self.dict
    }
}

// Clone preserves the factory (shared, not duplicated).
impl<V: Clone> Clone for DefaultDict<V> {
    fn clone(&self) -> Self {
        Self {
            dict: self.dict.clone(),
            factory: Rc::clone(&self.factory),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for DefaultDict<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for DefaultDict<V> {
    fn eq(&self, other: &Self) -> bool {
        self.dict == other.dict
    }
}
