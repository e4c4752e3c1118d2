//! Failure taxonomy shared by every container.
//!
//! There are exactly two failure kinds, and both are synchronous: the library
//! never retries and never logs. Callers that expect absence should reach for
//! the `_opt` forms of `get`/`remove`, which suppress [`Error::KeyNotFound`].

use thiserror::Error;

use crate::key::{Key, Value};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A composite value (list or object) was used as a key. Carries the
    /// offending value.
    #[error("key is not hashable: {0}")]
    KeyNotHashable(Value),

    /// A strict lookup missed. `key` is `None` when the operation had no key
    /// to begin with (e.g. `first_key` on an empty container), which matters
    /// because a looked-up key can itself be the literal `undefined`.
    #[error("{}", key_not_found_message(.key))]
    KeyNotFound { key: Option<Key> },
}

impl Error {
    pub(crate) fn not_found(key: Key) -> Self {
        Error::KeyNotFound { key: Some(key) }
    }

    pub(crate) fn empty() -> Self {
        Error::KeyNotFound { key: None }
    }
}

fn key_not_found_message(key: &Option<Key>) -> String {
    match key {
        Some(key) => format!("key not found: {key}"),
        None => "key not found: container is empty".to_string(),
    }
}
