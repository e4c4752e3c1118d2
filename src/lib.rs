//! Containers with dynamically typed keys, modeled on a host language where a
//! key can be a number, string, boolean, NaN, null, or undefined, and where
//! the number `1` and the string `"1"` are different keys.
//!
//! - [`Dict`]: the base map. Key identity is (type tag, string
//!   representation); composite values are rejected as unhashable.
//! - [`DefaultDict`]: a dict whose lookup misses vivify a factory default.
//! - [`Counter`]: a multiset of signed occurrence counts.
//! - [`OrderedDict`]: a dict that iterates in insertion order.
//!
//! ```
//! use pycollections::{Dict, Value};
//!
//! let mut d = Dict::new();
//! d.set(1, "number one")?;
//! d.set("1", "string one")?;
//! d.set(true, "boolean")?;
//! assert_eq!(*d.get(1)?, "number one");
//! assert_eq!(*d.get("1")?, "string one");
//! assert_eq!(d.len(), 3);
//!
//! // Composite values cannot be keys.
//! assert!(d.set(Value::List(vec![]), "nope").is_err());
//! # Ok::<(), pycollections::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod counter;
pub mod default_dict;
pub mod dict;
pub mod error;
pub mod key;
pub mod ordered_dict;

pub use counter::Counter;
pub use default_dict::DefaultDict;
pub use dict::Dict;
pub use error::{Error, Result};
pub use key::{classify, Key, KeyTag, Value};
pub use ordered_dict::OrderedDict;

#[cfg(test)]
mod proptests;
