//! Dynamically typed values and the hashable keys derived from them.
//!
//! The containers in this crate emulate a host language whose values carry
//! their type at runtime. [`Value`] models that universe: five primitive
//! shapes plus the composite `List`/`Object` shapes. [`Key`] is the subset of
//! `Value` that may be used as a container key.
//!
//! Key identity is the pair (type tag, string representation). This is what
//! keeps the number `1` and the string `"1"` apart even though both render as
//! `"1"`: they live in different buckets. NaN gets a tag of its own because it
//! compares unequal to everything including itself, which would otherwise make
//! it unusable as a key.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::Error;

/// A runtime-typed value, as the emulated host language sees it.
///
/// Any `Value` can be stored; only non-composite values can be keys.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Num(f64),
    Str(String),
    Null,
    Undefined,
    List(Vec<Value>),
    Object(Vec<(String, Value)>),
}

/// Classification bucket for a value used as a key.
///
/// The six non-`Composite` tags partition key storage; `Composite` marks
/// values that are not hashable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyTag {
    Bool,
    Num,
    Str,
    Nan,
    Null,
    Undefined,
    Composite,
}

/// Classifies a value into its key bucket. Deterministic and total.
///
/// NaN is pulled out of the number bucket into its own tag, and `Null` /
/// `Undefined` are distinct from each other and from the strings `"null"` /
/// `"undefined"`.
pub fn classify(value: &Value) -> KeyTag {
    match value {
        Value::Bool(_) => KeyTag::Bool,
        Value::Num(n) if n.is_nan() => KeyTag::Nan,
        Value::Num(_) => KeyTag::Num,
        Value::Str(_) => KeyTag::Str,
        Value::Null => KeyTag::Null,
        Value::Undefined => KeyTag::Undefined,
        Value::List(_) | Value::Object(_) => KeyTag::Composite,
    }
}

impl Value {
    /// Whether this value may be used as a container key.
    pub fn is_hashable(&self) -> bool {
        classify(self) != KeyTag::Composite
    }
}

/// A hashable container key.
///
/// `Num` never holds NaN; converting a NaN number yields [`Key::Nan`]. Prefer
/// [`Key::num`] or a `Value` conversion over constructing `Num` directly so
/// that normalization is preserved.
#[derive(Debug, Clone)]
pub enum Key {
    Bool(bool),
    Num(f64),
    Str(String),
    Nan,
    Null,
    Undefined,
}

impl Key {
    /// Builds a number key, normalizing NaN to [`Key::Nan`].
    pub fn num(n: f64) -> Self {
        if n.is_nan() {
            Key::Nan
        } else {
            Key::Num(n)
        }
    }

    pub fn tag(&self) -> KeyTag {
        match self {
            Key::Bool(_) => KeyTag::Bool,
            Key::Num(_) => KeyTag::Num,
            Key::Str(_) => KeyTag::Str,
            Key::Nan => KeyTag::Nan,
            Key::Null => KeyTag::Null,
            Key::Undefined => KeyTag::Undefined,
        }
    }

    /// The string representation used for bucket storage and key identity.
    pub fn repr(&self) -> Cow<'_, str> {
        match self {
            Key::Bool(true) => Cow::Borrowed("true"),
            Key::Bool(false) => Cow::Borrowed("false"),
            Key::Num(n) => Cow::Owned(num_repr(*n)),
            Key::Str(s) => Cow::Borrowed(s),
            Key::Nan => Cow::Borrowed("NaN"),
            Key::Null => Cow::Borrowed("null"),
            Key::Undefined => Cow::Borrowed("undefined"),
        }
    }

    pub fn to_value(&self) -> Value {
        Value::from(self.clone())
    }
}

/// Shortest round-trip representation, with negative zero folded into `"0"`
/// so that `-0` and `0` are a single key.
pub(crate) fn num_repr(n: f64) -> String {
    debug_assert!(!n.is_nan());
    if n == 0.0 {
        "0".to_string()
    } else {
        format!("{n}")
    }
}

// Identity is (tag, repr), never raw f64 comparison: Nan == Nan holds by tag,
// and Num(-0.0) == Num(0.0) holds by repr.
impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.tag() == other.tag() && self.repr() == other.repr()
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag().hash(state);
        self.repr().hash(state);
    }
}

impl TryFrom<Value> for Key {
    type Error = Error;

    /// The hashability check: composite values are rejected with
    /// [`Error::KeyNotHashable`], carrying the offending value.
    fn try_from(value: Value) -> Result<Self, Error> {
        match classify(&value) {
            KeyTag::Composite => Err(Error::KeyNotHashable(value)),
            KeyTag::Nan => Ok(Key::Nan),
            _ => Ok(match value {
                Value::Bool(b) => Key::Bool(b),
                Value::Num(n) => Key::Num(n),
                Value::Str(s) => Key::Str(s),
                Value::Null => Key::Null,
                Value::Undefined => Key::Undefined,
                Value::List(_) | Value::Object(_) => unreachable!("composite handled above"),
            }),
        }
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Bool(b) => Value::Bool(b),
            Key::Num(n) => Value::Num(n),
            Key::Str(s) => Value::Str(s),
            Key::Nan => Value::Num(f64::NAN),
            Key::Null => Value::Null,
            Key::Undefined => Value::Undefined,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Num(f64::from(n))
    }
}

macro_rules! impl_value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Num(n as f64)
            }
        })*
    };
}

impl_value_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(c.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Num(n) if n.is_nan() => f.write_str("NaN"),
            Value::Num(n) => f.write_str(&num_repr(*n)),
            Value::Str(s) => f.write_str(s),
            Value::Null => f.write_str("null"),
            Value::Undefined => f.write_str("undefined"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
