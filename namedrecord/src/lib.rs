//! Immutable fixed-shape records with named field access.
//!
//! A [`RecordType`] declares a type name and an ordered field list once; it
//! then builds any number of [`Record`] instances, each an immutable tuple of
//! values addressable by field name or by position.
//!
//! ```
//! use namedrecord::RecordType;
//!
//! let point = RecordType::new("Point", ["x", "y"])?;
//! let p = point.build(vec![3, 4])?;
//! assert_eq!(p.get("x"), Some(&3));
//! assert_eq!(p[1], 4);
//! assert_eq!(p.to_string(), "Point(x=3, y=4)");
//! # Ok::<(), namedrecord::RecordError>(())
//! ```

#![forbid(unsafe_code)]

use std::fmt;
use std::ops::Index;
use std::rc::Rc;

use pycollections::OrderedDict;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// The type name or a field name is not a valid identifier.
    #[error("invalid identifier: {0:?}")]
    InvalidName(String),

    /// The name is a reserved word and cannot be used.
    #[error("reserved identifier: {0:?}")]
    ReservedName(String),

    #[error("duplicate field: {0:?}")]
    DuplicateField(String),

    /// Build was given the wrong number of values for the declared fields.
    #[error("expected {expected} values, got {got}")]
    WrongArity { expected: usize, got: usize },
}

const RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
];

fn validate_ident(name: &str) -> Result<(), RecordError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if !valid {
        return Err(RecordError::InvalidName(name.to_string()));
    }
    if RESERVED.contains(&name) {
        return Err(RecordError::ReservedName(name.to_string()));
    }
    Ok(())
}

struct TypeInfo {
    name: String,
    fields: Vec<String>,
}

/// A record shape: a validated type name plus an ordered field list.
///
/// Cheap to clone; all records built from it share the one shape.
#[derive(Clone)]
pub struct RecordType {
    info: Rc<TypeInfo>,
}

impl RecordType {
    /// Validates the type name and every field name. Field names must be
    /// unique identifiers and none may be reserved.
    pub fn new<S, I>(name: &str, fields: I) -> Result<Self, RecordError>
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        validate_ident(name)?;
        let mut seen: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            validate_ident(&field)?;
            if seen.contains(&field) {
                return Err(RecordError::DuplicateField(field));
            }
            seen.push(field);
        }
        Ok(Self {
            info: Rc::new(TypeInfo {
                name: name.to_string(),
                fields: seen,
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Field names in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.info.fields
    }

    pub fn arity(&self) -> usize {
        self.info.fields.len()
    }

    /// Builds a record. `values` must match the field count exactly, in
    /// declaration order.
    pub fn build<V>(&self, values: Vec<V>) -> Result<Record<V>, RecordError> {
        if values.len() != self.arity() {
            return Err(RecordError::WrongArity {
                expected: self.arity(),
                got: values.len(),
            });
        }
        Ok(Record {
            ty: self.clone(),
            values,
        })
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.info.name)
            .field("fields", &self.info.fields)
            .finish()
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.info.name == other.info.name && self.info.fields == other.info.fields
    }
}

/// An immutable value tuple with named fields. There are no mutators; to
/// change a field, build a new record.
#[derive(Clone)]
pub struct Record<V> {
    ty: RecordType,
    values: Vec<V>,
}

impl<V> Record<V> {
    /// Looks a value up by field name. `None` for unknown fields.
    pub fn get(&self, field: &str) -> Option<&V> {
        let idx = self.ty.fields().iter().position(|f| f == field)?;
        Some(&self.values[idx])
    }

    pub fn fields(&self) -> &[String] {
        self.ty.fields()
    }

    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn into_values(self) -> Vec<V> {
        self.values
    }

    /// `(field, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.ty
            .info
            .fields
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Converts to an insertion-ordered dict keyed by field name, preserving
    /// declaration order.
    pub fn to_dict(&self) -> OrderedDict<V>
    where
        V: Clone,
    {
        let mut dict = OrderedDict::new();
        for (field, value) in self.iter() {
            dict.set(field, value.clone())
                .expect("string field names are hashable");
        }
        dict
    }
}

impl<V> Index<usize> for Record<V> {
    type Output = V;

    fn index(&self, index: usize) -> &V {
        &self.values[index]
    }
}

impl<V: fmt::Debug> fmt::Debug for Record<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.type_name());
        for (field, value) in self.iter() {
            s.field(field, value);
        }
        s.finish()
    }
}

// `Point(x=3, y=4)`, matching the record's own constructor syntax.
impl<V: fmt::Display> fmt::Display for Record<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name())?;
        for (i, (field, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}={value}")?;
        }
        f.write_str(")")
    }
}

impl<V: PartialEq> PartialEq for Record<V> {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.values == other.values
    }
}
