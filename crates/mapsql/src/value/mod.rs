//! Bindable values.
//!
//! [`Value`] is the closed set of things a statement argument can hold. Raw SQL
//! ([`Raw`]) and nullable wrappers ([`Nullable`]) are cases of the same sum type
//! so that both the statement compiler and the literal renderer can dispatch on
//! them without downcasting.

mod field_map;
mod to_sql;

#[cfg(test)]
mod tests;

pub use field_map::FieldMap;

use crate::error::SqlError;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;

/// SQL text that is spliced into a statement verbatim and never bound.
///
/// ```ignore
/// let map = FieldMap::new().with("updated_at", Raw::new("now()"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Raw(String);

impl Raw {
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shorthand for [`Raw::new`].
pub fn raw(sql: impl Into<String>) -> Raw {
    Raw::new(sql)
}

/// A value paired with a validity flag.
///
/// An invalid wrapper is bound and rendered as SQL `NULL` whatever `value`
/// holds. One generic wrapper covers every nullable column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nullable<T> {
    pub value: T,
    pub valid: bool,
}

impl<T> Nullable<T> {
    /// A valid (non-null) wrapper.
    pub fn new(value: T) -> Self {
        Self { value, valid: true }
    }

    /// An invalid (null) wrapper.
    pub fn null() -> Self
    where
        T: Default,
    {
        Self {
            value: T::default(),
            valid: false,
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.valid.then_some(&self.value)
    }

    pub fn into_option(self) -> Option<T> {
        self.valid.then_some(self.value)
    }
}

impl<T: Default> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::new(v),
            None => Self::null(),
        }
    }
}

/// A statement argument.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// Every integer width widens into `i64`; narrowing happens at bind time.
    Int(i64),
    Float(f64),
    /// Single precision, kept apart so its literal is the shortest `f32` form.
    Float4(f32),
    Text(String),
    /// Date and time without zone.
    Timestamp(NaiveDateTime),
    /// Date and time in UTC.
    TimestampTz(DateTime<Utc>),
    Uuid(uuid::Uuid),
    Json(serde_json::Value),
    Nullable(Box<Nullable<Value>>),
    Raw(Raw),
}

impl Value {
    /// Whether this is raw SQL rather than a bindable argument.
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// Whether this binds as SQL `NULL`.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Nullable(n) => !n.valid || n.value.is_null(),
            _ => false,
        }
    }

    pub fn as_raw(&self) -> Option<&Raw> {
        match self {
            Self::Raw(raw) => Some(raw),
            _ => None,
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Widths that may not fit in `i64` convert fallibly:
// `fields.set("n", Value::try_from(items.len())?)`.
macro_rules! impl_try_from_int {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Value {
                type Error = SqlError;

                fn try_from(v: $t) -> Result<Self, Self::Error> {
                    i64::try_from(v).map(Self::Int).map_err(|_| {
                        SqlError::validation(format!("integer {v} does not fit in i64"))
                    })
                }
            }
        )*
    };
}

impl_try_from_int!(u64, usize, isize, i128, u128);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float4(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::Timestamp(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::TimestampTz(v)
    }
}

impl From<uuid::Uuid> for Value {
    fn from(v: uuid::Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl From<Raw> for Value {
    fn from(v: Raw) -> Self {
        Self::Raw(v)
    }
}

impl<T: Into<Value>> From<Nullable<T>> for Value {
    fn from(v: Nullable<T>) -> Self {
        Self::Nullable(Box::new(Nullable {
            value: v.value.into(),
            valid: v.valid,
        }))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        let inner = match v {
            Some(v) => Nullable::new(v.into()),
            None => Nullable::null(),
        };
        Self::Nullable(Box::new(inner))
    }
}
