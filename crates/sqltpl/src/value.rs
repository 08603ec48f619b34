//! Template argument values.
//!
//! [`Value`] is the dynamically typed argument accepted by a template. Besides
//! the usual scalars and composites it carries two special variants:
//!
//! - [`Value::Skip`]: the marker that suppresses the enclosing `{ ... }` block.
//!   Its payload [`Skip`] cannot be constructed outside this crate, so the only
//!   way to obtain one is [`crate::skip()`] / [`crate::QueryBuilder::skip`].
//! - [`Value::Opaque`]: a host object with no SQL representation of its own
//!   (see [`OpaqueValue`]).
//!
//! # Example
//! ```ignore
//! use sqltpl::{Value, args};
//!
//! let args = args![
//!     vec!["name", "email"],
//!     2,
//!     Value::map([("status", Value::from("active")), ("deleted_at", Value::Null)]),
//! ];
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Identity token behind [`Value::Skip`].
///
/// The private field keeps callers from forging one; it is handed out by
/// [`crate::skip()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Skip(());

impl Skip {
    pub(crate) const TOKEN: Skip = Skip(());
}

/// A host value the compiler cannot render directly.
///
/// Rendering an opaque value through `?` or `?a` fails with
/// [`crate::TemplateError::UnsupportedType`]. The numeric placeholders `?d` and
/// `?f` coerce it through [`numeric_text`](OpaqueValue::numeric_text), falling
/// back to zero.
pub trait OpaqueValue: fmt::Debug + Send + Sync {
    /// Name reported in error messages.
    fn type_name(&self) -> &str;

    /// Textual form used by loose numeric coercion, if any.
    fn numeric_text(&self) -> Option<Cow<'_, str>> {
        None
    }
}

/// A template argument.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Ordered sequence; rendered comma separated.
    List(Vec<Value>),
    /// String-keyed entries in insertion order; rendered as `` `key` = value ``.
    Map(Vec<(String, Value)>),
    /// Block suppression marker.
    Skip(Skip),
    Opaque(Arc<dyn OpaqueValue>),
}

impl Value {
    /// Build a list value from anything convertible.
    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a map value; entry order is preserved.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Wrap a host object.
    pub fn opaque(value: impl OpaqueValue + 'static) -> Self {
        Self::Opaque(Arc::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip(_))
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map(_))
    }

    /// Short type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Skip(_) => "skip",
            Self::Opaque(_) => "opaque",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Skip(_), Self::Skip(_)) => true,
            // Host objects compare by identity.
            (Self::Opaque(a), Self::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Skip> for Value {
    fn from(v: Skip) -> Self {
        Self::Skip(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
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

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Str(v.clone())
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(v: Cow<'_, str>) -> Self {
        Self::Str(v.into_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::list(v)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Self::list(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match v {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                // u64 beyond i64::MAX and all non-integral numbers.
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Self::Str(s),
            Json::Array(items) => Self::List(items.into_iter().map(Value::from).collect()),
            Json::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Build a `Vec<Value>` argument list.
///
/// Each expression is converted with `Value::from`, so values of different
/// types can be mixed freely.
///
/// ```ignore
/// let args = sqltpl::args!["user_id", vec![1, 2, 3], sqltpl::skip()];
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Handle;

    impl OpaqueValue for Handle {
        fn type_name(&self) -> &str {
            "handle"
        }
    }

    #[test]
    fn options_map_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Str("x".into()));
    }

    #[test]
    fn map_keeps_insertion_order() {
        let v = Value::map([("b", 1), ("a", 2)]);
        let Value::Map(entries) = v else {
            panic!("expected map");
        };
        assert_eq!(entries[0].0, "b");
        assert_eq!(entries[1].0, "a");
    }

    #[test]
    fn json_object_keeps_document_order() {
        let json: serde_json::Value = serde_json::from_str(r#"{"z": 1, "a": [true, null]}"#).unwrap();
        assert_eq!(
            Value::from(json),
            Value::map([
                ("z", Value::Int(1)),
                ("a", Value::list([Value::Bool(true), Value::Null])),
            ])
        );
    }

    #[test]
    fn json_large_unsigned_becomes_float() {
        let json: serde_json::Value = serde_json::from_str("18446744073709551615").unwrap();
        assert!(matches!(Value::from(json), Value::Float(_)));
    }

    #[test]
    fn opaque_compares_by_identity() {
        let a = Value::opaque(Handle);
        let b = Value::opaque(Handle);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(a.type_name(), "opaque");
    }

    #[test]
    fn args_macro_mixes_types() {
        let args = crate::args![1, "x", None::<i64>, vec![1.5, 2.5]];
        assert_eq!(
            args,
            vec![
                Value::Int(1),
                Value::Str("x".into()),
                Value::Null,
                Value::List(vec![Value::Float(1.5), Value::Float(2.5)]),
            ]
        );
        assert!(crate::args![].is_empty());
    }
}
