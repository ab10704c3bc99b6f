//! Dispatch keys.

use std::fmt;

use crate::value::Value;

/// A registration key in a dispatch table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Matches dispatch values through the is-a relation.
    Is(Value),
    /// Wildcard sentinel: matches every value, out-ranked by any
    /// strictly more specific co-candidate.
    Any,
    /// Default sentinel: never matched by is-a; registering under it
    /// installs the table's default handler.
    Fallback,
    /// Positional key for multi-argument dispatch; positions may
    /// themselves be [`Key::Any`].
    Tuple(Vec<Key>),
}

impl Key {
    /// Canonical key for a concrete value.
    ///
    /// Tuple values become [`Key::Tuple`] so each semantic key has a
    /// single spelling.
    pub fn of(value: Value) -> Self {
        Key::Is(value).canonicalize()
    }

    pub fn tuple(keys: impl IntoIterator<Item = Key>) -> Self {
        Key::Tuple(keys.into_iter().collect()).canonicalize()
    }

    pub(crate) fn canonicalize(self) -> Self {
        match self {
            Key::Is(Value::Tuple(items)) => {
                Key::Tuple(items.into_iter().map(Key::of).collect())
            }
            Key::Tuple(keys) => {
                Key::Tuple(keys.into_iter().map(Key::canonicalize).collect())
            }
            other => other,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Key::Fallback)
    }
}

impl From<Value> for Key {
    fn from(value: Value) -> Self {
        Key::of(value)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Is(value) => write!(f, "{value}"),
            Key::Any => f.write_str("any"),
            Key::Fallback => f.write_str("default"),
            Key::Tuple(keys) => {
                f.write_str("(")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}")?;
                }
                f.write_str(")")
            }
        }
    }
}
