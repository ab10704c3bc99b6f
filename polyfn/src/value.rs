//! The dispatch-value domain.
//!
//! Dispatch values are the hashable, comparable values a table's dispatch
//! function computes from call arguments. Matching is by equality and the
//! is-a relation, never by truthiness: `Int(0)`, `Bool(false)`, and `Unit`
//! are pairwise distinct.

use std::fmt;

use ordered_float::OrderedFloat;

/// A cheap, comparable type name.
///
/// Tags form a single-parent hierarchy rooted at [`TypeTag::VALUE`]; see
/// [`TypeHierarchy`](crate::hierarchy::TypeHierarchy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(&'static str);

impl TypeTag {
    /// Root of the built-in hierarchy.
    pub const VALUE: TypeTag = TypeTag::new("value");
    /// Abstract parent of [`TypeTag::INT`] and [`TypeTag::FLOAT`].
    pub const NUMBER: TypeTag = TypeTag::new("number");
    pub const INT: TypeTag = TypeTag::new("int");
    pub const FLOAT: TypeTag = TypeTag::new("float");
    pub const STR: TypeTag = TypeTag::new("str");
    pub const BOOL: TypeTag = TypeTag::new("bool");
    pub const UNIT: TypeTag = TypeTag::new("unit");
    pub const TUPLE: TypeTag = TypeTag::new("tuple");
    /// Tag of type values themselves.
    pub const TYPE: TypeTag = TypeTag::new("type");

    /// Creates a tag from a static name.
    pub const fn new(name: &'static str) -> Self {
        TypeTag(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A dynamic dispatch value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// The none-equivalent; distinct from every other value.
    Unit,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Str(String),
    /// A first-class type value, usable both as a dispatch value and
    /// inside dispatch keys.
    Type(TypeTag),
    /// Fixed-length ordered tuple; positions are matched independently.
    Tuple(Vec<Value>),
    /// A domain value carrying a shape name and a payload. Shapes are
    /// the hook for pluggable specialization predicates.
    Tagged {
        shape: &'static str,
        payload: Box<Value>,
    },
}

impl Value {
    pub fn float(x: f64) -> Self {
        Value::Float(OrderedFloat(x))
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    pub fn tagged(shape: &'static str, payload: Value) -> Self {
        Value::Tagged {
            shape,
            payload: Box::new(payload),
        }
    }

    /// The nominal tag of this value.
    ///
    /// A tagged value's shape doubles as its tag, so shapes can be
    /// parented into the hierarchy like any other tag.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Unit => TypeTag::UNIT,
            Value::Bool(_) => TypeTag::BOOL,
            Value::Int(_) => TypeTag::INT,
            Value::Float(_) => TypeTag::FLOAT,
            Value::Str(_) => TypeTag::STR,
            Value::Type(_) => TypeTag::TYPE,
            Value::Tuple(_) => TypeTag::TUPLE,
            Value::Tagged { shape, .. } => TypeTag::new(shape),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => f.write_str("()"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Type(tag) => write!(f, "{tag}"),
            Value::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Value::Tagged { shape, payload } => write!(f, "{shape}({payload})"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::float(x)
    }
}

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

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl From<TypeTag> for Value {
    fn from(tag: TypeTag) -> Self {
        Value::Type(tag)
    }
}
