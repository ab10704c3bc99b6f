//! The is-a relation between dispatch values and keys.
//!
//! Structural matching falls back from equality to type-tag derivation,
//! and tuples are matched position-wise. Tagged shapes can override the
//! structural default with a registered predicate.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::hierarchy::TypeHierarchy;
use crate::key::Key;
use crate::value::Value;

/// Pluggable specialization predicate for one tagged shape.
///
/// Called as `pred(value, key)`; returns whether the value satisfies the
/// key.
pub type ShapePredicate = dyn Fn(&Value, &Value) -> bool + Send + Sync;

pub struct Isa {
    hierarchy: TypeHierarchy,
    shape_predicates: FxHashMap<&'static str, Arc<ShapePredicate>>,
}

impl Isa {
    pub fn new() -> Self {
        Self {
            hierarchy: TypeHierarchy::new(),
            shape_predicates: FxHashMap::default(),
        }
    }

    pub fn hierarchy(&self) -> &TypeHierarchy {
        &self.hierarchy
    }

    pub fn hierarchy_mut(&mut self) -> &mut TypeHierarchy {
        &mut self.hierarchy
    }

    /// Installs `pred` for values and keys tagged with `shape`, replacing
    /// any previous predicate for that shape.
    pub fn register_shape_predicate<F>(&mut self, shape: &'static str, pred: F)
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.shape_predicates.insert(shape, Arc::new(pred));
    }

    /// Whether `value` satisfies the concrete key value `key`.
    pub fn value_isa(&self, value: &Value, key: &Value) -> bool {
        if let Some(pred) = self.shape_predicate_for(value, key) {
            return pred(value, key);
        }
        if value == key {
            return true;
        }
        match (value, key) {
            (Value::Type(a), Value::Type(b)) => self.hierarchy.derives_from(*a, *b),
            (_, Value::Type(tag)) => self.hierarchy.derives_from(value.type_tag(), *tag),
            (Value::Tuple(vs), Value::Tuple(ks)) => {
                vs.len() == ks.len() && vs.iter().zip(ks).all(|(v, k)| self.value_isa(v, k))
            }
            _ => false,
        }
    }

    /// Whether `value` matches registration key `key`.
    ///
    /// `Any` matches everything. `Fallback` matches nothing; the default
    /// slot is consulted only after filtering comes up empty.
    pub fn matches(&self, value: &Value, key: &Key) -> bool {
        match key {
            Key::Any => true,
            Key::Fallback => false,
            Key::Is(kv) => self.value_isa(value, kv),
            Key::Tuple(ks) => match value {
                Value::Tuple(vs) => {
                    vs.len() == ks.len() && vs.iter().zip(ks).all(|(v, k)| self.matches(v, k))
                }
                _ => false,
            },
        }
    }

    /// Whether key `a` is at least as specific as key `b`.
    pub fn key_isa(&self, a: &Key, b: &Key) -> bool {
        match (a, b) {
            (Key::Fallback, _) | (_, Key::Fallback) => false,
            (_, Key::Any) => true,
            (Key::Any, _) => false,
            (Key::Is(va), Key::Is(vb)) => self.value_isa(va, vb),
            (Key::Tuple(ks_a), Key::Tuple(ks_b)) => {
                ks_a.len() == ks_b.len()
                    && ks_a.iter().zip(ks_b).all(|(x, y)| self.key_isa(x, y))
            }
            _ => false,
        }
    }

    fn shape_predicate_for(&self, value: &Value, key: &Value) -> Option<&ShapePredicate> {
        for side in [key, value] {
            if let Value::Tagged { shape, .. } = side {
                if let Some(pred) = self.shape_predicates.get(shape) {
                    return Some(pred.as_ref());
                }
            }
        }
        None
    }
}

impl Default for Isa {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Isa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Isa")
            .field("hierarchy", &self.hierarchy)
            .field(
                "shape_predicates",
                &self.shape_predicates.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}
