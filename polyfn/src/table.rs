//! Dispatch tables.
//!
//! A table maps dispatch keys to handlers and resolves dispatch values
//! against them through its is-a relation and preference graph.
//!
//! Every mutation bumps the table's generation. Cache entries record the
//! generation that produced them, so stale entries become unreachable
//! without a sweep.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{DispatchError, DispatchResult};
use crate::handler::Handler;
use crate::isa::Isa;
use crate::key::Key;
use crate::preference::PreferenceGraph;
use crate::resolver;
use crate::value::Value;

/// The callable that reduces call arguments to a dispatch value.
pub type DispatchFn = dyn Fn(&[Value]) -> DispatchResult<Value> + Send + Sync;

#[derive(Clone)]
pub(crate) struct CacheEntry {
    pub(crate) generation: u64,
    pub(crate) handler: Handler,
}

pub struct DispatchTable {
    name: String,
    dispatch_fn: Arc<DispatchFn>,
    pub(crate) handlers: IndexMap<Key, Handler>,
    pub(crate) default: Option<Handler>,
    isa: Isa,
    pub(crate) preferences: PreferenceGraph,
    pub(crate) generation: u64,
    pub(crate) cache: Mutex<FxHashMap<Value, CacheEntry>>,
}

impl DispatchTable {
    /// Creates a table with an explicit dispatch function.
    pub fn new<F>(name: impl Into<String>, dispatch_fn: F) -> Self
    where
        F: Fn(&[Value]) -> DispatchResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            dispatch_fn: Arc::new(dispatch_fn),
            handlers: IndexMap::new(),
            default: None,
            isa: Isa::new(),
            preferences: PreferenceGraph::new(),
            generation: 0,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    /// Single-argument dispatch on the argument itself.
    pub fn on_value(name: impl Into<String>) -> Self {
        Self::new(name, |args: &[Value]| match args {
            [value] => Ok(value.clone()),
            _ => Err(DispatchError::ArityMismatch {
                expected: 1,
                found: args.len(),
            }),
        })
    }

    /// Dispatch on the tuple of the arguments' type tags.
    pub fn on_types(name: impl Into<String>) -> Self {
        Self::new(name, |args: &[Value]| {
            Ok(Value::Tuple(
                args.iter().map(|arg| Value::Type(arg.type_tag())).collect(),
            ))
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of concrete registrations; the default slot is not counted.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registers `handler` under `key`, replacing any previous
    /// registration. [`Key::Fallback`] routes to the default slot.
    pub fn add_handler(&mut self, key: Key, handler: Handler) {
        let key = key.canonicalize();
        if key.is_fallback() {
            self.default = Some(handler);
        } else {
            debug!(table = %self.name, key = %key, "handler registered");
            self.handlers.insert(key, handler);
        }
        self.touch();
    }

    /// Removes the registration under `key`, reporting whether one
    /// existed. [`Key::Fallback`] clears the default slot.
    pub fn remove_handler(&mut self, key: &Key) -> bool {
        let key = key.clone().canonicalize();
        let removed = if key.is_fallback() {
            self.default.take().is_some()
        } else {
            self.handlers.shift_remove(&key).is_some()
        };
        if removed {
            debug!(table = %self.name, key = %key, "handler removed");
            self.touch();
        }
        removed
    }

    pub fn set_default(&mut self, handler: Handler) {
        self.default = Some(handler);
        self.touch();
    }

    pub fn remove_default(&mut self) -> bool {
        let removed = self.default.take().is_some();
        if removed {
            self.touch();
        }
        removed
    }

    /// Records that `winner` beats `loser` in specificity ties.
    pub fn prefer(&mut self, winner: Key, loser: Key) {
        let winner = winner.canonicalize();
        let loser = loser.canonicalize();
        debug!(table = %self.name, winner = %winner, loser = %loser, "preference recorded");
        self.preferences.insert(winner, loser);
        self.touch();
    }

    pub fn isa(&self) -> &Isa {
        &self.isa
    }

    /// Mutable access to the is-a relation.
    ///
    /// Bumps the generation: hierarchy and predicate changes alter
    /// matching.
    pub fn isa_mut(&mut self) -> &mut Isa {
        self.touch();
        &mut self.isa
    }

    /// Selects the handler for a dispatch value without invoking it.
    pub fn resolve(&self, value: &Value) -> DispatchResult<Handler> {
        resolver::resolve(self, value)
    }

    /// Computes the dispatch value, resolves, and invokes the winner with
    /// the original arguments. Handler results and errors pass through
    /// unchanged.
    pub fn call(&self, args: &[Value]) -> DispatchResult<Value> {
        let value = (self.dispatch_fn)(args)?;
        let handler = self.resolve(&value)?;
        handler.invoke(args)
    }

    fn touch(&mut self) {
        self.generation += 1;
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("name", &self.name)
            .field("keys", &self.handlers.keys().collect::<Vec<_>>())
            .field("has_default", &self.default.is_some())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
