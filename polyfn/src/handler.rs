//! Handler callables.

use std::fmt;
use std::sync::Arc;

use crate::error::{DispatchError, DispatchResult};
use crate::value::Value;

/// The callable signature handlers implement.
pub type HandlerFn = dyn Fn(&[Value]) -> DispatchResult<Value> + Send + Sync;

/// A registered handler.
///
/// Cloning is cheap; the callable is shared.
#[derive(Clone)]
pub struct Handler {
    func: Arc<HandlerFn>,
}

impl Handler {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> DispatchResult<Value> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Wraps a fixed-arity callable.
    ///
    /// Invoking with any other argument count surfaces
    /// [`DispatchError::ArityMismatch`] without running the callable.
    pub fn with_arity<F>(expected: usize, func: F) -> Self
    where
        F: Fn(&[Value]) -> DispatchResult<Value> + Send + Sync + 'static,
    {
        Self::new(move |args: &[Value]| {
            if args.len() != expected {
                return Err(DispatchError::ArityMismatch {
                    expected,
                    found: args.len(),
                });
            }
            func(args)
        })
    }

    pub fn invoke(&self, args: &[Value]) -> DispatchResult<Value> {
        (self.func)(args)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").finish_non_exhaustive()
    }
}
