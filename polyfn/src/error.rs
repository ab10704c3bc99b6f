//! Error taxonomy for dispatch.

use thiserror::Error;

/// Errors surfaced by tables, resolution, and the registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No registered key matched and no default handler is installed.
    #[error("no handler in `{table}` matches dispatch value {value}")]
    NoMatch { table: String, value: String },

    /// Several maximally specific candidates remain. Terminal: retrying
    /// cannot succeed until the table's configuration changes.
    #[error("ambiguous dispatch in `{table}` for {value}: candidates {candidates:?}")]
    Ambiguous {
        table: String,
        value: String,
        candidates: Vec<String>,
    },

    /// A fixed-arity handler or dispatch function was invoked with the
    /// wrong argument count.
    #[error("expected {expected} arguments, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// Qualified-name lookup found nothing.
    #[error("unknown dispatch table: {name}")]
    UnknownTable { name: String },

    /// The registry's namespace policy was violated.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A handler's own failure, propagated unchanged through `call`.
    #[error("{message}")]
    Handler { message: String },
}

/// Dispatch result type.
pub type DispatchResult<T> = Result<T, DispatchError>;
