//! Generic-function dispatch with multimethod resolution.
//!
//! A [`DispatchTable`] routes calls to handlers by reducing the call
//! arguments to a single dispatch value and selecting the most specific
//! registered key that value satisfies. Specificity comes from an is-a
//! relation over a nominal type hierarchy; preference edges break ties
//! between incomparable keys, and a memoized cache keeps repeated
//! lookups cheap.
//!
//! # Resolution Overview
//!
//! 1. **Compute**: the table's dispatch function reduces the arguments
//!    to one dispatch value
//! 2. **Filter**: keep every registered key the value matches
//! 3. **Select**: the unique most specific candidate wins; preference
//!    edges decide between incomparable keys
//! 4. **Fall back**: an empty candidate set routes to the default
//!    handler when one is installed
//!
//! Failures are typed: [`DispatchError::NoMatch`] when nothing applies,
//! [`DispatchError::Ambiguous`] when several maximal candidates remain.
//!
//! # Example
//!
//! ```
//! use polyfn::{DispatchTable, Handler, Key, Value};
//!
//! let mut speak = DispatchTable::on_value("speak");
//! speak.add_handler(Key::of(Value::Int(2)), Handler::new(|_| Ok(Value::from("two"))));
//! speak.set_default(Handler::new(|_| Ok(Value::from("many"))));
//!
//! assert_eq!(speak.call(&[Value::Int(2)]), Ok(Value::from("two")));
//! assert_eq!(speak.call(&[Value::Int(9)]), Ok(Value::from("many")));
//! ```
//!
//! Tables can also live in a [`Registry`] under qualified names, so a
//! handler can be attached far from where its table was defined.

pub mod error;
pub mod handler;
pub mod hierarchy;
pub mod isa;
pub mod key;
pub mod preference;
pub mod registry;
mod resolver;
pub mod table;
pub mod value;

pub use error::{DispatchError, DispatchResult};
pub use handler::{Handler, HandlerFn};
pub use hierarchy::TypeHierarchy;
pub use isa::{Isa, ShapePredicate};
pub use key::Key;
pub use preference::PreferenceGraph;
pub use registry::{NamespacePolicy, Registry, TableRef};
pub use table::{DispatchFn, DispatchTable};
pub use value::{TypeTag, Value};
