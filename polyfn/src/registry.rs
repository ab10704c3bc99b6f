//! Name-based table registry.
//!
//! Tables register under a qualified `namespace.name` and are looked up
//! by that name, so definition sites and attachment sites can be
//! separate.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{DispatchError, DispatchResult};
use crate::handler::Handler;
use crate::key::Key;
use crate::table::DispatchTable;

/// Shared handle to a registered table.
pub type TableRef = Arc<RwLock<DispatchTable>>;

/// How a registry fills in a missing namespace at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespacePolicy {
    /// Registration without an explicit namespace fails.
    Required,
    /// Registrations without a namespace land here.
    DefaultNamespace(String),
}

#[derive(Debug)]
pub struct Registry {
    policy: NamespacePolicy,
    tables: RwLock<FxHashMap<String, TableRef>>,
}

impl Registry {
    pub fn new(policy: NamespacePolicy) -> Self {
        Self {
            policy,
            tables: RwLock::new(FxHashMap::default()),
        }
    }

    /// The process-wide registry. Its policy is
    /// [`NamespacePolicy::Required`].
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(|| Registry::new(NamespacePolicy::Required))
    }

    /// Registers `table` under `{namespace}.{name}`, last writer wins.
    ///
    /// Without an explicit namespace the policy decides: `Required`
    /// rejects the registration, `DefaultNamespace` supplies one.
    pub fn register(
        &self,
        table: DispatchTable,
        namespace: Option<&str>,
    ) -> DispatchResult<TableRef> {
        let namespace = match namespace {
            Some(ns) => ns.to_string(),
            None => match &self.policy {
                NamespacePolicy::DefaultNamespace(ns) => ns.clone(),
                NamespacePolicy::Required => {
                    return Err(DispatchError::Configuration {
                        message: format!(
                            "table `{}` registered without a namespace",
                            table.name()
                        ),
                    });
                }
            },
        };
        let qualified = format!("{namespace}.{}", table.name());
        debug!(table = %qualified, "table registered");
        let handle: TableRef = Arc::new(RwLock::new(table));
        self.tables.write().insert(qualified, Arc::clone(&handle));
        Ok(handle)
    }

    /// Looks up a table by qualified name.
    pub fn get(&self, qualified: &str) -> DispatchResult<TableRef> {
        self.tables
            .read()
            .get(qualified)
            .cloned()
            .ok_or_else(|| DispatchError::UnknownTable {
                name: qualified.to_string(),
            })
    }

    /// Attaches a handler to a table by qualified name.
    pub fn add_handler(
        &self,
        qualified: &str,
        key: Key,
        handler: Handler,
    ) -> DispatchResult<()> {
        let table = self.get(qualified)?;
        table.write().add_handler(key, handler);
        Ok(())
    }

    pub fn contains(&self, qualified: &str) -> bool {
        self.tables.read().contains_key(qualified)
    }

    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::value::Value;

    #[test]
    fn required_policy_rejects_missing_namespace() {
        let registry = Registry::new(NamespacePolicy::Required);
        let err = registry
            .register(DispatchTable::on_value("definition"), None)
            .unwrap_err();
        assert!(matches!(err, DispatchError::Configuration { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn default_namespace_policy_fills_in() {
        let registry = Registry::new(NamespacePolicy::DefaultNamespace("app".to_string()));
        registry
            .register(DispatchTable::on_value("definition"), None)
            .unwrap();

        assert!(registry.contains("app.definition"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn explicit_namespace_overrides_the_default() {
        let registry = Registry::new(NamespacePolicy::DefaultNamespace("app".to_string()));
        registry
            .register(DispatchTable::on_value("definition"), Some("custom"))
            .unwrap();

        assert!(registry.contains("custom.definition"));
        assert!(!registry.contains("app.definition"));
    }

    #[test]
    fn lookup_of_unregistered_name_fails() {
        let registry = Registry::new(NamespacePolicy::Required);
        assert_eq!(
            registry.get("custom.missing").unwrap_err(),
            DispatchError::UnknownTable {
                name: "custom.missing".to_string()
            }
        );
    }

    #[test]
    fn reregistration_replaces_the_table() {
        let registry = Registry::new(NamespacePolicy::Required);
        let mut first = DispatchTable::on_value("t");
        first.add_handler(
            Key::of(Value::Int(1)),
            Handler::new(|_| Ok(Value::from("first"))),
        );
        registry.register(first, Some("ns")).unwrap();
        registry
            .register(DispatchTable::on_value("t"), Some("ns"))
            .unwrap();

        let table = registry.get("ns.t").unwrap();
        assert!(table.read().is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn handlers_attach_by_qualified_name() {
        let registry = Registry::new(NamespacePolicy::Required);
        registry
            .register(DispatchTable::on_value("definition"), Some("custom"))
            .unwrap();
        registry
            .add_handler(
                "custom.definition",
                Key::of(Value::Int(42)),
                Handler::new(|_| Ok(Value::from("The Answer"))),
            )
            .unwrap();

        let table = registry.get("custom.definition").unwrap();
        assert_eq!(
            table.read().call(&[Value::Int(42)]),
            Ok(Value::from("The Answer"))
        );

        assert!(matches!(
            registry.add_handler(
                "custom.missing",
                Key::Any,
                Handler::new(|_| Ok(Value::Unit)),
            ),
            Err(DispatchError::UnknownTable { .. })
        ));
    }
}
