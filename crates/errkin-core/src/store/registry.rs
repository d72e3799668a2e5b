use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use errkin_core_types::InstanceId;

use super::class_keys::ClassKeyRegistry;
use super::context_store::ContextStore;
use crate::model::{ContextMap, CustomError, KindRef};

#[derive(Default)]
struct RegistryState {
    class_keys: RwLock<ClassKeyRegistry>,
    kinds: RwLock<HashMap<String, KindRef>>,
    contexts: RwLock<ContextStore>,
}

/// Registry - kind table, class key registry and context store
///
/// A cheap-clone handle; clones share state. Independent registries can
/// coexist, which keeps tests isolated. `Registry::global()` is the
/// process-wide default used by `create_custom_error`.
///
/// Kinds hold a weak handle to the registry that created them; instances
/// hold a strong one. The state is freed once every `Registry` handle and
/// every instance built from it has been dropped.
///
/// Registration is expected to happen during initialization; concurrent
/// factory calls are serialized by the internal locks but give no ordering
/// guarantee between same-name registrations.
#[derive(Clone, Default)]
pub struct Registry {
    state: Arc<RegistryState>,
}

/// Non-owning handle held by kinds
#[derive(Clone, Default)]
pub(crate) struct WeakRegistry {
    state: Weak<RegistryState>,
}

impl WeakRegistry {
    pub(crate) fn upgrade(&self) -> Option<Registry> {
        self.state.upgrade().map(|state| Registry { state })
    }
}

static GLOBAL_REGISTRY: OnceLock<Registry> = OnceLock::new();

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl Registry {
    /// Create a new, empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide default registry
    pub fn global() -> &'static Registry {
        GLOBAL_REGISTRY.get_or_init(Registry::new)
    }

    /// True if both handles share the same state
    pub fn same_as(&self, other: &Registry) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    pub(crate) fn downgrade(&self) -> WeakRegistry {
        WeakRegistry {
            state: Arc::downgrade(&self.state),
        }
    }

    /// Look up the kind currently registered under `name`
    pub fn kind(&self, name: &str) -> Option<KindRef> {
        read(&self.state.kinds).get(name).cloned()
    }

    /// Own fields currently registered under `name`
    pub fn own_fields(&self, name: &str) -> Option<Vec<String>> {
        read(&self.state.class_keys)
            .own_fields(name)
            .map(<[String]>::to_vec)
    }

    /// Registered kind names, sorted
    pub fn kind_names(&self) -> Vec<String> {
        let mut names: Vec<String> = read(&self.state.kinds).keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        read(&self.state.kinds).len()
    }

    pub fn is_empty(&self) -> bool {
        read(&self.state.kinds).is_empty()
    }

    /// Stored context for `instance`, if it was registered here
    pub fn stored_context(&self, instance: &CustomError) -> Option<ContextMap> {
        read(&self.state.contexts).get(instance).cloned()
    }

    /// Number of context store entries
    pub fn live_contexts(&self) -> usize {
        read(&self.state.contexts).len()
    }

    /// Sweep context entries whose instance no longer exists
    pub fn prune_contexts(&self) -> usize {
        write(&self.state.contexts).prune()
    }

    /// Forget every kind and class key registration
    ///
    /// Already-built kinds keep working while this registry is alive;
    /// lookups by name stop resolving.
    pub fn clear(&self) {
        write(&self.state.kinds).clear();
        write(&self.state.class_keys).clear();
    }

    pub(crate) fn register_class_keys(&self, name: &str, fields: Vec<String>) {
        write(&self.state.class_keys).register(name, fields);
    }

    /// Returns true when an existing kind of the same name was replaced
    pub(crate) fn register_kind(&self, kind: KindRef) -> bool {
        let previous = write(&self.state.kinds).insert(kind.name().to_string(), kind);
        previous.is_some()
    }

    pub(crate) fn store_context(&self, instance: &Arc<CustomError>, context: ContextMap) -> bool {
        write(&self.state.contexts).insert(instance, context)
    }

    pub(crate) fn release_context(&self, id: InstanceId) {
        // Bare instances never have entries; skip the write lock for them.
        if !read(&self.state.contexts).contains(id) {
            return;
        }
        write(&self.state.contexts).release(id);
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kinds", &self.kind_names())
            .field("live_contexts", &self.live_contexts())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registries_are_isolated() {
        let first = Registry::new();
        let second = Registry::new();

        first.create_kind("Only", ["a"], None).unwrap();

        assert!(first.kind("Only").is_some());
        assert!(second.kind("Only").is_none());
        assert!(!first.same_as(&second));
        assert!(first.same_as(&first.clone()));
    }

    #[test]
    fn test_global_registry_is_shared() {
        assert!(Registry::global().same_as(Registry::global()));
    }

    #[test]
    fn test_clear_drops_names_but_not_kinds() {
        let registry = Registry::new();
        let kind = registry.create_kind("Gone", ["a"], None).unwrap();

        registry.clear();

        assert!(registry.is_empty());
        assert!(registry.own_fields("Gone").is_none());
        assert_eq!(kind.name(), "Gone");
    }

    #[test]
    fn test_state_freed_once_handles_drop() {
        let registry = Registry::new();
        let base = registry.create_kind("Base", ["severity"], None).unwrap();
        let err = base
            .new_error(
                crate::ErrorOptions::new("x")
                    .with_context_value(serde_json::json!({"severity": "high"}))
                    .unwrap(),
            )
            .unwrap();
        let weak = registry.downgrade();

        drop(err);
        drop(base);
        drop(registry);

        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_live_instance_keeps_state_alive() {
        let registry = Registry::new();
        let kind = registry.create_kind("Held", crate::NO_FIELDS, None).unwrap();
        let err = kind.new_error(crate::ErrorOptions::new("x")).unwrap();
        let weak = registry.downgrade();

        drop(registry);
        assert!(weak.upgrade().is_some());

        drop(err);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_kind_names_sorted() {
        let registry = Registry::new();
        registry.create_kind("b", crate::NO_FIELDS, None).unwrap();
        registry.create_kind("a", crate::NO_FIELDS, None).unwrap();

        assert_eq!(registry.kind_names(), vec!["a", "b"]);
        assert_eq!(registry.len(), 2);
    }
}
