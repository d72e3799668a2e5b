use std::fmt;
use std::sync::Arc;

use super::context::ContextMap;
use crate::errors::{ErrkinError, Result};
use crate::store::registry::WeakRegistry;
use crate::store::Registry;

/// Shared handle to a kind descriptor
pub type KindRef = Arc<Kind>;

/// Predicate a kind applies to the merged context of each new instance
///
/// Returning `Err(reason)` makes construction of that kind fail.
pub type ContextGuard = Arc<dyn Fn(&ContextMap) -> std::result::Result<(), String> + Send + Sync>;

/// Kind - a named error type produced by the factory
///
/// A kind is plain data: its name, the context fields it declares as its
/// own, and an optional declared parent kind. Every instance is built by
/// the one generic construction routine (`Kind::new_error`), which reads
/// this record. Kinds are immutable once created.
pub struct Kind {
    pub(crate) name: String,
    pub(crate) own_fields: Vec<String>,
    pub(crate) parent: Option<KindRef>,
    pub(crate) guard: Option<ContextGuard>,
    pub(crate) registry: WeakRegistry,
}

impl Kind {
    pub(crate) fn new(
        name: String,
        own_fields: Vec<String>,
        parent: Option<KindRef>,
        guard: Option<ContextGuard>,
        registry: WeakRegistry,
    ) -> Self {
        Self {
            name,
            own_fields,
            parent,
            guard,
            registry,
        }
    }

    /// Kind name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Own fields as declared when this kind was created
    ///
    /// Lookups that filter by own fields go through the registry instead
    /// (see `registered_fields`), so a later kind with the same name wins.
    pub fn own_fields(&self) -> &[String] {
        &self.own_fields
    }

    /// Declared parent kind, if any
    pub fn parent(&self) -> Option<&KindRef> {
        self.parent.as_ref()
    }

    /// Registry this kind was created in, while it is still alive
    pub fn registry(&self) -> Option<Registry> {
        self.registry.upgrade()
    }

    pub(crate) fn live_registry(&self) -> Result<Registry> {
        self.registry
            .upgrade()
            .ok_or_else(|| ErrkinError::RegistryReleased {
                kind: self.name.clone(),
            })
    }

    /// Whether a context guard is attached
    pub fn has_guard(&self) -> bool {
        self.guard.is_some()
    }

    /// Own fields currently registered under this kind's name
    ///
    /// Falls back to the declared own fields once the registry is gone.
    pub fn registered_fields(&self) -> Vec<String> {
        match self.registry.upgrade() {
            Some(registry) => registry.own_fields(&self.name).unwrap_or_default(),
            None => self.own_fields.clone(),
        }
    }

    /// Identity comparison (two kinds may share a name after redefinition)
    pub fn is_same(&self, other: &Kind) -> bool {
        std::ptr::eq(self, other)
    }

    /// True if this kind is `other` or declares it as an ancestor
    pub fn refines(&self, other: &Kind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind.is_same(other) {
                return true;
            }
            current = kind.parent.as_deref();
        }
        false
    }

    pub(crate) fn check_guard(&self, context: &ContextMap) -> Result<()> {
        match &self.guard {
            Some(guard) => guard(context).map_err(|reason| ErrkinError::ContextRejected {
                kind: self.name.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kind")
            .field("name", &self.name)
            .field("own_fields", &self.own_fields)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .field("guard", &self.guard.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refines_walks_declared_parents() {
        let registry = Registry::new();
        let base = registry.create_kind("Base", ["severity"], None).unwrap();
        let data = registry
            .create_kind("Data", ["source"], Some(&base))
            .unwrap();
        let other = registry.create_kind("Other", crate::NO_FIELDS, None).unwrap();

        assert!(data.refines(&data));
        assert!(data.refines(&base));
        assert!(!base.refines(&data));
        assert!(!data.refines(&other));
    }

    #[test]
    fn test_debug_shows_parent_name_only() {
        let registry = Registry::new();
        let base = registry.create_kind("Base", ["severity"], None).unwrap();
        let data = registry
            .create_kind("Data", ["source"], Some(&base))
            .unwrap();

        let rendered = format!("{:?}", data);
        assert!(rendered.contains("Some(\"Base\")"));
        assert!(rendered.contains("guard: false"));
    }

    #[test]
    fn test_orphaned_kind_reports_released_registry() {
        let registry = Registry::new();
        let kind = registry.create_kind("Orphan", ["code"], None).unwrap();
        drop(registry);

        assert!(kind.registry().is_none());
        assert_eq!(kind.registered_fields(), vec!["code".to_string()]);
        assert_eq!(
            kind.live_registry().unwrap_err(),
            ErrkinError::RegistryReleased {
                kind: "Orphan".to_string()
            }
        );
    }

    #[test]
    fn test_check_guard_maps_reason() {
        let registry = Registry::new();
        let strict = registry
            .kind_builder("Strict")
            .field("code")
            .guard(|ctx| {
                if ctx.contains_key("code") {
                    Ok(())
                } else {
                    Err("code is required".to_string())
                }
            })
            .build()
            .unwrap();

        let err = strict.check_guard(&ContextMap::new()).unwrap_err();
        assert_eq!(
            err,
            ErrkinError::ContextRejected {
                kind: "Strict".to_string(),
                reason: "code is required".to_string(),
            }
        );
    }
}
