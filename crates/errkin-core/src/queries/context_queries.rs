use std::error::Error;

use crate::model::context::pick_fields;
use crate::model::{ContextMap, ContextOptions, CustomError, Kind};

impl Kind {
    /// Stored context of `err`
    ///
    /// `None` when `err` is not a `CustomError` or has no entry in this
    /// kind's context store. With `include_parent_context` the whole merged
    /// context is returned as stored; otherwise only the fields currently
    /// registered as own for this kind's name, or `None` if none are set.
    /// Reads never modify the stored context.
    pub fn get_context(
        &self,
        err: &(dyn Error + 'static),
        options: ContextOptions,
    ) -> Option<ContextMap> {
        let instance = err.downcast_ref::<CustomError>()?;
        let stored = self.registry.upgrade()?.stored_context(instance)?;

        if options.include_parent_context {
            return Some(stored);
        }

        let own = pick_fields(&stored, &self.registered_fields());
        (!own.is_empty()).then_some(own)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Registry;
    use crate::ErrorOptions;
    use serde_json::json;

    #[test]
    fn test_instance_without_context_is_none() {
        let registry = Registry::new();
        let kind = registry.create_kind("Empty", ["a"], None).unwrap();
        let err = kind.new_error(ErrorOptions::new("x")).unwrap();

        assert!(kind.get_context(&*err, ContextOptions::default()).is_none());
    }

    #[test]
    fn test_own_only_returns_none_when_no_own_fields_set() {
        let registry = Registry::new();
        let kind = registry.create_kind("Partial", ["mine"], None).unwrap();
        let err = kind
            .new_error(
                ErrorOptions::new("x")
                    .with_context_value(json!({"theirs": 1}))
                    .unwrap(),
            )
            .unwrap();

        assert!(kind.get_context(&*err, ContextOptions::own_only()).is_none());
        assert!(kind.get_context(&*err, ContextOptions::default()).is_some());
    }

    #[test]
    fn test_other_registry_does_not_recognize_instance() {
        let home = Registry::new();
        let away = Registry::new();
        let home_kind = home.create_kind("Same", ["a"], None).unwrap();
        let away_kind = away.create_kind("Same", ["a"], None).unwrap();
        let err = home_kind
            .new_error(ErrorOptions::new("x").with_context_value(json!({"a": 1})).unwrap())
            .unwrap();

        assert!(home_kind.get_context(&*err, ContextOptions::default()).is_some());
        assert!(away_kind.get_context(&*err, ContextOptions::default()).is_none());
    }

    #[test]
    fn test_foreign_error_is_none() {
        let registry = Registry::new();
        let kind = registry.create_kind("K", ["a"], None).unwrap();
        let fmt_err = std::fmt::Error;

        assert!(kind.get_context(&fmt_err, ContextOptions::default()).is_none());
    }
}
