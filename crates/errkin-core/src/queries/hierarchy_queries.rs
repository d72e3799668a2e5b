use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::model::{ContextMap, CustomError, Kind};
use crate::traversal::parent_chain;

/// One node of a caused-by walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyEntry {
    pub name: String,
    pub message: String,

    /// Stored context, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextMap>,

    /// Ancestor kind names, oldest first, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inheritance_chain: Option<Vec<String>>,

    /// `"<name>: <message>"` of the immediate parent, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl HierarchyEntry {
    fn from_instance(instance: &CustomError) -> Self {
        let chain = instance.inheritance_names();
        Self {
            name: instance.name().to_string(),
            message: instance.message().to_string(),
            context: instance.stored_context(),
            inheritance_chain: (!chain.is_empty()).then_some(chain),
            parent: instance.parent().map(CustomError::summary),
        }
    }
}

/// Hierarchy records for `instance` and every ancestor instance
pub fn error_hierarchy(instance: &CustomError) -> Vec<HierarchyEntry> {
    parent_chain(instance)
        .into_iter()
        .map(HierarchyEntry::from_instance)
        .collect()
}

impl Kind {
    /// Walk the caused-by chain of `err`, producing one record per node
    ///
    /// Empty when `err` is not a `CustomError`.
    pub fn get_error_hierarchy(&self, err: &(dyn Error + 'static)) -> Vec<HierarchyEntry> {
        err.downcast_ref::<CustomError>()
            .map(error_hierarchy)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Registry;
    use crate::ErrorOptions;
    use serde_json::json;

    #[test]
    fn test_hierarchy_records_parent_summary() {
        let registry = Registry::new();
        let base = registry.create_kind("Base", ["severity"], None).unwrap();
        let data = registry.create_kind("Data", ["source"], Some(&base)).unwrap();
        let err = data
            .new_error(
                ErrorOptions::new("x")
                    .with_context_value(json!({"severity": "high", "source": "db"}))
                    .unwrap(),
            )
            .unwrap();

        let hierarchy = data.get_error_hierarchy(&*err);

        assert_eq!(hierarchy.len(), 2);
        assert_eq!(hierarchy[0].name, "Data");
        assert_eq!(hierarchy[0].parent.as_deref(), Some("Base: x"));
        assert_eq!(hierarchy[0].inheritance_chain, Some(vec!["Base".to_string()]));
        assert_eq!(hierarchy[1].name, "Base");
        assert_eq!(
            hierarchy[1].context,
            Some(json!({"severity": "high"}).as_object().unwrap().clone())
        );
        assert!(hierarchy[1].parent.is_none());
        assert!(hierarchy[1].inheritance_chain.is_none());
    }

    #[test]
    fn test_hierarchy_serializes_camel_case_and_skips_absent() {
        let entry = HierarchyEntry {
            name: "Data".to_string(),
            message: "x".to_string(),
            context: None,
            inheritance_chain: Some(vec!["Base".to_string()]),
            parent: None,
        };

        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(
            value,
            json!({"name": "Data", "message": "x", "inheritanceChain": ["Base"]})
        );
    }

    #[test]
    fn test_foreign_error_yields_empty_hierarchy() {
        let registry = Registry::new();
        let kind = registry.create_kind("K", crate::NO_FIELDS, None).unwrap();

        assert!(kind.get_error_hierarchy(&std::fmt::Error).is_empty());
    }
}
