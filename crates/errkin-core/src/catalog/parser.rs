//! Catalog parser with validation
//!
//! Parses YAML and validates schema version, names, and parent ordering.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::format_v0::{CatalogV0, CATALOG_SCHEMA_VERSION};
use crate::errors::{ErrkinError, Result};
use crate::store::Registry;

fn catalog_invalid(reason: String) -> ErrkinError {
    ErrkinError::CatalogInvalid { reason }
}

/// Parse a catalog file from a path
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, otherwise as `parse_catalog_str`.
pub fn parse_catalog_file(path: &Path) -> Result<CatalogV0> {
    let content = fs::read_to_string(path).map_err(|e| ErrkinError::Io {
        operation: "catalog_read".to_string(),
        reason: format!("{}: {}", path.display(), e),
    })?;

    parse_catalog_str(&content, None)
}

/// Parse a catalog from a string
///
/// Parents must be declared earlier in the catalog, or already exist in
/// `registry` when one is given.
///
/// # Errors
///
/// Returns `CatalogInvalid` on YAML or validation failures and
/// `UnknownKind` for a parent that cannot be resolved.
pub fn parse_catalog_str(content: &str, registry: Option<&Registry>) -> Result<CatalogV0> {
    let catalog: CatalogV0 = serde_yaml::from_str(content)
        .map_err(|e| catalog_invalid(format!("YAML parse error: {}", e)))?;

    validate_catalog(&catalog, registry)?;

    Ok(catalog)
}

/// Validate a parsed catalog
pub(crate) fn validate_catalog(catalog: &CatalogV0, registry: Option<&Registry>) -> Result<()> {
    if catalog.schema_version != CATALOG_SCHEMA_VERSION {
        return Err(catalog_invalid(format!(
            "Unsupported schema_version: {}. Expected {}",
            catalog.schema_version, CATALOG_SCHEMA_VERSION
        )));
    }

    let mut declared: HashSet<&str> = HashSet::new();

    for (index, kind) in catalog.kinds.iter().enumerate() {
        if kind.name.trim().is_empty() {
            return Err(catalog_invalid(format!("Kind #{} has an empty name", index)));
        }

        if let Some(parent) = &kind.parent {
            let known = declared.contains(parent.as_str())
                || registry.is_some_and(|r| r.kind(parent).is_some());
            if !known {
                return Err(ErrkinError::UnknownKind {
                    name: parent.clone(),
                    referenced_by: kind.name.clone(),
                });
            }
        }

        declared.insert(kind.name.as_str());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_catalog() {
        let yaml = r#"
schema_version: 0
kinds:
  - name: Base
    fields: [severity]
  - name: Data
    parent: Base
    fields: [source]
"#;

        let catalog = parse_catalog_str(yaml, None).unwrap();

        assert_eq!(catalog.kinds.len(), 2);
        assert_eq!(catalog.kinds[1].parent.as_deref(), Some("Base"));
        assert_eq!(catalog.kinds[0].fields, vec!["severity"]);
    }

    #[test]
    fn test_reject_invalid_schema_version() {
        let yaml = "schema_version: 99\nkinds: []\n";

        let err = parse_catalog_str(yaml, None).unwrap_err();

        assert!(err.to_string().contains("schema_version"));
    }

    #[test]
    fn test_reject_forward_parent_reference() {
        let yaml = r#"
schema_version: 0
kinds:
  - name: Data
    parent: Base
  - name: Base
"#;

        let err = parse_catalog_str(yaml, None).unwrap_err();

        assert_eq!(
            err,
            ErrkinError::UnknownKind {
                name: "Base".to_string(),
                referenced_by: "Data".to_string(),
            }
        );
    }

    #[test]
    fn test_parent_resolved_from_registry() {
        let registry = Registry::new();
        registry.create_kind("Base", ["severity"], None).unwrap();
        let yaml = "schema_version: 0\nkinds:\n  - name: Data\n    parent: Base\n";

        assert!(parse_catalog_str(yaml, Some(&registry)).is_ok());
    }

    #[test]
    fn test_reject_empty_name() {
        let yaml = "schema_version: 0\nkinds:\n  - name: \"\"\n";

        let err = parse_catalog_str(yaml, None).unwrap_err();

        assert!(matches!(err, ErrkinError::CatalogInvalid { .. }));
    }

    #[test]
    fn test_reject_malformed_yaml() {
        let err = parse_catalog_str("schema_version: [", None).unwrap_err();

        assert!(err.to_string().contains("YAML parse error"));
    }
}
