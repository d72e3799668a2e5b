use std::collections::HashMap;
use std::time::Instant;

use super::format_v0::CatalogV0;
use super::parser::validate_catalog;
use crate::errors::{ErrkinError, Result};
use crate::model::KindRef;
use crate::store::Registry;
use crate::{log_op_end, log_op_error, log_op_start};

const OP_LOAD_CATALOG: &str = "load_catalog";

/// Create every catalog kind in `registry`, in declaration order
///
/// Parents resolve to kinds created earlier from the same catalog, then to
/// kinds already in the registry. A repeated name redefines the kind, as
/// with the factory.
///
/// # Errors
///
/// Returns the validation errors of `parse_catalog_str`, or a factory error.
pub fn load_catalog(registry: &Registry, catalog: &CatalogV0) -> Result<Vec<KindRef>> {
    let started = Instant::now();
    log_op_start!(OP_LOAD_CATALOG, kind_count = catalog.kinds.len() as u64);

    match create_kinds(registry, catalog) {
        Ok(kinds) => {
            log_op_end!(
                OP_LOAD_CATALOG,
                duration_ms = started.elapsed().as_millis() as u64,
                kind_count = kinds.len() as u64
            );
            Ok(kinds)
        }
        Err(err) => {
            log_op_error!(
                OP_LOAD_CATALOG,
                err.clone(),
                duration_ms = started.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

fn create_kinds(registry: &Registry, catalog: &CatalogV0) -> Result<Vec<KindRef>> {
    validate_catalog(catalog, Some(registry))?;

    let mut created: HashMap<&str, KindRef> = HashMap::new();
    let mut kinds = Vec::with_capacity(catalog.kinds.len());

    for decl in &catalog.kinds {
        let parent = match &decl.parent {
            Some(name) => Some(
                created
                    .get(name.as_str())
                    .cloned()
                    .or_else(|| registry.kind(name))
                    .ok_or_else(|| ErrkinError::UnknownKind {
                        name: name.clone(),
                        referenced_by: decl.name.clone(),
                    })?,
            ),
            None => None,
        };

        let kind = registry.create_kind(&decl.name, &decl.fields, parent.as_ref())?;
        created.insert(decl.name.as_str(), kind.clone());
        kinds.push(kind);
    }

    Ok(kinds)
}
