//! CLI command implementations

pub mod inspect;
pub mod kinds;

use errkin_core::catalog::{load_catalog, parse_catalog_file};
use errkin_core::{KindRef, Registry};
use std::path::Path;

/// Load a catalog file into a fresh registry
fn load_registry(path: &Path) -> Result<(Registry, Vec<KindRef>), Box<dyn std::error::Error>> {
    let registry = Registry::new();
    let catalog = parse_catalog_file(path)?;
    let kinds = load_catalog(&registry, &catalog)?;
    Ok((registry, kinds))
}
