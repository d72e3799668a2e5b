//! Catalog Format v0 schema

use serde::{Deserialize, Serialize};

/// Supported `schema_version`
pub const CATALOG_SCHEMA_VERSION: u32 = 0;

/// Top-level catalog file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Kinds in declaration order; parents come before children
    #[serde(default)]
    pub kinds: Vec<CatalogKind>,
}

/// Kind declaration in a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogKind {
    pub name: String,

    /// Name of the declared parent kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Own context fields
    #[serde(default)]
    pub fields: Vec<String>,
}
