//! Kind catalog: declare kinds in YAML and load them into a registry
//!
//! ```yaml
//! schema_version: 0
//! kinds:
//!   - name: Base
//!     fields: [severity]
//!   - name: Data
//!     parent: Base
//!     fields: [source]
//! ```

pub mod format_v0;
pub mod loader;
pub mod parser;

pub use format_v0::{CatalogKind, CatalogV0};
pub use loader::load_catalog;
pub use parser::{parse_catalog_file, parse_catalog_str};
