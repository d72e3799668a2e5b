//! errkin core - structured, hierarchical error kinds
//!
//! This crate provides:
//! - A factory producing error kinds (`Kind`) that declare own context
//!   fields and an optional parent kind
//! - Instance construction that merges context and synthesizes parent
//!   instances along the declared ancestry
//! - A registry holding kinds, their own-field lists, and a weakly
//!   referenced context store
//! - Inspection: context lookup, caused-by hierarchy, parent chain walks,
//!   kind ancestry, and type guards
//! - Text rendering and structured JSON snapshots
//! - A YAML kind catalog and the logging/error facilities
//!
//! # Example
//!
//! ```
//! use errkin_core::{ContextOptions, ErrorOptions, Registry};
//! use serde_json::json;
//!
//! let registry = Registry::new();
//! let base = registry.create_kind("Base", ["severity"], None).unwrap();
//! let data = registry.create_kind("Data", ["source"], Some(&base)).unwrap();
//!
//! let err = data
//!     .new_error(
//!         ErrorOptions::new("x")
//!             .with_context_value(json!({"severity": "high", "source": "db"}))
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! let own = data.get_context(&*err, ContextOptions::own_only()).unwrap();
//! assert_eq!(own.get("source"), Some(&json!("db")));
//! assert_eq!(err.parent().unwrap().name(), "Base");
//! ```

pub mod catalog;
pub mod construct;
pub mod errors;
pub mod factory;
pub mod logging_facility;
pub mod model;
pub mod queries;
pub mod render;
pub mod store;
pub mod traversal;

pub use errkin_core_types::schema;
#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use construct::{Cause, ErrorOptions, Inherits, UNKNOWN_ERROR_MESSAGE};
pub use errors::{ErrkinError, ExError, ExErrorKind, Result};
pub use errkin_core_types::InstanceId;
pub use factory::{create_custom_error, KindBuilder, NO_FIELDS};
pub use model::{context_from_value, ContextMap, ContextOptions, CustomError, Kind, KindRef};
pub use queries::{as_instance_of, error_hierarchy, is_instance_of, HierarchyEntry};
pub use render::{render_error, ErrorSnapshot, ParentSnapshot};
pub use store::Registry;
pub use traversal::parent_chain;
