//! Read-only inspection of kinds and instances
//!
//! None of these operations fail: anything that is not a recognized
//! instance yields `None` or an empty sequence.

pub mod context_queries;
pub mod hierarchy_queries;
pub mod type_guard;

pub use hierarchy_queries::{error_hierarchy, HierarchyEntry};
pub use type_guard::{as_instance_of, is_instance_of};
