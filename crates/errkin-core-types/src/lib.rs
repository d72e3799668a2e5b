//! Core types shared across errkin crates
//!
//! - **Identity**: `InstanceId`, the key of the context store
//! - **Schema constants**: Canonical field keys and event names for logging

pub mod identity;
pub mod schema;

pub use identity::InstanceId;
