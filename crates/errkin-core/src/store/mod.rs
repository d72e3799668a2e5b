pub mod class_keys;
pub mod context_store;
pub mod registry;

pub use class_keys::ClassKeyRegistry;
pub use context_store::ContextStore;
pub use registry::Registry;
