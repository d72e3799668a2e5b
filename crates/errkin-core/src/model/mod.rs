pub mod context;
pub mod instance;
pub mod kind;

pub use context::{context_from_value, ContextMap, ContextOptions};
pub use instance::CustomError;
pub use kind::{ContextGuard, Kind, KindRef};
