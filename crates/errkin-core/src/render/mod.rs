pub mod snapshot;
pub mod text;

pub use snapshot::{ErrorSnapshot, ParentSnapshot};
pub use text::render_error;
