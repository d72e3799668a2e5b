pub mod ancestry;
pub mod parent_chain;

pub use parent_chain::parent_chain;
