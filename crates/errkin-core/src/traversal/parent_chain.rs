use std::error::Error;

use crate::model::{CustomError, Kind};

/// Caused-by chain starting at `instance`: `[instance, parent, grandparent, ...]`
///
/// Parents are fixed at construction and must exist before their child,
/// so the walk always terminates.
pub fn parent_chain(instance: &CustomError) -> Vec<&CustomError> {
    let mut chain = Vec::new();
    let mut current = Some(instance);

    while let Some(node) = current {
        chain.push(node);
        current = node.parent();
    }

    chain
}

impl Kind {
    /// Follow the caused-by chain of `err`
    ///
    /// Empty when `err` is not a `CustomError`.
    pub fn follow_parent_chain<'a>(
        &self,
        err: &'a (dyn Error + 'static),
    ) -> Vec<&'a CustomError> {
        err.downcast_ref::<CustomError>()
            .map(parent_chain)
            .unwrap_or_default()
    }
}
