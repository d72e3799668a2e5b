use std::collections::HashMap;
use std::sync::{Arc, Weak};

use errkin_core_types::InstanceId;

use crate::model::{ContextMap, CustomError};

#[derive(Debug)]
struct StoredContext {
    owner: Weak<CustomError>,
    context: ContextMap,
}

/// Side table from error instance to its merged context
///
/// Entries hold only a weak reference to their instance, so the table never
/// keeps an instance alive. `CustomError`'s `Drop` releases its entry;
/// `prune` sweeps anything left behind by instances whose registry was
/// replaced. Plain single-threaded table; `Registry` owns the locking.
#[derive(Debug, Default)]
pub struct ContextStore {
    entries: HashMap<InstanceId, StoredContext>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `context` for `instance`; empty contexts are never stored
    pub fn insert(&mut self, instance: &Arc<CustomError>, context: ContextMap) -> bool {
        if context.is_empty() {
            return false;
        }
        self.entries.insert(
            instance.id(),
            StoredContext {
                owner: Arc::downgrade(instance),
                context,
            },
        );
        true
    }

    /// Stored context for exactly this instance
    ///
    /// Both the id and the object identity must match.
    pub fn get(&self, instance: &CustomError) -> Option<&ContextMap> {
        self.entries
            .get(&instance.id())
            .filter(|entry| std::ptr::eq(entry.owner.as_ptr(), instance))
            .map(|entry| &entry.context)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Drop the entry for `id`, returning whether one existed
    pub fn release(&mut self, id: InstanceId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Remove entries whose instance is gone; returns the number removed
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.owner.strong_count() > 0);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
