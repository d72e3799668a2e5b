//! Identity types for error instances
//!
//! Every constructed error instance carries an `InstanceId`. The context
//! store keys its side table on it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single error instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Generate a new InstanceId using UUIDv7 (time-ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_id_generation() {
        let id1 = InstanceId::new();
        let id2 = InstanceId::new();

        assert_ne!(id1, id2);
        assert!(!id1.to_string().is_empty());
    }

    #[test]
    fn test_instance_id_ordering_follows_creation() {
        let first = InstanceId::new();
        let second = InstanceId::new();

        assert!(first <= second);
    }

    #[test]
    fn test_instance_id_serializes_as_string() {
        let id = InstanceId::new();
        let json = serde_json::to_value(id).unwrap();

        assert_eq!(json.as_str(), Some(id.to_string().as_str()));
    }
}
