//! Structured snapshot of an instance for structured logging / JSON transport

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;
use crate::model::{ContextMap, CustomError};

/// Plain record describing an instance and its immediate parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSnapshot {
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inheritance_chain: Option<Vec<String>>,
}

/// Immediate parent as it appears in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentSnapshot {
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextMap>,
}

impl CustomError {
    /// Structured snapshot of this instance
    pub fn to_structured_snapshot(&self) -> ErrorSnapshot {
        let chain = self.inheritance_names();
        ErrorSnapshot {
            name: self.name().to_string(),
            message: self.message().to_string(),
            stack: self.stack().map(str::to_string),
            context: self.context().cloned(),
            parent: self.parent().map(|parent| ParentSnapshot {
                name: parent.name().to_string(),
                message: parent.message().to_string(),
                context: parent.context().cloned(),
            }),
            inheritance_chain: (!chain.is_empty()).then_some(chain),
        }
    }

    /// Snapshot as a JSON value
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the snapshot cannot be encoded.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_structured_snapshot())?)
    }
}
