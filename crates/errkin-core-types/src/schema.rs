//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent between the logging macros,
//! the warning emitted on parent synthesis failure, and test assertions.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_KIND: &str = "kind";
pub const FIELD_PARENT_KIND: &str = "parent_kind";

// Collection sizes
pub const FIELD_FIELD_COUNT: &str = "field_count";
pub const FIELD_KIND_COUNT: &str = "kind_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERROR: &str = "error";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_SYNTHESIS_FAILED: &str = "synthesis_failed";
