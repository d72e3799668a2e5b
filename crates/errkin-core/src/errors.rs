use thiserror::Error;

/// Result type alias using ErrkinError
pub type Result<T> = std::result::Result<T, ErrkinError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable code used for programmatic handling, log
/// events, and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Factory
    InvalidName,

    // Construction
    ContextRejected,
    InvalidContext,

    // Catalog
    InvalidCatalog,
    NotFound,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidName => "ERR_INVALID_NAME",
            ExErrorKind::ContextRejected => "ERR_CONTEXT_REJECTED",
            ExErrorKind::InvalidContext => "ERR_INVALID_CONTEXT",
            ExErrorKind::InvalidCatalog => "ERR_INVALID_CATALOG",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Classification plus the context needed to report a failure in a log
/// event: the operation, the error kind name involved, and a message.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    kind_name: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            kind_name: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the name of the error kind involved
    pub fn with_kind_name(mut self, name: impl Into<String>) -> Self {
        self.kind_name = Some(name.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the error kind name, if any
    pub fn kind_name(&self) -> Option<&str> {
        self.kind_name.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(kind_name) = &self.kind_name {
            write!(f, " (kind: {})", kind_name)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Failures surfaced by the factory, construction and catalog layers
///
/// Inspection operations never fail; they report misses as `None` or an
/// empty sequence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrkinError {
    /// Kind name was empty or whitespace-only
    #[error("Kind name cannot be empty")]
    EmptyKindName,

    /// A kind's context guard refused the merged context
    #[error("Context rejected by kind {kind}: {reason}")]
    ContextRejected { kind: String, reason: String },

    /// A cause payload was not a JSON object
    #[error("Invalid context payload: {reason}")]
    InvalidContext { reason: String },

    /// Catalog failed schema or structural validation
    #[error("Invalid catalog: {reason}")]
    CatalogInvalid { reason: String },

    /// A kind (or declared parent) could not be resolved by name
    #[error("Unknown kind {name} referenced by {referenced_by}")]
    UnknownKind { name: String, referenced_by: String },

    /// Filesystem failure while reading a catalog
    #[error("IO error during {operation}: {reason}")]
    Io { operation: String, reason: String },

    /// JSON or YAML (de)serialization failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Every handle to the kind's registry was dropped
    #[error("Registry of kind {kind} has been released")]
    RegistryReleased { kind: String },
}

impl From<ErrkinError> for ExError {
    fn from(err: ErrkinError) -> Self {
        match err {
            ErrkinError::EmptyKindName => ExError::new(ExErrorKind::InvalidName)
                .with_op("create_kind")
                .with_message("Kind name cannot be empty"),

            ErrkinError::ContextRejected { kind, reason } => {
                ExError::new(ExErrorKind::ContextRejected)
                    .with_op("new_error")
                    .with_kind_name(kind)
                    .with_message(reason)
            }

            ErrkinError::InvalidContext { reason } => {
                ExError::new(ExErrorKind::InvalidContext).with_message(reason)
            }

            ErrkinError::CatalogInvalid { reason } => ExError::new(ExErrorKind::InvalidCatalog)
                .with_op("catalog_parse")
                .with_message(reason),

            ErrkinError::UnknownKind {
                name,
                referenced_by,
            } => ExError::new(ExErrorKind::NotFound)
                .with_kind_name(name)
                .with_message(format!("Referenced by {}", referenced_by)),

            ErrkinError::Io { operation, reason } => ExError::new(ExErrorKind::Io)
                .with_op(operation)
                .with_message(reason),

            ErrkinError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            ErrkinError::RegistryReleased { kind } => ExError::new(ExErrorKind::Internal)
                .with_op("new_error")
                .with_kind_name(kind)
                .with_message("registry released"),
        }
    }
}

/// Conversion from serde_json::Error to ErrkinError
impl From<serde_json::Error> for ErrkinError {
    fn from(err: serde_json::Error) -> Self {
        ErrkinError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from serde_yaml::Error to ErrkinError
impl From<serde_yaml::Error> for ErrkinError {
    fn from(err: serde_yaml::Error) -> Self {
        ErrkinError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_unique() {
        let kinds = [
            ExErrorKind::InvalidName,
            ExErrorKind::ContextRejected,
            ExErrorKind::InvalidContext,
            ExErrorKind::InvalidCatalog,
            ExErrorKind::NotFound,
            ExErrorKind::Io,
            ExErrorKind::Serialization,
            ExErrorKind::Internal,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_ex_error_display_includes_code_and_kind_name() {
        let err = ExError::new(ExErrorKind::ContextRejected)
            .with_op("new_error")
            .with_kind_name("Data")
            .with_message("missing source");

        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_CONTEXT_REJECTED]"));
        assert!(rendered.contains("new_error"));
        assert!(rendered.contains("(kind: Data)"));
    }

    #[test]
    fn test_serde_json_error_converts_to_serialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ErrkinError = json_err.into();
        assert!(matches!(err, ErrkinError::Serialization { .. }));
    }

    #[test]
    fn test_released_registry_maps_to_internal() {
        let ex: ExError = ErrkinError::RegistryReleased {
            kind: "Orphan".to_string(),
        }
        .into();

        assert_eq!(ex.kind(), ExErrorKind::Internal);
        assert_eq!(ex.code(), "ERR_INTERNAL");
    }
}
