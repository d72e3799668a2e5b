//! Kind factory
//!
//! Produces `Kind` descriptors and registers them, together with their own
//! field names, in a `Registry`. Registering an existing name replaces the
//! earlier entry for future lookups; instances already built are untouched.

use std::sync::Arc;
use std::time::Instant;

use crate::errors::{ErrkinError, Result};
use crate::model::{ContextGuard, ContextMap, Kind, KindRef};
use crate::store::class_keys::normalize_fields;
use crate::store::Registry;
use crate::{log_op_end, log_op_error, log_op_start};

const OP_CREATE_KIND: &str = "create_kind";

/// Empty own-field list, for kinds that only refine their parent
pub const NO_FIELDS: &[&str] = &[];

/// Create a kind in the process-wide registry
///
/// # Errors
///
/// Returns `EmptyKindName` if `name` is empty or whitespace-only.
///
/// # Example
///
/// ```
/// use errkin_core::{create_custom_error, ErrorOptions};
/// use serde_json::json;
///
/// let base = create_custom_error("DocBase", ["severity"], None).unwrap();
/// let data = create_custom_error("DocData", ["source"], Some(&base)).unwrap();
///
/// let err = data
///     .new_error(ErrorOptions::new("x").with_context_value(json!({"severity": "high", "source": "db"})).unwrap())
///     .unwrap();
/// assert!(err.to_string().starts_with("DocData: x"));
/// ```
pub fn create_custom_error<I, S>(
    name: &str,
    own_fields: I,
    parent: Option<&KindRef>,
) -> Result<KindRef>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Registry::global().create_kind(name, own_fields, parent)
}

/// Builder for a kind with optional parent and context guard
#[must_use]
pub struct KindBuilder {
    registry: Registry,
    name: String,
    own_fields: Vec<String>,
    parent: Option<KindRef>,
    guard: Option<ContextGuard>,
}

impl KindBuilder {
    fn new(registry: Registry, name: &str) -> Self {
        Self {
            registry,
            name: name.to_string(),
            own_fields: Vec::new(),
            parent: None,
            guard: None,
        }
    }

    /// Declare one own field
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.own_fields.push(field.into());
        self
    }

    /// Declare several own fields
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.own_fields
            .extend(fields.into_iter().map(|f| f.as_ref().to_string()));
        self
    }

    /// Declare the parent kind
    pub fn parent(mut self, parent: &KindRef) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Attach a guard run against the merged context of every new instance
    pub fn guard<F>(mut self, guard: F) -> Self
    where
        F: Fn(&ContextMap) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        self.guard = Some(Arc::new(guard));
        self
    }

    /// Create and register the kind
    ///
    /// # Errors
    ///
    /// Returns `EmptyKindName` if the name is empty or whitespace-only.
    pub fn build(self) -> Result<KindRef> {
        let started = Instant::now();
        log_op_start!(OP_CREATE_KIND, kind = %self.name);

        if self.name.trim().is_empty() {
            let err = ErrkinError::EmptyKindName;
            log_op_error!(
                OP_CREATE_KIND,
                err.clone(),
                duration_ms = started.elapsed().as_millis() as u64
            );
            return Err(err);
        }

        let own_fields = normalize_fields(&self.own_fields);
        self.registry
            .register_class_keys(&self.name, own_fields.clone());

        let kind = Arc::new(Kind::new(
            self.name,
            own_fields,
            self.parent,
            self.guard,
            self.registry.downgrade(),
        ));

        if self.registry.register_kind(kind.clone()) {
            tracing::debug!(
                component = module_path!(),
                op = OP_CREATE_KIND,
                kind = %kind.name(),
                "kind redefined; later lookups resolve to the new definition"
            );
        }

        log_op_end!(
            OP_CREATE_KIND,
            duration_ms = started.elapsed().as_millis() as u64,
            kind = %kind.name(),
            parent_kind = ?kind.parent().map(|p| p.name().to_string()),
            field_count = kind.own_fields().len() as u64,
        );

        Ok(kind)
    }
}

impl Registry {
    /// Create a kind in this registry
    ///
    /// # Errors
    ///
    /// Returns `EmptyKindName` if `name` is empty or whitespace-only.
    pub fn create_kind<I, S>(
        &self,
        name: &str,
        own_fields: I,
        parent: Option<&KindRef>,
    ) -> Result<KindRef>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = self.kind_builder(name).fields(own_fields);
        if let Some(parent) = parent {
            builder = builder.parent(parent);
        }
        builder.build()
    }

    /// Start building a kind in this registry
    pub fn kind_builder(&self, name: &str) -> KindBuilder {
        KindBuilder::new(self.clone(), name)
    }
}
