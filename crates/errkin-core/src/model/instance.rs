use std::fmt;
use std::sync::Arc;

use errkin_core_types::InstanceId;
use serde_json::Value;

use super::context::ContextMap;
use super::kind::KindRef;
use crate::render;
use crate::store::Registry;

/// Name given to bare parent instances synthesized from a message cause
pub const BARE_ERROR_NAME: &str = "Error";

/// CustomError - a concrete error instance created from a Kind
///
/// Carries its kind's name, a message, the merged context, an optional
/// caused-by parent, and the inheritance chain derived at construction.
/// Nothing changes after construction. The parent link is shared, so one
/// instance may cause several others.
pub struct CustomError {
    pub(crate) id: InstanceId,
    pub(crate) name: String,
    pub(crate) message: String,
    pub(crate) kind: Option<KindRef>,
    pub(crate) context: Option<ContextMap>,
    pub(crate) parent: Option<Arc<CustomError>>,
    pub(crate) inheritance_chain: Vec<KindRef>,
    pub(crate) stack: Option<String>,
    pub(crate) registry: Registry,
}

impl CustomError {
    /// Minimal unlabeled instance carrying only a message
    pub(crate) fn bare(message: String, registry: &Registry) -> Arc<Self> {
        Arc::new(Self {
            id: InstanceId::new(),
            name: BARE_ERROR_NAME.to_string(),
            message,
            kind: None,
            context: None,
            parent: None,
            inheritance_chain: Vec::new(),
            stack: None,
            registry: registry.clone(),
        })
    }

    /// Unique identity of this instance
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Name of the kind this instance was built from
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Kind this instance was built from; `None` for bare instances
    pub fn kind(&self) -> Option<&KindRef> {
        self.kind.as_ref()
    }

    /// Merged context, if non-empty
    pub fn context(&self) -> Option<&ContextMap> {
        self.context.as_ref()
    }

    /// Read one merged-context field directly
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.context.as_ref().and_then(|ctx| ctx.get(name))
    }

    /// Immediate caused-by parent
    pub fn parent(&self) -> Option<&CustomError> {
        self.parent.as_deref()
    }

    /// Shared handle to the immediate parent, for reuse as another cause
    pub fn parent_handle(&self) -> Option<&Arc<CustomError>> {
        self.parent.as_ref()
    }

    /// Ancestor kinds of the effective kind, oldest first
    pub fn inheritance_chain(&self) -> &[KindRef] {
        &self.inheritance_chain
    }

    pub fn inheritance_names(&self) -> Vec<String> {
        self.inheritance_chain
            .iter()
            .map(|kind| kind.name().to_string())
            .collect()
    }

    /// Captured stack trace, when requested at construction
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    /// True for parents synthesized from a message or foreign error
    pub fn is_bare(&self) -> bool {
        self.kind.is_none()
    }

    /// `"<name>: <message>"`
    pub fn summary(&self) -> String {
        format!("{}: {}", self.name, self.message)
    }

    /// Context as recorded in the owning registry's context store
    pub fn stored_context(&self) -> Option<ContextMap> {
        self.registry.stored_context(self)
    }
}

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::text::write_error(f, self)
    }
}

impl fmt::Debug for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomError")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("message", &self.message)
            .field("context", &self.context)
            .field("inheritance_chain", &self.inheritance_names())
            .field("parent", &self.parent)
            .field("stack", &self.stack.is_some())
            .finish()
    }
}

impl std::error::Error for CustomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.parent
            .as_deref()
            .map(|parent| parent as &(dyn std::error::Error + 'static))
    }
}

impl Drop for CustomError {
    fn drop(&mut self) {
        self.registry.release_context(self.id);
    }
}
