//! Instance construction and context merge
//!
//! One generic routine builds instances of every kind. When the cause is a
//! context payload and the kind has an effective parent, a parent instance
//! of that kind is synthesized from the fields it and its ancestors declare
//! as their own. This recurses up the declared ancestry. A failed synthesis
//! is logged and leaves the child without a parent; it never fails the child.

use std::backtrace::Backtrace;
use std::fmt;
use std::sync::Arc;

use errkin_core_types::InstanceId;
use serde_json::Value;

use crate::errors::Result;
use crate::log_op_warn;
use crate::model::context::{context_from_value, pick_fields};
use crate::model::{ContextMap, CustomError, Kind, KindRef};

/// Message used when none is given
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

const OP_SYNTHESIZE_PARENT: &str = "synthesize_parent";

/// What caused an error
pub enum Cause {
    /// Another instance; becomes the parent and seeds the context
    Error(Arc<CustomError>),
    /// A plain message; becomes a bare parent instance
    Message(String),
    /// Context payload merged into the new instance
    Context(ContextMap),
    /// Any other error; treated like a message cause
    Foreign(Box<dyn std::error::Error + Send + Sync>),
}

impl Cause {
    /// Interpret a JSON value: objects are context, everything else a message
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Cause::Context(map),
            Value::String(text) => Cause::Message(text),
            other => Cause::Message(other.to_string()),
        }
    }

    /// Wrap a foreign error
    pub fn foreign<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Cause::Foreign(Box::new(err))
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Error(err) => f.debug_tuple("Error").field(&err.summary()).finish(),
            Cause::Message(text) => f.debug_tuple("Message").field(text).finish(),
            Cause::Context(ctx) => f.debug_tuple("Context").field(ctx).finish(),
            Cause::Foreign(err) => f.debug_tuple("Foreign").field(&err.to_string()).finish(),
        }
    }
}

impl From<Arc<CustomError>> for Cause {
    fn from(err: Arc<CustomError>) -> Self {
        Cause::Error(err)
    }
}

impl From<&Arc<CustomError>> for Cause {
    fn from(err: &Arc<CustomError>) -> Self {
        Cause::Error(err.clone())
    }
}

impl From<String> for Cause {
    fn from(text: String) -> Self {
        Cause::Message(text)
    }
}

impl From<&str> for Cause {
    fn from(text: &str) -> Self {
        Cause::Message(text.to_string())
    }
}

impl From<ContextMap> for Cause {
    fn from(ctx: ContextMap) -> Self {
        Cause::Context(ctx)
    }
}

/// Per-construction override of the declared parent kind
#[derive(Debug, Clone, Default)]
pub enum Inherits {
    /// Use the kind's declared parent
    #[default]
    Declared,
    /// Treat the instance as having no parent kind
    Root,
    /// Use this kind as the effective parent
    Kind(KindRef),
}

/// Constructor options for `Kind::new_error`
#[derive(Debug, Default)]
pub struct ErrorOptions {
    pub message: String,
    pub cause: Option<Cause>,
    pub capture_stack: bool,
    pub inherits: Inherits,
}

impl ErrorOptions {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Use a JSON object as the context cause
    ///
    /// # Errors
    ///
    /// Returns `InvalidContext` unless `value` is a JSON object.
    pub fn with_context_value(self, value: Value) -> Result<Self> {
        let ctx = context_from_value(value)?;
        Ok(self.with_cause(ctx))
    }

    /// Capture a stack trace on the new instance
    pub fn with_stack(mut self) -> Self {
        self.capture_stack = true;
        self
    }

    /// Override the effective parent kind
    pub fn inherits(mut self, kind: &KindRef) -> Self {
        self.inherits = Inherits::Kind(kind.clone());
        self
    }

    /// Build with no effective parent kind
    pub fn inherits_root(mut self) -> Self {
        self.inherits = Inherits::Root;
        self
    }
}

impl Kind {
    /// Construct an instance of this kind
    ///
    /// # Errors
    ///
    /// Returns `ContextRejected` if this kind's guard refuses the merged
    /// context, or `RegistryReleased` if this kind's registry is gone.
    /// Failures while synthesizing ancestor instances are logged
    /// and never returned.
    pub fn new_error(self: &Arc<Self>, options: ErrorOptions) -> Result<Arc<CustomError>> {
        let ErrorOptions {
            message,
            cause,
            capture_stack,
            inherits,
        } = options;

        let registry = self.live_registry()?;

        let message = if message.is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        };

        let effective_parent = match inherits {
            Inherits::Declared => self.parent.clone(),
            Inherits::Root => None,
            Inherits::Kind(kind) => Some(kind),
        };

        let mut synthesize = false;
        let (context, mut parent) = match cause {
            None => (ContextMap::new(), None),
            Some(Cause::Error(err)) => (err.stored_context().unwrap_or_default(), Some(err)),
            Some(Cause::Message(text)) => {
                (ContextMap::new(), Some(CustomError::bare(text, &registry)))
            }
            Some(Cause::Foreign(err)) => (
                ContextMap::new(),
                Some(CustomError::bare(err.to_string(), &registry)),
            ),
            Some(Cause::Context(payload)) => {
                synthesize = true;
                (payload, None)
            }
        };

        self.check_guard(&context)?;

        if synthesize {
            if let Some(parent_kind) = &effective_parent {
                parent = self.synthesize_parent(parent_kind, &message, &context);
            }
        }

        let inheritance_chain = match &effective_parent {
            Some(parent_kind) => {
                let mut chain = parent_kind.ancestors();
                chain.push(parent_kind.clone());
                chain
            }
            None => Vec::new(),
        };

        let stack = capture_stack.then(|| Backtrace::force_capture().to_string());
        let stored = (!context.is_empty()).then(|| context.clone());

        let instance = Arc::new(CustomError {
            id: InstanceId::new(),
            name: self.name.clone(),
            message,
            kind: Some(self.clone()),
            context: stored,
            parent,
            inheritance_chain,
            stack,
            registry: registry.clone(),
        });

        registry.store_context(&instance, context);

        Ok(instance)
    }

    fn synthesize_parent(
        &self,
        parent_kind: &KindRef,
        message: &str,
        context: &ContextMap,
    ) -> Option<Arc<CustomError>> {
        let payload = parent_payload(parent_kind, context);
        let options = ErrorOptions::new(message).with_cause(payload);

        match parent_kind.new_error(options) {
            Ok(parent) => Some(parent),
            Err(err) => {
                log_op_warn!(
                    OP_SYNTHESIZE_PARENT,
                    err,
                    kind = %self.name,
                    parent_kind = %parent_kind.name(),
                    "parent synthesis failed; instance built without parent"
                );
                None
            }
        }
    }
}

/// Fields claimed by `parent_kind`, then by its ancestors nearest first
///
/// A field already claimed is never overwritten.
fn parent_payload(parent_kind: &KindRef, context: &ContextMap) -> ContextMap {
    let mut payload = pick_fields(context, &parent_kind.registered_fields());

    for ancestor in parent_kind.ancestors().iter().rev() {
        for field in ancestor.registered_fields() {
            if payload.contains_key(&field) {
                continue;
            }
            if let Some(value) = context.get(&field) {
                payload.insert(field, value.clone());
            }
        }
    }

    payload
}
