//! Canonical logging macros
//!
//! Every event carries `component`, `op` and `event`; the error macros add
//! `err.kind` and `err.code` from the structured error facility.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use errkin_core::log_op_start;
/// log_op_start!("create_kind");
/// log_op_start!("create_kind", kind = "Data");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use errkin_core::log_op_end;
/// log_op_end!("create_kind", duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use errkin_core::{log_op_error, errors::ErrkinError};
/// let err = ErrkinError::EmptyKindName;
/// log_op_error!("create_kind", err, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($field)*
        );
    }};
}

/// Log a recovered failure as a warning
///
/// Used where an operation absorbs an error and carries on, such as
/// parent synthesis during construction.
///
/// # Example
///
/// ```
/// # use errkin_core::{log_op_warn, errors::ErrkinError};
/// let err = ErrkinError::ContextRejected { kind: "Base".into(), reason: "no".into() };
/// log_op_warn!("synthesize_parent", err, kind = "Data");
/// ```
#[macro_export]
macro_rules! log_op_warn {
    ($op:expr, $err:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_SYNTHESIS_FAILED,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            "{}",
            ex_err,
        );
    }};
    ($op:expr, $err:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_SYNTHESIS_FAILED,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            error = %ex_err,
            $($field)*
        );
    }};
}
