use std::fmt;

use crate::model::CustomError;

/// Arrow used between kind names in the inheritance line
pub const CHAIN_SEPARATOR: &str = " -> ";

/// Render an instance as text
///
/// The first line is `"<name>: <message>"`. Optional lines follow:
/// - `Context: <json>` when the instance has merged context
/// - `Inheritance: A -> B` when the inheritance chain is non-empty
/// - `Parent: <name>: <message>` when a parent instance exists
pub fn render_error(err: &CustomError) -> String {
    err.to_string()
}

pub(crate) fn write_error(f: &mut fmt::Formatter<'_>, err: &CustomError) -> fmt::Result {
    write!(f, "{}: {}", err.name(), err.message())?;

    if let Some(context) = err.context() {
        let json = serde_json::to_string(context).map_err(|_| fmt::Error)?;
        write!(f, "\nContext: {}", json)?;
    }

    let chain = err.inheritance_names();
    if !chain.is_empty() {
        write!(f, "\nInheritance: {}", chain.join(CHAIN_SEPARATOR))?;
    }

    if let Some(parent) = err.parent() {
        write!(f, "\nParent: {}", parent.summary())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Registry;
    use crate::{ErrorOptions, NO_FIELDS};
    use serde_json::json;

    #[test]
    fn test_plain_error_is_single_line() {
        let registry = Registry::new();
        let kind = registry.create_kind("Plain", NO_FIELDS, None).unwrap();
        let err = kind.new_error(ErrorOptions::new("boom")).unwrap();

        assert_eq!(render_error(&err), "Plain: boom");
    }

    #[test]
    fn test_full_render_lines() {
        let registry = Registry::new();
        let a = registry.create_kind("A", ["a"], None).unwrap();
        let b = registry.create_kind("B", ["b"], Some(&a)).unwrap();
        let c = registry.create_kind("C", ["c"], Some(&b)).unwrap();
        let err = c
            .new_error(
                ErrorOptions::new("deep")
                    .with_context_value(json!({"c": 3}))
                    .unwrap(),
            )
            .unwrap();

        let rendered = render_error(&err);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines,
            vec![
                "C: deep",
                "Context: {\"c\":3}",
                "Inheritance: A -> B",
                "Parent: B: deep",
            ]
        );
    }
}
