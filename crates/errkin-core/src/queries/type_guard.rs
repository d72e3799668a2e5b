use std::error::Error;

use crate::model::{CustomError, Kind};

/// True when `err` is an instance of `kind` or of a kind declaring it as ancestor
///
/// Compares kinds by identity, so a redefined kind of the same name does
/// not match instances of the old one.
pub fn is_instance_of(err: &(dyn Error + 'static), kind: &Kind) -> bool {
    as_instance_of(err, kind).is_some()
}

/// Narrow `err` to a `CustomError` of `kind` (or a refinement of it)
pub fn as_instance_of<'a>(err: &'a (dyn Error + 'static), kind: &Kind) -> Option<&'a CustomError> {
    let instance = err.downcast_ref::<CustomError>()?;
    instance
        .kind()
        .filter(|own| own.refines(kind))
        .map(|_| instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Registry;
    use crate::{ErrorOptions, NO_FIELDS};

    #[test]
    fn test_instance_of_own_and_ancestor_kind() {
        let registry = Registry::new();
        let base = registry.create_kind("Base", NO_FIELDS, None).unwrap();
        let data = registry.create_kind("Data", NO_FIELDS, Some(&base)).unwrap();
        let other = registry.create_kind("Other", NO_FIELDS, None).unwrap();
        let err = data.new_error(ErrorOptions::new("x")).unwrap();

        assert!(is_instance_of(&*err, &data));
        assert!(is_instance_of(&*err, &base));
        assert!(!is_instance_of(&*err, &other));
    }

    #[test]
    fn test_redefined_kind_does_not_match_old_instances() {
        let registry = Registry::new();
        let old = registry.create_kind("Twin", NO_FIELDS, None).unwrap();
        let err = old.new_error(ErrorOptions::new("x")).unwrap();
        let new = registry.create_kind("Twin", NO_FIELDS, None).unwrap();

        assert!(is_instance_of(&*err, &old));
        assert!(!is_instance_of(&*err, &new));
    }

    #[test]
    fn test_bare_and_foreign_errors_never_match() {
        let registry = Registry::new();
        let kind = registry.create_kind("K", NO_FIELDS, None).unwrap();
        let err = kind
            .new_error(ErrorOptions::new("x").with_cause("plain"))
            .unwrap();
        let bare = err.parent().unwrap();

        assert!(!is_instance_of(bare, &kind));
        assert!(!is_instance_of(&std::fmt::Error, &kind));
        assert_eq!(as_instance_of(&*err, &kind).map(|e| e.message()), Some("x"));
    }
}
