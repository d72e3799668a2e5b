use errkin_core::{context_from_value, ContextMap, CustomError, ErrorOptions, KindRef, Registry};
use serde_json::Value;
use std::sync::Arc;

/// Build a context payload from a JSON literal
#[allow(dead_code)]
pub fn ctx(value: Value) -> ContextMap {
    context_from_value(value).unwrap()
}

/// Registry with Base(severity) <- Data(source)
#[allow(dead_code)]
pub fn base_and_data() -> (Registry, KindRef, KindRef) {
    let registry = Registry::new();
    let base = registry.create_kind("Base", ["severity"], None).unwrap();
    let data = registry
        .create_kind("Data", ["source"], Some(&base))
        .unwrap();
    (registry, base, data)
}

/// Registry with A(a1, a2) <- B(b1) <- C(c1, c2)
#[allow(dead_code)]
pub fn three_level_chain() -> (Registry, KindRef, KindRef, KindRef) {
    let registry = Registry::new();
    let a = registry.create_kind("A", ["a1", "a2"], None).unwrap();
    let b = registry.create_kind("B", ["b1"], Some(&a)).unwrap();
    let c = registry.create_kind("C", ["c1", "c2"], Some(&b)).unwrap();
    (registry, a, b, c)
}

/// Construct an instance of `kind` with a JSON context cause
#[allow(dead_code)]
pub fn with_context(kind: &KindRef, message: &str, value: Value) -> Arc<CustomError> {
    kind.new_error(ErrorOptions::new(message).with_cause(ctx(value)))
        .unwrap()
}
