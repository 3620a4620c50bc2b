//! Unit tests for value identity and rendering.

use rstest::rstest;
use std::sync::Arc;

use super::{Value, ValueType};
use crate::definition::DefinitionSource;

fn source(origin: &str) -> Arc<DefinitionSource> {
    Arc::new(DefinitionSource::new(origin, "module"))
}

#[rstest]
#[case(Value::string("x"), "x")]
#[case(Value::long(42), "42")]
#[case(Value::boolean(true), "true")]
#[case(Value::double(1.5), "1.5")]
#[case(Value::binary(b"bytes".to_vec()), "bytes")]
#[case(Value::resource(ValueType::Binary, "logo.png"), "logo.png")]
fn renders_as_string(#[case] value: Value, #[case] expected: &str) {
    assert_eq!(value.as_string(), expected);
}

#[test]
fn type_tag_participates_in_equality() {
    assert_ne!(Value::string("nt:base"), Value::name("nt:base"));
    assert_eq!(Value::name("nt:base"), Value::name("nt:base"));
}

#[test]
fn path_flag_participates_in_equality() {
    let plain = Value::typed_text(ValueType::Reference, "/content");
    let as_path = Value::path_reference(ValueType::Reference, "/content");
    assert_ne!(plain, as_path);
}

#[test]
fn resources_compare_by_source() {
    let a = Value::resource(ValueType::Binary, "logo.png").with_source(source("a.yaml"));
    let same_origin = Value::resource(ValueType::Binary, "logo.png").with_source(source("a.yaml"));
    let other_origin = Value::resource(ValueType::Binary, "logo.png").with_source(source("b.yaml"));
    assert_eq!(a, same_origin);
    assert_ne!(a, other_origin);
}

#[test]
fn plain_values_ignore_source() {
    let a = Value::string("x").with_source(source("a.yaml"));
    let b = Value::string("x").with_source(source("b.yaml"));
    assert_eq!(a, b);
}

#[test]
fn cloning_a_resource_keeps_its_source() {
    let original = Value::resource(ValueType::String, "body.html").with_source(source("a.yaml"));
    let copy = original.clone();
    let origin = copy.source().map(|s| s.origin().to_owned());
    assert_eq!(origin.as_deref(), Some("a.yaml"));
    assert_eq!(copy, original);
}

#[test]
fn make_resource_swaps_payload_for_reference() {
    let mut value = Value::binary(vec![0, 1, 2]);
    value.make_resource("data.bin");
    assert!(value.is_resource());
    assert_eq!(value.as_string(), "data.bin");
    assert_eq!(value.value_type(), ValueType::Binary);
}
