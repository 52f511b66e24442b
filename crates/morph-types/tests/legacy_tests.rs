use super::*;
use crate::type_factory as t;

#[test]
fn test_from_name_validates_builtin() {
    let legacy = LegacyType::from_name("string").unwrap();
    assert_eq!(legacy.builtin_type(), BuiltinKind::String);
    assert!(!legacy.is_nullable());

    let err = LegacyType::from_name("str").unwrap_err();
    assert!(matches!(err, TypeError::InvalidArgument(_)));
}

#[test]
fn test_null_and_mixed_are_always_nullable() {
    for kind in [BuiltinKind::Null, BuiltinKind::Mixed] {
        assert!(LegacyType::new(kind).is_nullable());
        assert!(LegacyType::new(kind).with_nullable(false).is_nullable());
        assert!(LegacyType::new(kind).non_nullable().is_nullable());
    }
    let int = LegacyType::new(BuiltinKind::Int).with_nullable(true);
    assert!(!int.non_nullable().is_nullable());
}

#[test]
fn test_display() {
    assert_eq!(LegacyType::object("Address").with_nullable(true).to_string(), "?Address");
    assert_eq!(LegacyType::new(BuiltinKind::Null).to_string(), "null");

    let dict = LegacyType::new(BuiltinKind::Array)
        .with_collection(true)
        .with_key_types(vec![
            LegacyType::new(BuiltinKind::Int),
            LegacyType::new(BuiltinKind::String),
        ])
        .with_value_types(vec![LegacyType::new(BuiltinKind::String)]);
    assert_eq!(dict.to_string(), "array<int|string, string>");

    let values_only = LegacyType::new(BuiltinKind::Array)
        .with_collection(true)
        .with_value_types(vec![LegacyType::object("Foo")]);
    assert_eq!(values_only.to_string(), "array<int|string, Foo>");
}

#[test]
fn test_to_type_scalar_and_class() {
    assert_eq!(LegacyType::new(BuiltinKind::Int).to_type().unwrap(), t::int());
    assert_eq!(LegacyType::object("Foo").to_type().unwrap(), t::class("Foo"));
    assert_eq!(
        LegacyType::new(BuiltinKind::Object).to_type().unwrap(),
        t::object()
    );
    assert_eq!(
        LegacyType::new(BuiltinKind::String)
            .with_nullable(true)
            .to_type()
            .unwrap(),
        t::nullable(t::string())
    );
    assert_eq!(LegacyType::new(BuiltinKind::Null).to_type().unwrap(), t::null());
}

#[test]
fn test_to_type_defaults_missing_side() {
    let values_only = LegacyType::new(BuiltinKind::Array)
        .with_collection(true)
        .with_value_types(vec![LegacyType::new(BuiltinKind::Bool)]);
    assert_eq!(
        values_only.to_type().unwrap(),
        t::array(Some(t::bool()), None, false)
    );

    let keys_only = LegacyType::new(BuiltinKind::Array)
        .with_collection(true)
        .with_key_types(vec![LegacyType::new(BuiltinKind::String)]);
    assert_eq!(keys_only.to_type().unwrap(), t::dict(Some(t::mixed())));
}

#[test]
fn test_to_type_merges_several_entries_into_union() {
    let legacy = LegacyType::new(BuiltinKind::Array)
        .with_collection(true)
        .with_key_types(vec![LegacyType::new(BuiltinKind::Int)])
        .with_value_types(vec![
            LegacyType::new(BuiltinKind::Int),
            LegacyType::new(BuiltinKind::Float),
            LegacyType::new(BuiltinKind::Int),
        ]);
    assert_eq!(legacy.to_type().unwrap().to_string(), "array<int, int|float>");
}

#[test]
fn test_to_type_wraps_object_collections() {
    let legacy = LegacyType::object("Collection")
        .with_collection(true)
        .with_key_types(vec![LegacyType::new(BuiltinKind::Int)])
        .with_value_types(vec![LegacyType::object("Foo")]);
    assert_eq!(
        legacy.to_type().unwrap(),
        t::collection(t::class("Collection"), Some(t::class("Foo")), Some(t::int()))
    );
}

#[test]
fn test_to_annotated_keeps_flags() {
    let annotated = LegacyType::new(BuiltinKind::Int)
        .with_collection(true)
        .to_annotated()
        .unwrap();
    assert!(annotated.is_collection());
    assert!(!annotated.is_nullable());
    assert_eq!(annotated.ty(), &t::int());
}

#[test]
fn test_serialize_skips_empty_fields() {
    let json = serde_json::to_value(LegacyType::object("Foo")).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "builtinType": "object",
            "nullable": false,
            "className": "Foo",
            "collection": false
        })
    );
}
