//! Structured type -> legacy -> structured type.
//!
//! Only shapes the legacy model can express are checked: nullability, class
//! identity and collection key/value types must survive the round trip.

use morph_types::type_factory as t;
use morph_types::{BuiltinKind, Type, convert_type_to_legacy_types};

fn round_trip(ty: &Type) -> Type {
    let legacy = convert_type_to_legacy_types(Some(ty), true)
        .unwrap_or_else(|| panic!("{ty} has a legacy representation"));
    assert_eq!(legacy.len(), 1, "{ty} converts to a single legacy type");
    legacy[0]
        .to_type()
        .unwrap_or_else(|err| panic!("{ty} converts back: {err}"))
}

#[test]
fn test_scalars_round_trip() {
    for kind in [
        BuiltinKind::Int,
        BuiltinKind::Float,
        BuiltinKind::String,
        BuiltinKind::Bool,
        BuiltinKind::Resource,
        BuiltinKind::Callable,
    ] {
        let ty = t::builtin(kind);
        assert_eq!(round_trip(&ty), ty);
    }
}

#[test]
fn test_nullable_scalars_round_trip() {
    for ty in [t::nullable(t::int()), t::nullable(t::string()), t::nullable(t::float())] {
        let back = round_trip(&ty);
        assert!(back.is_nullable());
        assert_eq!(back, ty);
    }
}

#[test]
fn test_classes_round_trip() {
    let ty = t::class("Address");
    assert_eq!(round_trip(&ty), ty);

    let nullable = t::nullable(t::class("Address"));
    let back = round_trip(&nullable);
    assert_eq!(back, nullable);
    assert_eq!(back.class_name().unwrap(), "Address");
}

#[test]
fn test_lists_round_trip() {
    for ty in [
        t::list(Some(t::int())),
        t::list(Some(t::class("Foo"))),
        t::nullable(t::list(Some(t::string()))),
        t::list(Some(t::list(Some(t::float())))),
    ] {
        let back = round_trip(&ty);
        assert_eq!(back, ty);
        assert!(back.is_list());
    }
}

#[test]
fn test_dictionaries_round_trip() {
    let ty = t::dict(Some(t::class("Foo")));
    let back = round_trip(&ty);
    assert_eq!(back, ty);
    assert!(back.is_dict());
    assert_eq!(back.collection_value_type().unwrap(), t::class("Foo"));
}

#[test]
fn test_object_collection_round_trip() {
    let ty = t::collection(t::class("Collection"), Some(t::class("Foo")), Some(t::int()));
    let back = round_trip(&ty);
    assert_eq!(back, ty);
    assert!(back.is_collection());
    assert_eq!(back.collection_key_type().unwrap(), t::int());
    assert_eq!(back.collection_value_type().unwrap(), t::class("Foo"));
}

#[test]
fn test_unions_round_trip_member_wise() {
    let ty = t::nullable(t::union([t::int(), t::class("Foo")]).unwrap());
    let legacy = convert_type_to_legacy_types(Some(&ty), true).unwrap();
    let back: Vec<Type> = legacy.iter().map(|entry| entry.to_type().unwrap()).collect();
    assert_eq!(back, vec![t::nullable(t::int()), t::nullable(t::class("Foo"))]);
}
