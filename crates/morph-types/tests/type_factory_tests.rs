use super::*;
use crate::type_factory as t;

fn sample_types() -> Vec<Type> {
    vec![
        t::int(),
        t::null(),
        t::mixed(),
        t::class("Foo"),
        t::list(Some(t::string())),
        t::union([t::int(), t::string()]).unwrap(),
        t::union([t::null(), t::int()]).unwrap(),
        t::intersection([t::class("A"), t::class("B")]).unwrap(),
        t::collection(t::class("Collection"), Some(t::class("Foo")), None),
    ]
}

#[test]
fn test_nullable_is_idempotent() {
    for ty in sample_types() {
        let once = t::nullable(ty.clone());
        let twice = t::nullable(once.clone());
        assert_eq!(once, twice, "nullable twice on {ty}");
        assert!(once.is_nullable());
    }
}

#[test]
fn test_nullable_prepends_null() {
    assert_eq!(t::nullable(t::int()).to_string(), "null|int");

    let union = t::union([t::int(), t::string()]).unwrap();
    assert_eq!(t::nullable(union).to_string(), "null|int|string");

    assert_eq!(t::nullable(t::null()), t::null());
    assert_eq!(t::nullable(t::mixed()), t::mixed());
}

#[test]
fn test_nullable_array() {
    let ty = t::array(Some(t::int()), None, true);
    assert_eq!(ty.to_string(), "null|array<int|string, int>");
    assert!(ty.is_nullable());
}

#[test]
fn test_array_defaults_missing_parameter() {
    let value_only = t::array(Some(t::string()), None, false);
    assert_eq!(value_only.collection_key_type().unwrap(), t::array_key());
    assert_eq!(value_only.collection_value_type().unwrap(), t::string());

    let key_only = t::array(None, Some(t::int()), false);
    assert_eq!(key_only.collection_key_type().unwrap(), t::int());
    assert_eq!(key_only.collection_value_type().unwrap(), t::mixed());

    assert_eq!(t::array(None, None, false), t::builtin(BuiltinKind::Array));
}

#[test]
fn test_list_and_dict() {
    let list = t::list(Some(t::int()));
    assert!(list.is_list());
    assert_eq!(list.collection_key_type().unwrap(), t::int());
    assert_eq!(list.to_string(), "array<int, int>");

    let dict = t::dict(Some(t::class("Foo")));
    assert!(dict.is_dict());
    assert_eq!(dict.to_string(), "array<string, Foo>");
}

#[test]
fn test_iterable_of() {
    assert_eq!(t::iterable_of(None, None), t::iterable());
    let ty = t::iterable_of(Some(t::int()), Some(t::string()));
    assert_eq!(ty.to_string(), "iterable<string, int>");
    assert!(ty.is_dict());
}

#[test]
fn test_collection_helper() {
    let ty = t::collection(t::class("Collection"), None, None);
    assert!(matches!(ty, Type::Collection(_)));
    assert!(ty.is_collection());
    assert_eq!(ty.to_string(), "Collection");
}

#[test]
fn test_enum_helper() {
    let mut classes = ClassRegistry::new();
    classes.register("Suit", ClassInfo::unit_enum());
    classes.register("Status", ClassInfo::backed_enum(EnumBacking::Int));

    let unit = t::enum_type(&classes, "Suit", None).unwrap();
    assert_eq!(unit.as_object().unwrap().kind(), ObjectKind::Enum);

    let backed = t::enum_type(&classes, "Status", Some(t::int())).unwrap();
    assert_eq!(
        backed.as_object().unwrap().kind(),
        ObjectKind::BackedEnum(EnumBacking::Int)
    );
    assert_eq!(backed.to_string(), "Status");
}

#[test]
fn test_enum_helper_requires_registered_enum() {
    let mut classes = ClassRegistry::with_builtin_classes();
    classes.register("Suit", ClassInfo::unit_enum());
    classes.register("Status", ClassInfo::backed_enum(EnumBacking::Int));

    let err = t::enum_type(&classes, "NotAnEnum", Some(t::int())).unwrap_err();
    assert!(matches!(err, TypeError::InvalidArgument(_)));

    let err = t::enum_type(&classes, "NotAnEnum", None).unwrap_err();
    assert!(matches!(err, TypeError::InvalidArgument(_)));

    // Kind and backing must match the registered class.
    assert!(t::enum_type(&classes, "Suit", Some(t::int())).is_err());
    assert!(t::enum_type(&classes, "Status", None).is_err());
    assert!(t::enum_type(&classes, "Status", Some(t::string())).is_err());
}

#[test]
fn test_composite_helpers_enforce_invariants() {
    assert!(t::union([t::int()]).is_err());
    assert!(t::intersection(Vec::new()).is_err());
    assert!(t::union([t::int(), t::float()]).is_ok());
}
