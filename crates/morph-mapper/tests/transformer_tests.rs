use super::*;
use morph_types::{BuiltinKind, LegacyType};

fn address_mapping() -> Transformer {
    Transformer::Object {
        source: LegacyType::object("Address"),
        target: LegacyType::object("AddressDto"),
    }
}

#[test]
fn test_display_nests_wrappers() {
    let transformer = Transformer::nullable(Transformer::array(address_mapping()), true);
    assert_eq!(
        transformer.to_string(),
        "nullable(array(object(Address -> AddressDto)))"
    );
}

#[test]
fn test_display_builtin_targets() {
    let cast = Transformer::Builtin {
        source: LegacyType::new(BuiltinKind::Int),
        targets: vec![
            LegacyType::new(BuiltinKind::String),
            LegacyType::new(BuiltinKind::Float).with_nullable(true),
        ],
    };
    assert_eq!(cast.to_string(), "builtin(int -> string|?float)");

    let any = Transformer::Builtin {
        source: LegacyType::new(BuiltinKind::Int),
        targets: Vec::new(),
    };
    assert_eq!(any.to_string(), "builtin(int -> *)");
}

#[test]
fn test_display_object_to_array() {
    let transformer = Transformer::Object {
        source: LegacyType::object("Address"),
        target: LegacyType::new(BuiltinKind::Array),
    };
    assert_eq!(transformer.to_string(), "object(Address -> array)");
}

#[test]
fn test_display_multiple_branches() {
    let transformer = Transformer::Multiple {
        branches: vec![
            MultipleBranch {
                source: LegacyType::new(BuiltinKind::String),
                transformer: Transformer::Copy,
            },
            MultipleBranch {
                source: LegacyType::object("Status"),
                transformer: Transformer::SourceEnum,
            },
        ],
    };
    assert_eq!(transformer.to_string(), "multiple(string: copy, Status: source_enum)");
}

#[test]
fn test_depends_on_mapper_looks_through_wrappers() {
    assert!(address_mapping().depends_on_mapper());
    assert!(Transformer::dictionary(Transformer::nullable(address_mapping(), false)).depends_on_mapper());
    assert!(!Transformer::array(Transformer::Copy).depends_on_mapper());

    let multiple = Transformer::Multiple {
        branches: vec![MultipleBranch {
            source: LegacyType::object("Address"),
            transformer: address_mapping(),
        }],
    };
    assert!(multiple.depends_on_mapper());
}

#[test]
fn test_serializes_with_kind_tag() {
    let value = serde_json::to_value(Transformer::TargetEnum {
        class: "Status".to_string(),
    })
    .unwrap();
    assert_eq!(value, serde_json::json!({"kind": "target_enum", "class": "Status"}));

    let value = serde_json::to_value(Transformer::Copy).unwrap();
    assert_eq!(value, serde_json::json!({"kind": "copy"}));
}
