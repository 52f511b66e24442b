//! Bridge from structured types to the flat legacy model.
//!
//! This is the only place in the workspace that flattens a `Type`. Shapes
//! the legacy model cannot express (disjunctive normal form, over-deep
//! nesting) yield `None` rather than an error.

use crate::annotated::AnnotatedType;
use crate::builtin::BuiltinKind;
use crate::errors::TypeError;
use crate::legacy::LegacyType;
use crate::limits::MAX_LEGACY_CONVERSION_DEPTH;
use crate::types::{GenericType, Type};
use tracing::{debug, trace};

/// Converts a type to its legacy representation.
///
/// - no type, or `mixed`: `None`
/// - `null`: `[null]` when `keep_null_type`, else `None`
/// - `void`: `[null]`
///
/// Every other type is flattened recursively; a shape without a legacy
/// equivalent gives `None`.
pub fn convert_type_to_legacy_types(
    ty: Option<&Type>,
    keep_null_type: bool,
) -> Option<Vec<LegacyType>> {
    let ty = ty?;
    match ty {
        Type::Builtin(BuiltinKind::Mixed) => None,
        Type::Builtin(BuiltinKind::Null) => {
            keep_null_type.then(|| vec![LegacyType::new(BuiltinKind::Null)])
        }
        Type::Builtin(BuiltinKind::Void) => Some(vec![LegacyType::new(BuiltinKind::Null)]),
        _ => match convert_type_to_legacy(&AnnotatedType::new(ty.clone()), 0) {
            Ok(legacy) => {
                trace!(ty = %ty, count = legacy.len(), "converted type to legacy types");
                Some(legacy)
            }
            Err(err) => {
                debug!(ty = %ty, error = %err, "type has no legacy representation");
                None
            }
        },
    }
}

/// Removes `null` from a union. Non-unions are returned unchanged and a
/// single remaining member is returned bare.
pub fn unwrap_nullable_type(ty: &Type) -> Type {
    match ty {
        Type::Union(union) => union.as_non_nullable(),
        other => other.clone(),
    }
}

fn convert_type_to_legacy(
    annotated: &AnnotatedType,
    depth: usize,
) -> Result<Vec<LegacyType>, TypeError> {
    if depth > MAX_LEGACY_CONVERSION_DEPTH {
        return Err(TypeError::logic(format!(
            "type nesting exceeds {MAX_LEGACY_CONVERSION_DEPTH} levels"
        )));
    }

    match annotated.ty() {
        Type::Union(union) => {
            let nullable = annotated.is_nullable();
            let mut out = Vec::new();
            for member in union.members() {
                match member {
                    Type::Builtin(BuiltinKind::Null) => continue,
                    Type::Intersection(_) => {
                        return Err(TypeError::logic(
                            "DNF types are not supported by the legacy type model",
                        ));
                    }
                    _ => {}
                }
                let member = AnnotatedType::new(member.clone()).with_nullable(Some(nullable));
                out.extend(convert_type_to_legacy(&member, depth + 1)?);
            }
            Ok(out)
        }

        Type::Intersection(intersection) => {
            let mut out = Vec::new();
            for member in intersection.members() {
                out.extend(convert_type_to_legacy(
                    &AnnotatedType::new(member.clone()),
                    depth + 1,
                )?);
            }
            Ok(out)
        }

        Type::Collection(collection) => {
            let inner = AnnotatedType::new(collection.inner().clone())
                .with_nullable(annotated.nullable_override())
                .with_collection(true);
            convert_type_to_legacy(&inner, depth + 1)
        }

        Type::Generic(generic) => {
            convert_generic(generic, annotated, depth).map(|legacy| vec![legacy])
        }

        Type::Builtin(kind) => Ok(vec![
            LegacyType::new(*kind)
                .with_nullable(annotated.is_nullable())
                .with_collection(annotated.is_collection()),
        ]),

        Type::Object(object) => Ok(vec![
            LegacyType::object(object.class_name())
                .with_nullable(annotated.is_nullable())
                .with_collection(annotated.is_collection()),
        ]),
    }
}

fn convert_generic(
    generic: &GenericType,
    annotated: &AnnotatedType,
    depth: usize,
) -> Result<LegacyType, TypeError> {
    let main = unwrap_nullable_type(generic.main());
    let base = main.base_type()?;

    let mut legacy = match base {
        Type::Object(object) => LegacyType::object(object.class_name()),
        Type::Builtin(kind) => LegacyType::new(*kind),
        _ => {
            return Err(TypeError::logic(format!(
                "\"{}\" has no legacy base type",
                generic.main()
            )));
        }
    };

    let convert = |param: &Type| convert_type_to_legacy(&AnnotatedType::new(param.clone()), depth + 1);
    legacy = match generic.parameters() {
        [key, value] => legacy
            .with_key_types(convert(key)?)
            .with_value_types(convert(value)?),
        [value] => legacy
            .with_key_types(vec![LegacyType::new(BuiltinKind::Int)])
            .with_value_types(convert(value)?),
        _ => legacy,
    };

    Ok(legacy
        .with_nullable(annotated.is_nullable())
        .with_collection(true))
}
