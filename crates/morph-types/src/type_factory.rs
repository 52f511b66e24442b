//! Named constructors for building types.
//!
//! These helpers enforce the same invariants as the variant constructors;
//! they only exist to make composite construction short at call sites:
//!
//! ```
//! use morph_types::type_factory as t;
//!
//! let ty = t::nullable(t::list(Some(t::class("Address"))));
//! assert_eq!(ty.to_string(), "null|array<int, Address>");
//! ```

use crate::builtin::BuiltinKind;
use crate::classes::ClassRegistry;
use crate::errors::TypeError;
use crate::types::{
    CollectionType, GenericType, IntersectionType, ObjectType, Type, UnionType,
};

pub fn builtin(kind: BuiltinKind) -> Type {
    Type::Builtin(kind)
}

pub fn int() -> Type {
    Type::Builtin(BuiltinKind::Int)
}

pub fn float() -> Type {
    Type::Builtin(BuiltinKind::Float)
}

pub fn string() -> Type {
    Type::Builtin(BuiltinKind::String)
}

pub fn bool() -> Type {
    Type::Builtin(BuiltinKind::Bool)
}

pub fn resource() -> Type {
    Type::Builtin(BuiltinKind::Resource)
}

/// Anonymous object (`object` builtin, no class).
pub fn object() -> Type {
    Type::Builtin(BuiltinKind::Object)
}

pub fn false_type() -> Type {
    Type::Builtin(BuiltinKind::False)
}

pub fn true_type() -> Type {
    Type::Builtin(BuiltinKind::True)
}

pub fn callable() -> Type {
    Type::Builtin(BuiltinKind::Callable)
}

pub fn iterable() -> Type {
    Type::Builtin(BuiltinKind::Iterable)
}

pub fn mixed() -> Type {
    Type::Builtin(BuiltinKind::Mixed)
}

pub fn null() -> Type {
    Type::Builtin(BuiltinKind::Null)
}

pub fn void() -> Type {
    Type::Builtin(BuiltinKind::Void)
}

pub fn never() -> Type {
    Type::Builtin(BuiltinKind::Never)
}

/// `int|string`, the key type of an unparameterized collection.
pub fn array_key() -> Type {
    Type::Union(UnionType::from_distinct(vec![int(), string()]))
}

/// `array`, or `array<key, value>` when either parameter is given.
///
/// A missing key defaults to `int|string`, a missing value to `mixed`.
pub fn array(value: Option<Type>, key: Option<Type>, nullable: bool) -> Type {
    let ty = parameterized(builtin(BuiltinKind::Array), value, key);
    if nullable { self::nullable(ty) } else { ty }
}

/// `array<int, value>`.
pub fn list(value: Option<Type>) -> Type {
    array(value, Some(int()), false)
}

/// `array<string, value>`.
pub fn dict(value: Option<Type>) -> Type {
    array(value, Some(string()), false)
}

/// `iterable`, or `iterable<key, value>` when either parameter is given.
pub fn iterable_of(value: Option<Type>, key: Option<Type>) -> Type {
    parameterized(iterable(), value, key)
}

/// A container object flagged as a collection, e.g. `Collection<int, Foo>`.
pub fn collection(main: Type, value: Option<Type>, key: Option<Type>) -> Type {
    Type::Collection(CollectionType::new(parameterized(main, value, key)))
}

fn parameterized(main: Type, value: Option<Type>, key: Option<Type>) -> Type {
    if value.is_none() && key.is_none() {
        return main;
    }
    generic(
        main,
        [key.unwrap_or_else(array_key), value.unwrap_or_else(mixed)],
    )
}

pub fn generic(main: Type, parameters: impl IntoIterator<Item = Type>) -> Type {
    Type::Generic(GenericType::new(main, parameters.into_iter().collect()))
}

pub fn class(class_name: &str) -> Type {
    Type::Object(ObjectType::new(Some(class_name)))
}

/// A unit enum, or a backed enum when `backing` is given. The class must be
/// registered in `classes` with the matching kind and backing.
pub fn enum_type(
    classes: &ClassRegistry,
    class_name: &str,
    backing: Option<Type>,
) -> Result<Type, TypeError> {
    match backing {
        Some(backing) => classes.backed_enum_type(class_name, &backing),
        None => classes.unit_enum_type(class_name),
    }
}

pub fn union(types: impl IntoIterator<Item = Type>) -> Result<Type, TypeError> {
    UnionType::new(types).map(Type::Union)
}

pub fn intersection(types: impl IntoIterator<Item = Type>) -> Result<Type, TypeError> {
    IntersectionType::new(types).map(Type::Intersection)
}

/// `null|T`. Idempotent: a type that already admits null is returned as is,
/// and a union gains a single leading `null` member.
pub fn nullable(ty: Type) -> Type {
    if ty.is_nullable() {
        return ty;
    }
    let mut members = vec![null()];
    match ty {
        Type::Union(union) => members.extend(Vec::from(union)),
        other => members.push(other),
    }
    Type::Union(UnionType::from_distinct(members))
}
