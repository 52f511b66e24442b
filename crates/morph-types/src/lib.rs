//! Type shapes for property mapping.
//!
//! - `types`: the closed `Type` sum (builtin, object, collection, generic,
//!   union, intersection) with structural equality and a canonical `Display`
//! - `queries`: predicates and accessors on `Type`
//! - `type_factory`: short constructors
//! - `legacy` / `compat`: the flat legacy model and the bridge into it
//! - `classes`: class registry used in place of runtime reflection
pub mod annotated;
pub mod builtin;
pub mod classes;
pub mod compat;
pub mod errors;
pub mod legacy;
pub mod limits;
mod queries;
pub mod type_factory;
pub mod types;

pub use annotated::AnnotatedType;
pub use builtin::BuiltinKind;
pub use classes::{ClassInfo, ClassKind, ClassRegistry};
pub use compat::{convert_type_to_legacy_types, unwrap_nullable_type};
pub use errors::TypeError;
pub use legacy::LegacyType;
pub use types::{
    CollectionType, EnumBacking, GenericType, IntersectionType, ObjectKind, ObjectType, Type,
    UNIVERSAL_OBJECT_CLASS, UnionType,
};

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod types_tests;

#[cfg(test)]
#[path = "../tests/type_factory_tests.rs"]
mod type_factory_tests;

#[cfg(test)]
#[path = "../tests/compat_tests.rs"]
mod compat_tests;

#[cfg(test)]
#[path = "../tests/legacy_tests.rs"]
mod legacy_tests;

#[cfg(test)]
#[path = "../tests/classes_tests.rs"]
mod classes_tests;
