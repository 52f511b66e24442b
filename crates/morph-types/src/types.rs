//! Core type representation.
//!
//! `Type` is a closed sum over the shapes a property value can take. Every
//! value is immutable once built; operations that "change" a type (dropping
//! `null` from a union, marking a type nullable) build a new value.
//!
//! Equality, hashing and serialization are all structural and derived.
//! The `Display` form is canonical and stable, so it can be used as a cheap
//! dispatch key, but kind tests inside this crate always match on the tag.

use crate::builtin::BuiltinKind;
use crate::errors::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Class used for an object type built without a class identity.
pub const UNIVERSAL_OBJECT_CLASS: &str = "stdClass";

/// A property/value type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    /// Builtin kind (`int`, `array`, `null`, ...)
    Builtin(BuiltinKind),
    /// Object with a class identity, possibly an enum
    Object(ObjectType),
    /// A container explicitly marked as a collection (`Collection<int, Foo>`)
    Collection(CollectionType),
    /// Main type with parameters (`array<int, string>`)
    Generic(GenericType),
    /// `T1|T2|...`
    Union(UnionType),
    /// `T1&T2&...`
    Intersection(IntersectionType),
}

/// Backing scalar of a backed enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumBacking {
    Int,
    String,
}

impl EnumBacking {
    pub const fn builtin_kind(self) -> BuiltinKind {
        match self {
            EnumBacking::Int => BuiltinKind::Int,
            EnumBacking::String => BuiltinKind::String,
        }
    }

    /// Backing for a builtin kind; only `int` and `string` can back an enum.
    pub fn from_builtin(kind: BuiltinKind) -> Result<Self, TypeError> {
        match kind {
            BuiltinKind::Int => Ok(EnumBacking::Int),
            BuiltinKind::String => Ok(EnumBacking::String),
            other => Err(TypeError::invalid(format!(
                "\"{other}\" cannot back an enum, expected \"int\" or \"string\""
            ))),
        }
    }
}

/// What kind of class an object type refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectKind {
    #[default]
    Class,
    /// Enum without a scalar value per case
    Enum,
    /// Enum whose cases carry an `int` or `string` value
    BackedEnum(EnumBacking),
}

/// Object type with a class identity.
///
/// Enum kinds are only assigned through [`ClassRegistry`](crate::ClassRegistry),
/// so a deserialized object type is always a plain class until
/// `ClassRegistry::resolve_type` runs over it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectType {
    #[serde(rename = "class")]
    class_name: String,
    #[serde(default, skip_deserializing)]
    kind: ObjectKind,
}

impl ObjectType {
    /// A plain class. Without a class identity the universal object class
    /// is used, so `class_name` stays total.
    pub fn new(class_name: Option<&str>) -> Self {
        Self {
            class_name: class_name.unwrap_or(UNIVERSAL_OBJECT_CLASS).to_string(),
            kind: ObjectKind::Class,
        }
    }

    /// A backed enum. `backing` must be the `int` or `string` builtin.
    pub(crate) fn backed_enum(
        class_name: impl Into<String>,
        backing: &Type,
    ) -> Result<Self, TypeError> {
        let backing = match backing {
            Type::Builtin(kind) => EnumBacking::from_builtin(*kind)?,
            other => {
                return Err(TypeError::invalid(format!(
                    "\"{other}\" cannot back an enum, expected \"int\" or \"string\""
                )));
            }
        };
        Ok(Self {
            class_name: class_name.into(),
            kind: ObjectKind::BackedEnum(backing),
        })
    }

    pub(crate) fn with_kind(class_name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            class_name: class_name.into(),
            kind,
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, ObjectKind::Enum | ObjectKind::BackedEnum(_))
    }

    pub fn is_backed_enum(&self) -> bool {
        matches!(self.kind, ObjectKind::BackedEnum(_))
    }

    pub fn enum_backing(&self) -> Option<EnumBacking> {
        match self.kind {
            ObjectKind::BackedEnum(backing) => Some(backing),
            _ => None,
        }
    }
}

/// A container shape flagged as a collection.
///
/// Distinguishes "is a collection" from "is parameterized": an object such as
/// `Collection<int, Foo>` is only iterable because it is wrapped here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionType {
    inner: Box<Type>,
}

impl CollectionType {
    pub fn new(inner: Type) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    pub fn inner(&self) -> &Type {
        &self.inner
    }
}

/// Main type with ordered parameters.
///
/// One parameter is the value type (key defaults to `int`), two parameters
/// are `(key, value)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericType {
    main: Box<Type>,
    #[serde(default)]
    parameters: Vec<Type>,
}

impl GenericType {
    pub fn new(main: Type, parameters: Vec<Type>) -> Self {
        Self {
            main: Box::new(main),
            parameters,
        }
    }

    pub fn main(&self) -> &Type {
        &self.main
    }

    pub fn parameters(&self) -> &[Type] {
        &self.parameters
    }
}

/// `T1|T2|...` with at least two distinct members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Type>", into = "Vec<Type>")]
pub struct UnionType {
    members: Vec<Type>,
}

impl UnionType {
    /// Builds a union. Nested unions are flattened and duplicate members
    /// dropped (first occurrence wins); fewer than two distinct members is
    /// an error.
    pub fn new(members: impl IntoIterator<Item = Type>) -> Result<Self, TypeError> {
        let members = normalize_members(members, |ty| match ty {
            Type::Union(union) => Some(union.members.as_slice()),
            _ => None,
        });
        if members.len() < 2 {
            return Err(TypeError::invalid(format!(
                "a union type needs at least two distinct members, got {}",
                members.len()
            )));
        }
        Ok(Self { members })
    }

    /// Members already known to be flat, distinct and at least two.
    pub(crate) fn from_distinct(members: Vec<Type>) -> Self {
        debug_assert!(members.len() >= 2);
        Self { members }
    }

    pub fn members(&self) -> &[Type] {
        &self.members
    }

    /// Whether a `null` builtin is one of the members.
    pub fn contains_null(&self) -> bool {
        self.members
            .iter()
            .any(|member| matches!(member, Type::Builtin(BuiltinKind::Null)))
    }

    /// The union without its `null` member. A single remaining member is
    /// returned bare.
    pub fn as_non_nullable(&self) -> Type {
        let mut rest: Vec<Type> = self
            .members
            .iter()
            .filter(|member| !matches!(member, Type::Builtin(BuiltinKind::Null)))
            .cloned()
            .collect();
        match rest.len() {
            0 => Type::Builtin(BuiltinKind::Null),
            1 => rest.remove(0),
            _ => Type::Union(Self { members: rest }),
        }
    }
}

impl TryFrom<Vec<Type>> for UnionType {
    type Error = TypeError;

    fn try_from(members: Vec<Type>) -> Result<Self, Self::Error> {
        Self::new(members)
    }
}

impl From<UnionType> for Vec<Type> {
    fn from(union: UnionType) -> Self {
        union.members
    }
}

/// `T1&T2&...` with at least two distinct members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Type>", into = "Vec<Type>")]
pub struct IntersectionType {
    members: Vec<Type>,
}

impl IntersectionType {
    pub fn new(members: impl IntoIterator<Item = Type>) -> Result<Self, TypeError> {
        let members = normalize_members(members, |ty| match ty {
            Type::Intersection(intersection) => Some(intersection.members.as_slice()),
            _ => None,
        });
        if members.len() < 2 {
            return Err(TypeError::invalid(format!(
                "an intersection type needs at least two distinct members, got {}",
                members.len()
            )));
        }
        Ok(Self { members })
    }

    pub(crate) fn from_distinct(members: Vec<Type>) -> Self {
        debug_assert!(members.len() >= 2);
        Self { members }
    }

    pub fn members(&self) -> &[Type] {
        &self.members
    }
}

impl TryFrom<Vec<Type>> for IntersectionType {
    type Error = TypeError;

    fn try_from(members: Vec<Type>) -> Result<Self, Self::Error> {
        Self::new(members)
    }
}

impl From<IntersectionType> for Vec<Type> {
    fn from(intersection: IntersectionType) -> Self {
        intersection.members
    }
}

/// Flattens same-kind nesting and removes duplicates, keeping order.
fn normalize_members(
    members: impl IntoIterator<Item = Type>,
    nested: impl Fn(&Type) -> Option<&[Type]>,
) -> Vec<Type> {
    let mut out: Vec<Type> = Vec::new();
    for member in members {
        match nested(&member) {
            Some(inner) => {
                for ty in inner {
                    if !out.contains(ty) {
                        out.push(ty.clone());
                    }
                }
            }
            None => {
                if !out.contains(&member) {
                    out.push(member);
                }
            }
        }
    }
    out
}

/// Canonical rendering: `int`, `Foo`, `array<int, Foo>`, `int|string`,
/// `A&B`. A union or intersection nested inside another type is wrapped in
/// parentheses, e.g. `(A&B)|null`. This intentionally differs from the
/// usual unparenthesised `A&B|null` form, which reads the same as
/// `A&(B|null)`.
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Builtin(kind) => write!(f, "{kind}"),
            Type::Object(object) => f.write_str(object.class_name()),
            Type::Collection(collection) => write!(f, "{}", collection.inner()),
            Type::Generic(generic) => {
                write_operand(f, generic.main())?;
                f.write_str("<")?;
                for (i, param) in generic.parameters().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                f.write_str(">")
            }
            Type::Union(union) => write_joined(f, union.members(), "|"),
            Type::Intersection(intersection) => write_joined(f, intersection.members(), "&"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, members: &[Type], glue: &str) -> fmt::Result {
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            f.write_str(glue)?;
        }
        write_operand(f, member)?;
    }
    Ok(())
}

/// Composites nested inside another construct are parenthesized.
fn write_operand(f: &mut fmt::Formatter<'_>, ty: &Type) -> fmt::Result {
    match ty {
        Type::Union(_) | Type::Intersection(_) => write!(f, "({ty})"),
        _ => write!(f, "{ty}"),
    }
}
