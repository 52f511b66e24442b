//! Read-only queries over `Type`.
//!
//! Plain shapes answer predicates directly. A union answers "could be any of
//! these" (existential over members) and an intersection answers "is all of
//! these" (universal over members). Accessors that have no meaning for a
//! shape return `TypeError::Logic`.

use crate::builtin::BuiltinKind;
use crate::errors::TypeError;
use crate::types::{EnumBacking, GenericType, ObjectType, Type, UnionType};

impl Type {
    /// Innermost non-composite, non-wrapper type: a builtin or an object.
    ///
    /// `Collection` and `Generic` wrappers are unwrapped; unions and
    /// intersections have no single base type.
    pub fn base_type(&self) -> Result<&Type, TypeError> {
        match self {
            Type::Builtin(_) | Type::Object(_) => Ok(self),
            Type::Collection(collection) => collection.inner().base_type(),
            Type::Generic(generic) => generic.main().base_type(),
            Type::Union(_) | Type::Intersection(_) => Err(TypeError::logic(format!(
                "cannot get base type on \"{self}\" compound type"
            ))),
        }
    }

    /// Applies `predicate` to plain types, to any member of a union, or to
    /// every member of an intersection.
    pub fn is(&self, predicate: &dyn Fn(&Type) -> bool) -> bool {
        match self {
            Type::Union(union) => union.members().iter().any(|member| member.is(predicate)),
            Type::Intersection(intersection) => intersection
                .members()
                .iter()
                .all(|member| member.is(predicate)),
            _ => predicate(self),
        }
    }

    /// Whether the base type has the given builtin kind. Object types count
    /// as `object`. Composites without a base type answer `false`.
    pub fn is_builtin_type(&self, kind: BuiltinKind) -> bool {
        self.is(&|ty| match ty.base_type() {
            Ok(base) => base.base_builtin_kind() == Some(kind),
            Err(_) => false,
        })
    }

    fn base_builtin_kind(&self) -> Option<BuiltinKind> {
        match self {
            Type::Builtin(kind) => Some(*kind),
            Type::Object(_) => Some(BuiltinKind::Object),
            _ => None,
        }
    }

    /// Builtin kind of the base type.
    pub fn builtin_type(&self) -> Result<BuiltinKind, TypeError> {
        let base = self.base_type()?;
        base.base_builtin_kind()
            .ok_or_else(|| TypeError::logic(format!("\"{self}\" has no builtin type")))
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            Type::Union(union) => union.members().iter().any(Type::is_nullable),
            Type::Intersection(intersection) => {
                intersection.members().iter().all(Type::is_nullable)
            }
            _ => self.is_builtin_type(BuiltinKind::Null) || self.is_builtin_type(BuiltinKind::Mixed),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Type::Builtin(BuiltinKind::Null))
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Type::Builtin(BuiltinKind::Mixed))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Builtin(BuiltinKind::Void))
    }

    pub fn is_scalar(&self) -> bool {
        match self {
            Type::Union(union) => union.members().iter().all(Type::is_scalar),
            Type::Intersection(intersection) => intersection.members().iter().all(Type::is_scalar),
            _ => matches!(self.base_type(), Ok(Type::Builtin(kind)) if kind.is_scalar()),
        }
    }

    pub fn is_object(&self) -> bool {
        match self {
            Type::Union(union) => union.members().iter().all(Type::is_object),
            Type::Intersection(intersection) => intersection.members().iter().all(Type::is_object),
            _ => self.is_builtin_type(BuiltinKind::Object),
        }
    }

    /// The object type at the base, if any.
    pub fn as_object(&self) -> Option<&ObjectType> {
        match self.base_type() {
            Ok(Type::Object(object)) => Some(object),
            _ => None,
        }
    }

    pub fn class_name(&self) -> Result<&str, TypeError> {
        self.as_object()
            .map(ObjectType::class_name)
            .ok_or_else(|| TypeError::logic(format!("\"{self}\" is not an object type")))
    }

    pub fn is_enum(&self) -> bool {
        match self {
            Type::Union(union) => union.members().iter().all(Type::is_enum),
            Type::Intersection(intersection) => intersection.members().iter().all(Type::is_enum),
            _ => self.as_object().is_some_and(ObjectType::is_enum),
        }
    }

    pub fn is_backed_enum(&self) -> bool {
        match self {
            Type::Union(union) => union.members().iter().all(Type::is_backed_enum),
            Type::Intersection(intersection) => {
                intersection.members().iter().all(Type::is_backed_enum)
            }
            _ => self.as_object().is_some_and(ObjectType::is_backed_enum),
        }
    }

    pub fn enum_backing_type(&self) -> Result<Type, TypeError> {
        self.as_object()
            .and_then(ObjectType::enum_backing)
            .map(|backing: EnumBacking| Type::Builtin(backing.builtin_kind()))
            .ok_or_else(|| TypeError::logic(format!("\"{self}\" is not a backed enum")))
    }

    pub fn is_collection(&self) -> bool {
        match self {
            Type::Builtin(kind) => kind.is_collection(),
            Type::Object(_) => false,
            Type::Collection(_) => true,
            Type::Generic(generic) => generic.main().is_collection(),
            Type::Union(union) => union.members().iter().all(Type::is_collection),
            Type::Intersection(intersection) => {
                intersection.members().iter().all(Type::is_collection)
            }
        }
    }

    pub fn collection_key_type(&self) -> Result<Type, TypeError> {
        self.collection_key_value().map(|(key, _)| key)
    }

    pub fn collection_value_type(&self) -> Result<Type, TypeError> {
        self.collection_key_value().map(|(_, value)| value)
    }

    /// `(key, value)` types of a collection.
    fn collection_key_value(&self) -> Result<(Type, Type), TypeError> {
        if matches!(self, Type::Union(_) | Type::Intersection(_)) || !self.is_collection() {
            return Err(TypeError::logic(format!(
                "cannot get collection key/value type on \"{self}\" type as it's not a collection"
            )));
        }
        match self {
            Type::Generic(generic) => Ok(generic_key_value(generic)),
            Type::Collection(collection) => match collection.inner() {
                Type::Generic(generic) => Ok(generic_key_value(generic)),
                _ => Ok(default_key_value()),
            },
            _ => Ok(default_key_value()),
        }
    }

    pub fn is_list(&self) -> bool {
        match self {
            Type::Union(union) => union.members().iter().all(Type::is_list),
            Type::Intersection(intersection) => intersection.members().iter().all(Type::is_list),
            _ => matches!(self.collection_key_type(), Ok(Type::Builtin(BuiltinKind::Int))),
        }
    }

    pub fn is_dict(&self) -> bool {
        match self {
            Type::Union(union) => union.members().iter().all(Type::is_dict),
            Type::Intersection(intersection) => intersection.members().iter().all(Type::is_dict),
            _ => matches!(self.collection_key_type(), Ok(Type::Builtin(BuiltinKind::String))),
        }
    }

    /// Parameters of a generic type, looking through a collection wrapper.
    pub fn generic_parameters(&self) -> Result<&[Type], TypeError> {
        match self {
            Type::Generic(generic) => Ok(generic.parameters()),
            Type::Collection(collection) => collection.inner().generic_parameters(),
            _ => Err(TypeError::logic(format!("\"{self}\" is not a generic type"))),
        }
    }

    /// Members of a union or intersection.
    pub fn members(&self) -> Result<&[Type], TypeError> {
        match self {
            Type::Union(union) => Ok(union.members()),
            Type::Intersection(intersection) => Ok(intersection.members()),
            _ => Err(TypeError::logic(format!("\"{self}\" is not a composite type"))),
        }
    }
}

fn default_key_value() -> (Type, Type) {
    let key = Type::Union(UnionType::from_distinct(vec![
        Type::Builtin(BuiltinKind::Int),
        Type::Builtin(BuiltinKind::String),
    ]));
    (key, Type::Builtin(BuiltinKind::Mixed))
}

fn generic_key_value(generic: &GenericType) -> (Type, Type) {
    match generic.parameters() {
        [key, value] => (key.clone(), value.clone()),
        [value] => (Type::Builtin(BuiltinKind::Int), value.clone()),
        _ => match generic.main() {
            Type::Generic(inner) => generic_key_value(inner),
            _ => default_key_value(),
        },
    }
}
