//! A type with nullable/collection overrides for legacy bridging.
//!
//! The legacy flat model carries `nullable` and `collection` flags that do not
//! always follow from the type itself (a union member inherits the union's
//! nullability, a collection's inner type is "a collection"). Instead of
//! mutating the wrapped `Type`, the overrides live next to it.

use crate::types::Type;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotatedType {
    ty: Type,
    nullable: Option<bool>,
    collection: bool,
}

impl AnnotatedType {
    pub fn new(ty: Type) -> Self {
        Self {
            ty,
            nullable: None,
            collection: false,
        }
    }

    pub fn with_nullable(mut self, nullable: Option<bool>) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_collection(mut self, collection: bool) -> Self {
        self.collection = collection;
        self
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn nullable_override(&self) -> Option<bool> {
        self.nullable
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or_else(|| self.ty.is_nullable())
    }

    pub fn is_collection(&self) -> bool {
        self.collection || self.ty.is_collection()
    }
}

impl From<Type> for AnnotatedType {
    fn from(ty: Type) -> Self {
        Self::new(ty)
    }
}
