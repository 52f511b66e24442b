//! Flat legacy type model.
//!
//! A `LegacyType` is a single builtin kind plus flags: nullable, optional
//! class, collection, and flat key/value lists. Composite shapes become a
//! list of legacy types (see `compat`). The reverse direction, `to_type`,
//! rebuilds a structured `Type` from one legacy entry.

use crate::annotated::AnnotatedType;
use crate::builtin::BuiltinKind;
use crate::errors::TypeError;
use crate::type_factory as t;
use crate::types::{CollectionType, GenericType, ObjectType, Type, UnionType};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyType {
    builtin_type: BuiltinKind,
    nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    class_name: Option<String>,
    collection: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    collection_key_types: Vec<LegacyType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    collection_value_types: Vec<LegacyType>,
}

impl LegacyType {
    /// A bare legacy type. `null` and `mixed` start (and stay) nullable.
    pub fn new(builtin_type: BuiltinKind) -> Self {
        Self {
            builtin_type,
            nullable: builtin_type.is_nullable(),
            class_name: None,
            collection: false,
            collection_key_types: Vec::new(),
            collection_value_types: Vec::new(),
        }
    }

    /// Parses a builtin name such as `"int"`; unknown names are rejected.
    pub fn from_name(name: &str) -> Result<Self, TypeError> {
        BuiltinKind::from_str(name).map(Self::new)
    }

    /// An `object` legacy type carrying a class.
    pub fn object(class_name: impl Into<String>) -> Self {
        Self::new(BuiltinKind::Object).with_class(class_name)
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable || self.builtin_type.is_nullable();
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_collection(mut self, collection: bool) -> Self {
        self.collection = collection;
        self
    }

    pub fn with_key_types(mut self, key_types: Vec<LegacyType>) -> Self {
        self.collection_key_types = key_types;
        self
    }

    pub fn with_value_types(mut self, value_types: Vec<LegacyType>) -> Self {
        self.collection_value_types = value_types;
        self
    }

    pub fn builtin_type(&self) -> BuiltinKind {
        self.builtin_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn is_collection(&self) -> bool {
        self.collection
    }

    pub fn collection_key_types(&self) -> &[LegacyType] {
        &self.collection_key_types
    }

    pub fn collection_value_types(&self) -> &[LegacyType] {
        &self.collection_value_types
    }

    /// Same legacy type without the nullable flag (kept for `null`/`mixed`).
    pub fn non_nullable(&self) -> Self {
        self.clone().with_nullable(false)
    }

    /// Rebuilds a structured type.
    ///
    /// The base is the class when one is set, else the builtin. Key and
    /// value lists become the two generic parameters (several entries form a
    /// union); a missing side falls back to `int|string` keys or `mixed`
    /// values. A collection-flagged object is wrapped in `Collection`.
    pub fn to_type(&self) -> Result<Type, TypeError> {
        let base = match &self.class_name {
            Some(class_name) => Type::Object(ObjectType::new(Some(class_name))),
            None => Type::Builtin(self.builtin_type),
        };

        let key = merge_types(&self.collection_key_types)?;
        let value = merge_types(&self.collection_value_types)?;
        let parameterized = if key.is_none() && value.is_none() {
            base
        } else {
            Type::Generic(GenericType::new(
                base,
                vec![key.unwrap_or_else(t::array_key), value.unwrap_or_else(t::mixed)],
            ))
        };

        let shaped = if self.collection && self.class_name.is_some() {
            Type::Collection(CollectionType::new(parameterized))
        } else {
            parameterized
        };

        Ok(if self.nullable { t::nullable(shaped) } else { shaped })
    }

    /// `to_type` plus the legacy flags as overrides.
    pub fn to_annotated(&self) -> Result<AnnotatedType, TypeError> {
        Ok(AnnotatedType::new(self.to_type()?)
            .with_nullable(Some(self.nullable))
            .with_collection(self.collection))
    }
}

fn merge_types(entries: &[LegacyType]) -> Result<Option<Type>, TypeError> {
    let mut types: Vec<Type> = Vec::with_capacity(entries.len());
    for entry in entries {
        let ty = entry.to_type()?;
        if !types.contains(&ty) {
            types.push(ty);
        }
    }
    match types.len() {
        0 => Ok(None),
        1 => Ok(types.pop()),
        _ => UnionType::new(types).map(|union| Some(Type::Union(union))),
    }
}

impl fmt::Display for LegacyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable && !self.builtin_type.is_nullable() {
            f.write_str("?")?;
        }
        match &self.class_name {
            Some(class_name) => f.write_str(class_name)?,
            None => write!(f, "{}", self.builtin_type)?,
        }
        if self.collection_key_types.is_empty() && self.collection_value_types.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        write_alternatives(f, &self.collection_key_types, "int|string")?;
        f.write_str(", ")?;
        write_alternatives(f, &self.collection_value_types, "mixed")?;
        f.write_str(">")
    }
}

fn write_alternatives(
    f: &mut fmt::Formatter<'_>,
    entries: &[LegacyType],
    empty: &str,
) -> fmt::Result {
    if entries.is_empty() {
        return f.write_str(empty);
    }
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            f.write_str("|")?;
        }
        write!(f, "{entry}")?;
    }
    Ok(())
}
