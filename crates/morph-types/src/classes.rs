//! In-memory class registry.
//!
//! Answers the questions the mapper would otherwise ask at runtime: is this
//! class an enum, what backs it, what does it extend, is it read-only.

use crate::errors::TypeError;
use crate::types::{
    CollectionType, EnumBacking, GenericType, IntersectionType, ObjectKind, ObjectType, Type,
    UnionType,
};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::trace;

pub const DATE_TIME_INTERFACE: &str = "DateTimeInterface";
pub const DATE_TIME: &str = "DateTime";
pub const DATE_TIME_IMMUTABLE: &str = "DateTimeImmutable";
pub const ABSTRACT_UID: &str = "AbstractUid";
pub const UUID: &str = "Uuid";
pub const ULID: &str = "Ulid";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ClassKind {
    #[default]
    Class,
    UnitEnum,
    BackedEnum { backing: EnumBacking },
}

/// What the registry knows about one class.
///
/// Deserializes from `{"kind": "class" | "unitEnum" | "backedEnum",
/// "backing": "int" | "string", "parents": [...], "readonly": bool}`; every
/// key is optional except `backing` for a backed enum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawClassInfo")]
pub struct ClassInfo {
    #[serde(flatten)]
    pub kind: ClassKind,
    pub parents: Vec<String>,
    pub readonly: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
enum RawClassKind {
    #[default]
    Class,
    UnitEnum,
    BackedEnum,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClassInfo {
    #[serde(default)]
    kind: RawClassKind,
    #[serde(default)]
    backing: Option<EnumBacking>,
    #[serde(default)]
    parents: Vec<String>,
    #[serde(default)]
    readonly: bool,
}

impl TryFrom<RawClassInfo> for ClassInfo {
    type Error = String;

    fn try_from(raw: RawClassInfo) -> Result<Self, Self::Error> {
        let kind = match (raw.kind, raw.backing) {
            (RawClassKind::BackedEnum, Some(backing)) => ClassKind::BackedEnum { backing },
            (RawClassKind::BackedEnum, None) => {
                return Err("a backed enum needs a \"backing\" type".to_string());
            }
            (_, Some(_)) => return Err("only a backed enum can have a \"backing\" type".to_string()),
            (RawClassKind::Class, None) => ClassKind::Class,
            (RawClassKind::UnitEnum, None) => ClassKind::UnitEnum,
        };
        Ok(Self {
            kind,
            parents: raw.parents,
            readonly: raw.readonly,
        })
    }
}

impl ClassInfo {
    pub fn class() -> Self {
        Self::default()
    }

    pub fn unit_enum() -> Self {
        Self {
            kind: ClassKind::UnitEnum,
            ..Self::default()
        }
    }

    pub fn backed_enum(backing: EnumBacking) -> Self {
        Self {
            kind: ClassKind::BackedEnum { backing },
            ..Self::default()
        }
    }

    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    fn object_kind(&self) -> ObjectKind {
        match self.kind {
            ClassKind::Class => ObjectKind::Class,
            ClassKind::UnitEnum => ObjectKind::Enum,
            ClassKind::BackedEnum { backing } => ObjectKind::BackedEnum(backing),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: FxHashMap<String, ClassInfo>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the date/time and UID hierarchies plus `stdClass`.
    pub fn with_builtin_classes() -> Self {
        let mut registry = Self::new();
        registry.register(crate::types::UNIVERSAL_OBJECT_CLASS, ClassInfo::class());
        registry.register(DATE_TIME_INTERFACE, ClassInfo::class());
        registry.register(
            DATE_TIME,
            ClassInfo::class().with_parents([DATE_TIME_INTERFACE]),
        );
        registry.register(
            DATE_TIME_IMMUTABLE,
            ClassInfo::class().with_parents([DATE_TIME_INTERFACE]),
        );
        registry.register(ABSTRACT_UID, ClassInfo::class());
        registry.register(UUID, ClassInfo::class().with_parents([ABSTRACT_UID]));
        registry.register(ULID, ClassInfo::class().with_parents([ABSTRACT_UID]));
        registry
    }

    /// Adds or replaces a class.
    pub fn register(&mut self, class_name: impl Into<String>, info: ClassInfo) {
        let class_name = class_name.into();
        trace!(class = %class_name, kind = ?info.kind, "registering class");
        self.classes.insert(class_name, info);
    }

    pub fn get(&self, class_name: &str) -> Option<&ClassInfo> {
        self.classes.get(class_name)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Object type with enum flags taken from the registry. Unknown classes
    /// are plain classes.
    pub fn object_type(&self, class_name: &str) -> Type {
        let kind = self
            .get(class_name)
            .map_or(ObjectKind::Class, ClassInfo::object_kind);
        Type::Object(ObjectType::with_kind(class_name, kind))
    }

    /// Backed enum type; the class must be registered as a backed enum with
    /// the same backing.
    pub fn backed_enum_type(&self, class_name: &str, backing: &Type) -> Result<Type, TypeError> {
        let object = ObjectType::backed_enum(class_name, backing)?;
        match self.get(class_name).map(|info| info.kind) {
            Some(ClassKind::BackedEnum { backing: known }) if Some(known) == object.enum_backing() => {
                Ok(Type::Object(object))
            }
            Some(ClassKind::BackedEnum { backing: known }) => Err(TypeError::invalid(format!(
                "\"{class_name}\" is backed by \"{}\", not \"{backing}\"",
                known.builtin_kind()
            ))),
            _ => Err(TypeError::invalid(format!(
                "\"{class_name}\" is not a valid backed enum"
            ))),
        }
    }

    /// Unit enum type; the class must be registered as a unit enum.
    pub fn unit_enum_type(&self, class_name: &str) -> Result<Type, TypeError> {
        match self.get(class_name).map(|info| info.kind) {
            Some(ClassKind::UnitEnum) => Ok(Type::Object(ObjectType::with_kind(
                class_name,
                ObjectKind::Enum,
            ))),
            _ => Err(TypeError::invalid(format!(
                "\"{class_name}\" is not a valid unit enum"
            ))),
        }
    }

    /// Rewrites object types so their enum flags match the registry.
    /// Classes the registry does not know become plain classes.
    pub fn resolve_type(&self, ty: &Type) -> Type {
        match ty {
            Type::Builtin(_) => ty.clone(),
            Type::Object(object) => self.object_type(object.class_name()),
            Type::Collection(collection) => {
                Type::Collection(CollectionType::new(self.resolve_type(collection.inner())))
            }
            Type::Generic(generic) => Type::Generic(GenericType::new(
                self.resolve_type(generic.main()),
                generic
                    .parameters()
                    .iter()
                    .map(|param| self.resolve_type(param))
                    .collect(),
            )),
            Type::Union(union) => {
                let mut members = self.resolve_members(union.members());
                if members.len() == 1 {
                    members.remove(0)
                } else {
                    Type::Union(UnionType::from_distinct(members))
                }
            }
            Type::Intersection(intersection) => {
                let mut members = self.resolve_members(intersection.members());
                if members.len() == 1 {
                    members.remove(0)
                } else {
                    Type::Intersection(IntersectionType::from_distinct(members))
                }
            }
        }
    }

    /// Resolved members with duplicates dropped. Two declared kinds of the
    /// same class can collapse into one member.
    fn resolve_members(&self, members: &[Type]) -> Vec<Type> {
        let mut resolved: Vec<Type> = Vec::with_capacity(members.len());
        for member in members {
            let member = self.resolve_type(member);
            if !resolved.contains(&member) {
                resolved.push(member);
            }
        }
        resolved
    }

    pub fn is_enum(&self, class_name: &str) -> bool {
        self.get(class_name)
            .is_some_and(|info| !matches!(info.kind, ClassKind::Class))
    }

    pub fn is_backed_enum(&self, class_name: &str) -> bool {
        self.get(class_name)
            .is_some_and(|info| matches!(info.kind, ClassKind::BackedEnum { .. }))
    }

    pub fn is_readonly(&self, class_name: &str) -> bool {
        self.get(class_name).is_some_and(|info| info.readonly)
    }

    /// Whether `class_name` is `parent` or transitively extends it.
    pub fn is_subclass_of(&self, class_name: &str, parent: &str) -> bool {
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut stack = vec![class_name];
        while let Some(current) = stack.pop() {
            if current == parent {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(info) = self.classes.get(current) {
                stack.extend(info.parents.iter().map(String::as_str));
            }
        }
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassInfo)> {
        self.classes.iter().map(|(name, info)| (name.as_str(), info))
    }
}
