//! Transformer descriptions.
//!
//! A `Transformer` says how a value moves from a source shape to a target
//! shape. It is data, not code: a code generator or an interpreter consumes
//! it. The `Display` form is compact and stable, e.g.
//! `nullable(array(object(Address -> AddressDto)))`.

use morph_types::LegacyType;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transformer {
    /// Value is assigned as is.
    Copy,
    /// Scalar copy or cast to the first compatible target builtin.
    Builtin {
        source: LegacyType,
        targets: Vec<LegacyType>,
    },
    /// Null passes through; anything else goes through `inner`.
    Nullable {
        inner: Box<Transformer>,
        target_nullable: bool,
    },
    /// Runtime dispatch on the source value's actual type.
    Multiple { branches: Vec<MultipleBranch> },
    /// Nested mapping through a registered mapper.
    Object {
        source: LegacyType,
        target: LegacyType,
    },
    /// Backed enum to its scalar value.
    SourceEnum,
    /// Scalar value to a backed enum case.
    TargetEnum { class: String },
    DateTimeToString { format: String },
    StringToDateTime { class: String, format: String },
    DateTimeMutableToImmutable,
    DateTimeImmutableToMutable,
    /// Element-wise list transformation.
    Array { inner: Box<Transformer> },
    /// Element-wise transformation keeping string keys.
    Dictionary { inner: Box<Transformer> },
    UidToString { ulid: bool },
    StringToUid { class: String },
}

/// One arm of a `Multiple` transformer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultipleBranch {
    pub source: LegacyType,
    pub transformer: Transformer,
}

impl Transformer {
    pub fn nullable(inner: Transformer, target_nullable: bool) -> Self {
        Transformer::Nullable {
            inner: Box::new(inner),
            target_nullable,
        }
    }

    pub fn array(inner: Transformer) -> Self {
        Transformer::Array {
            inner: Box::new(inner),
        }
    }

    pub fn dictionary(inner: Transformer) -> Self {
        Transformer::Dictionary {
            inner: Box::new(inner),
        }
    }

    /// Whether this transformer needs a nested mapper at runtime, directly
    /// or through a wrapped transformer.
    pub fn depends_on_mapper(&self) -> bool {
        match self {
            Transformer::Object { .. } => true,
            Transformer::Nullable { inner, .. }
            | Transformer::Array { inner }
            | Transformer::Dictionary { inner } => inner.depends_on_mapper(),
            Transformer::Multiple { branches } => branches
                .iter()
                .any(|branch| branch.transformer.depends_on_mapper()),
            _ => false,
        }
    }
}

impl fmt::Display for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transformer::Copy => f.write_str("copy"),
            Transformer::Builtin { source, targets } => {
                write!(f, "builtin({source} -> ")?;
                if targets.is_empty() {
                    f.write_str("*")?;
                }
                for (i, target) in targets.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{target}")?;
                }
                f.write_str(")")
            }
            Transformer::Nullable { inner, .. } => write!(f, "nullable({inner})"),
            Transformer::Multiple { branches } => {
                f.write_str("multiple(")?;
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", branch.source, branch.transformer)?;
                }
                f.write_str(")")
            }
            Transformer::Object { source, target } => {
                write!(f, "object({} -> {})", mapped_name(source), mapped_name(target))
            }
            Transformer::SourceEnum => f.write_str("source_enum"),
            Transformer::TargetEnum { class } => write!(f, "target_enum({class})"),
            Transformer::DateTimeToString { format } => write!(f, "datetime_to_string({format})"),
            Transformer::StringToDateTime { class, format } => {
                write!(f, "string_to_datetime({class}, {format})")
            }
            Transformer::DateTimeMutableToImmutable => f.write_str("datetime_mutable_to_immutable"),
            Transformer::DateTimeImmutableToMutable => f.write_str("datetime_immutable_to_mutable"),
            Transformer::Array { inner } => write!(f, "array({inner})"),
            Transformer::Dictionary { inner } => write!(f, "dictionary({inner})"),
            Transformer::UidToString { ulid: true } => f.write_str("uid_to_string(ulid)"),
            Transformer::UidToString { ulid: false } => f.write_str("uid_to_string(uuid)"),
            Transformer::StringToUid { class } => write!(f, "string_to_uid({class})"),
        }
    }
}

/// Class name of an object side, `array` for an associative-array side.
pub(crate) fn mapped_name(ty: &LegacyType) -> &str {
    ty.class_name().unwrap_or_else(|| ty.builtin_type().as_str())
}
