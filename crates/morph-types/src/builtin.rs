//! The closed enumeration of builtin type kinds.

use crate::errors::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Builtin (primitive or structural) type kinds.
///
/// `Object` without a class denotes an anonymous object. `Void` and `Never`
/// only occur as return-like shapes; neither is nullable nor a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinKind {
    Int,
    Float,
    String,
    Bool,
    Resource,
    Object,
    Array,
    Null,
    False,
    True,
    Callable,
    Iterable,
    Mixed,
    Void,
    Never,
}

impl BuiltinKind {
    /// Every builtin kind, in declaration order.
    pub const ALL: [BuiltinKind; 15] = [
        BuiltinKind::Int,
        BuiltinKind::Float,
        BuiltinKind::String,
        BuiltinKind::Bool,
        BuiltinKind::Resource,
        BuiltinKind::Object,
        BuiltinKind::Array,
        BuiltinKind::Null,
        BuiltinKind::False,
        BuiltinKind::True,
        BuiltinKind::Callable,
        BuiltinKind::Iterable,
        BuiltinKind::Mixed,
        BuiltinKind::Void,
        BuiltinKind::Never,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            BuiltinKind::Int => "int",
            BuiltinKind::Float => "float",
            BuiltinKind::String => "string",
            BuiltinKind::Bool => "bool",
            BuiltinKind::Resource => "resource",
            BuiltinKind::Object => "object",
            BuiltinKind::Array => "array",
            BuiltinKind::Null => "null",
            BuiltinKind::False => "false",
            BuiltinKind::True => "true",
            BuiltinKind::Callable => "callable",
            BuiltinKind::Iterable => "iterable",
            BuiltinKind::Mixed => "mixed",
            BuiltinKind::Void => "void",
            BuiltinKind::Never => "never",
        }
    }

    /// `null` and `mixed` admit the null value.
    pub const fn is_nullable(self) -> bool {
        matches!(self, BuiltinKind::Null | BuiltinKind::Mixed)
    }

    /// `array` and `iterable` are collections even without parameters.
    pub const fn is_collection(self) -> bool {
        matches!(self, BuiltinKind::Array | BuiltinKind::Iterable)
    }

    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            BuiltinKind::Int
                | BuiltinKind::Float
                | BuiltinKind::String
                | BuiltinKind::Bool
                | BuiltinKind::False
                | BuiltinKind::True
        )
    }
}

impl fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuiltinKind {
    type Err = TypeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        BuiltinKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| TypeError::invalid(format!("\"{name}\" is not a valid builtin type")))
    }
}
