//! Transformer factories and the prioritized chain that consults them.
//!
//! Each factory inspects the candidate source and target legacy types and
//! either describes a transformer or declines with `Ok(None)`. The chain asks
//! its factories in descending priority and keeps the first answer.
//!
//! Standard factories, highest priority first:
//!
//! | Factory | Priority |
//! |---|---|
//! | `MultipleTransformerFactory` | 128 |
//! | `NullableTransformerFactory` | 64 |
//! | `UniqueTypeTransformerFactory` | 32 |
//! | `UidTransformerFactory` | 24 |
//! | `ObjectTransformerFactory` | 20 |
//! | `EnumTransformerFactory` | 18 |
//! | `DateTimeTransformerFactory` | 16 |
//! | `BuiltinTransformerFactory` | 8 |
//! | `ArrayTransformerFactory` | 4 |
//!
//! Factories without an explicit priority get `DEFAULT_PRIORITY`, which puts
//! custom factories ahead of every standard one.

mod array;
mod builtin;
mod chain;
mod date_time;
mod enums;
mod multiple;
mod nullable;
mod object;
mod uid;
mod unique_type;

pub use array::ArrayTransformerFactory;
pub use builtin::BuiltinTransformerFactory;
pub use chain::ChainTransformerFactory;
pub use date_time::DateTimeTransformerFactory;
pub use enums::EnumTransformerFactory;
pub use multiple::MultipleTransformerFactory;
pub use nullable::NullableTransformerFactory;
pub use object::ObjectTransformerFactory;
pub use uid::UidTransformerFactory;
pub use unique_type::UniqueTypeTransformerFactory;

use crate::errors::MapperError;
use crate::metadata::MapperMetadata;
use crate::registry::MapperRegistry;
use crate::transformer::Transformer;
use morph_types::{ClassRegistry, LegacyType};

pub const DEFAULT_PRIORITY: i32 = 256;

/// Collaborators a factory may consult.
#[derive(Clone, Copy)]
pub struct TransformerContext<'a> {
    /// Set when the factory is invoked through a chain.
    pub chain: Option<&'a ChainTransformerFactory>,
    pub classes: &'a ClassRegistry,
    pub mappers: &'a dyn MapperRegistry,
}

impl<'a> TransformerContext<'a> {
    pub fn new(classes: &'a ClassRegistry, mappers: &'a dyn MapperRegistry) -> Self {
        Self {
            chain: None,
            classes,
            mappers,
        }
    }

    pub fn with_chain(self, chain: &'a ChainTransformerFactory) -> Self {
        Self {
            chain: Some(chain),
            ..self
        }
    }

    /// The chain, or `MissingChain` naming the factory that needed it.
    pub(crate) fn require_chain(
        &self,
        factory: &'static str,
    ) -> Result<&'a ChainTransformerFactory, MapperError> {
        self.chain.ok_or(MapperError::MissingChain { factory })
    }

    /// Delegates a sub-lookup to the chain.
    pub(crate) fn delegate(
        &self,
        factory: &'static str,
        source: Option<&[LegacyType]>,
        target: Option<&[LegacyType]>,
        metadata: &MapperMetadata,
    ) -> Result<Option<Transformer>, MapperError> {
        self.require_chain(factory)?
            .get_transformer(source, target, metadata, self)
    }
}

pub trait TransformerFactory: Send + Sync {
    /// Stable identifier; a chain holds at most one factory per name.
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    /// A transformer for moving a value of one of `source` into one of
    /// `target`, or `Ok(None)` when this factory does not apply.
    fn get_transformer(
        &self,
        source: Option<&[LegacyType]>,
        target: Option<&[LegacyType]>,
        metadata: &MapperMetadata,
        ctx: &TransformerContext<'_>,
    ) -> Result<Option<Transformer>, MapperError>;
}

/// Exactly one source and one target type, or `None`.
///
/// Object, enum, date-time, UID and array factories only handle this shape;
/// wider candidate lists are narrowed first by the multiple, nullable and
/// unique-type factories.
pub(crate) fn unique_pair<'t>(
    source: Option<&'t [LegacyType]>,
    target: Option<&'t [LegacyType]>,
) -> Option<(&'t LegacyType, &'t LegacyType)> {
    match (source?, target?) {
        ([source], [target]) => Some((source, target)),
        _ => None,
    }
}
