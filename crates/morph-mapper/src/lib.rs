//! Transformer dispatch for the morph mapper.
//!
//! Property types are flattened into legacy types, then a
//! `ChainTransformerFactory` asks its factories, highest priority first, for a
//! `Transformer` describing how to move a source value into a target property.
//! `AutoMapper` runs that lookup for every property of a source/target pair
//! and collects the answers into a `MappingPlan`.
pub mod automapper;
pub mod config;
pub mod errors;
pub mod extractor;
pub mod factories;
pub mod metadata;
pub mod registry;
pub mod transformer;

pub use automapper::AutoMapper;
pub use config::{MorphConfig, ResolvedConfig, load_config, parse_config};
pub use errors::MapperError;
pub use extractor::{
    PropertyAccessExtractor, PropertyAttributeExtractor, PropertyAttributes, PropertyDescriptor,
    PropertyExtractor, PropertyListExtractor, PropertyTypeExtractor, StaticPropertyExtractor,
};
pub use factories::{
    ArrayTransformerFactory, BuiltinTransformerFactory, ChainTransformerFactory,
    DateTimeTransformerFactory, EnumTransformerFactory, MultipleTransformerFactory,
    NullableTransformerFactory, ObjectTransformerFactory, TransformerContext, TransformerFactory,
    UidTransformerFactory, UniqueTypeTransformerFactory,
};
pub use metadata::{MapperMetadata, MapperOptions, MappingPlan, PropertyMapping};
pub use registry::{ARRAY, ConfiguredMappers, MapperRegistry};
pub use transformer::{MultipleBranch, Transformer};

#[cfg(test)]
#[path = "../tests/chain_tests.rs"]
mod chain_tests;

#[cfg(test)]
#[path = "../tests/factories_tests.rs"]
mod factories_tests;

#[cfg(test)]
#[path = "../tests/transformer_tests.rs"]
mod transformer_tests;

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
