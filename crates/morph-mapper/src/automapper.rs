//! `AutoMapper` facade: owns the chain, the registries and the extractor,
//! and turns a source/target pair into a `MappingPlan`.

use crate::config::{MorphConfig, ResolvedConfig};
use crate::errors::MapperError;
use crate::extractor::{PropertyAttributes, PropertyExtractor};
use crate::factories::{ChainTransformerFactory, TransformerContext};
use crate::metadata::{MapperMetadata, MapperOptions, MappingPlan, PropertyMapping};
use crate::registry::{ARRAY, MapperRegistry};
use crate::transformer::Transformer;
use morph_types::classes::{ABSTRACT_UID, DATE_TIME_INTERFACE};
use morph_types::{BuiltinKind, ClassKind, ClassRegistry, LegacyType};
use tracing::{debug, trace};

pub struct AutoMapper {
    chain: ChainTransformerFactory,
    classes: ClassRegistry,
    extractor: Box<dyn PropertyExtractor>,
    mappers: Box<dyn MapperRegistry>,
    options: MapperOptions,
}

impl AutoMapper {
    /// Mapper using the standard factory chain.
    pub fn new(
        classes: ClassRegistry,
        extractor: impl PropertyExtractor + 'static,
        mappers: impl MapperRegistry + 'static,
        options: MapperOptions,
    ) -> Self {
        Self {
            chain: ChainTransformerFactory::with_default_factories(),
            classes,
            extractor: Box::new(extractor),
            mappers: Box::new(mappers),
            options,
        }
    }

    pub fn from_config(config: &MorphConfig) -> anyhow::Result<Self> {
        Ok(Self::from_resolved(config.resolve()?))
    }

    pub fn from_resolved(resolved: ResolvedConfig) -> Self {
        Self::new(
            resolved.classes,
            resolved.extractor,
            resolved.mappers,
            resolved.options,
        )
    }

    pub fn chain(&self) -> &ChainTransformerFactory {
        &self.chain
    }

    /// Custom factories go here before the mapper is shared.
    pub fn chain_mut(&mut self) -> &mut ChainTransformerFactory {
        &mut self.chain
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    pub fn has_mapper(&self, source: &str, target: &str) -> bool {
        self.mappers.has_mapper(source, target)
    }

    pub fn metadata(&self, source: &str, target: &str) -> MapperMetadata {
        MapperMetadata::new(source, target).with_options(&self.options)
    }

    /// Runs one lookup through the chain.
    pub fn transformer_for(
        &self,
        source: Option<&[LegacyType]>,
        target: Option<&[LegacyType]>,
        metadata: &MapperMetadata,
    ) -> Result<Option<Transformer>, MapperError> {
        let ctx = TransformerContext::new(&self.classes, self.mappers.as_ref());
        self.chain.get_transformer(source, target, metadata, &ctx)
    }

    /// Property mappings for moving a `source` value into a new `target`
    /// value.
    ///
    /// Either side may be `"array"`, in which case the other side's property
    /// list drives the plan and the array side takes the other side's types
    /// with objects turned into arrays.
    pub fn plan(&self, source: &str, target: &str) -> Result<MappingPlan, MapperError> {
        self.build_plan(source, target, false)
    }

    /// Like [`plan`](Self::plan), for populating an existing `target` value.
    /// A read-only target class is refused unless
    /// `allow_readonly_target_to_populate` is set.
    pub fn plan_into(&self, source: &str, target: &str) -> Result<MappingPlan, MapperError> {
        self.build_plan(source, target, true)
    }

    fn build_plan(
        &self,
        source: &str,
        target: &str,
        populate: bool,
    ) -> Result<MappingPlan, MapperError> {
        let source_is_array = source == ARRAY;
        let target_is_array = target == ARRAY;
        if source_is_array && target_is_array {
            return Err(MapperError::NoMapping {
                source_class: source.to_string(),
                target_class: target.to_string(),
                reason: "source and target are both arrays",
            });
        }
        for class in [source, target] {
            if class != ARRAY && self.extractor.properties(class).is_none() {
                return Err(MapperError::UnknownClass {
                    class: class.to_string(),
                });
            }
        }
        if populate
            && !target_is_array
            && self.classes.is_readonly(target)
            && !self.options.allow_readonly_target_to_populate
        {
            return Err(MapperError::ReadOnlyTarget {
                class: target.to_string(),
            });
        }

        let metadata = self.metadata(source, target);
        let driving = if target_is_array { source } else { target };
        let mut properties = Vec::new();
        let mut unmapped = Vec::new();

        for property in self.extractor.properties(driving).unwrap_or_default() {
            if !target_is_array && self.extractor.is_writable(target, &property) != Some(true) {
                trace!(%property, "target property is not writable");
                continue;
            }
            if !source_is_array && self.extractor.is_readable(source, &property) != Some(true) {
                trace!(%property, "source property is not readable");
                continue;
            }

            let (source_types, target_types) = if source_is_array {
                let target_types = self.extractor.get_types(target, &property);
                (
                    target_types.as_deref().map(|types| self.array_side_types(types)),
                    target_types,
                )
            } else if target_is_array {
                let source_types = self.extractor.get_types(source, &property);
                let target_types = source_types
                    .as_deref()
                    .map(|types| self.array_side_types(types));
                (source_types, target_types)
            } else {
                (
                    self.extractor.get_types(source, &property),
                    self.extractor.get_types(target, &property),
                )
            };

            let Some(transformer) =
                self.transformer_for(source_types.as_deref(), target_types.as_deref(), &metadata)?
            else {
                debug!(%source, %target, %property, "no transformer found, property skipped");
                unmapped.push(property);
                continue;
            };

            let source_attributes = self.attributes(source, &property);
            let target_attributes = self.attributes(target, &property);
            properties.push(PropertyMapping {
                max_depth: min_depth(source_attributes.max_depth, target_attributes.max_depth),
                property,
                source_types,
                target_types,
                transformer,
                check_exists: source_is_array,
                source_groups: source_attributes.groups,
                target_groups: target_attributes.groups,
                source_ignored: source_attributes.ignored,
                target_ignored: target_attributes.ignored,
            });
        }

        debug!(
            %source,
            %target,
            populate,
            mapped = properties.len(),
            unmapped = unmapped.len(),
            "built mapping plan"
        );
        Ok(MappingPlan {
            metadata,
            properties,
            unmapped,
        })
    }

    fn attributes(&self, class: &str, property: &str) -> PropertyAttributes {
        if class == ARRAY || !self.options.check_attributes {
            return PropertyAttributes::default();
        }
        self.extractor.attributes(class, property)
    }

    fn array_side_types(&self, types: &[LegacyType]) -> Vec<LegacyType> {
        types.iter().map(|ty| self.array_side_type(ty)).collect()
    }

    /// How a value of `ty` looks once written to or read from an array:
    /// plain objects become arrays, date-times and UIDs strings, backed
    /// enums their backing type. Collections keep their keys.
    fn array_side_type(&self, ty: &LegacyType) -> LegacyType {
        if ty.is_collection() {
            return ty
                .clone()
                .with_value_types(self.array_side_types(ty.collection_value_types()));
        }
        let Some(class) = ty
            .class_name()
            .filter(|_| ty.builtin_type() == BuiltinKind::Object)
        else {
            return ty.clone();
        };

        let kind = if self.classes.is_subclass_of(class, DATE_TIME_INTERFACE)
            || self.classes.is_subclass_of(class, ABSTRACT_UID)
        {
            BuiltinKind::String
        } else {
            match self.classes.get(class).map(|info| info.kind) {
                Some(ClassKind::BackedEnum { backing }) => backing.builtin_kind(),
                Some(ClassKind::UnitEnum) => return ty.clone(),
                _ => BuiltinKind::Array,
            }
        };
        LegacyType::new(kind).with_nullable(ty.is_nullable())
    }
}

fn min_depth(source: Option<u32>, target: Option<u32>) -> Option<u32> {
    match (source, target) {
        (Some(source), Some(target)) => Some(source.min(target)),
        (depth, None) | (None, depth) => depth,
    }
}

impl std::fmt::Debug for AutoMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoMapper")
            .field("chain", &self.chain)
            .field("classes", &self.classes.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
