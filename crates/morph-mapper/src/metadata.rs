//! Mapping metadata: per-mapper options and per-property mappings.

use crate::registry::ARRAY;
use crate::transformer::Transformer;
use morph_types::LegacyType;
use serde::Serialize;

/// `strftime`-style RFC 3339 layout.
pub const DEFAULT_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Options shared by every mapper an `AutoMapper` builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperOptions {
    pub date_time_format: String,
    pub check_attributes: bool,
    pub allow_readonly_target_to_populate: bool,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            date_time_format: DEFAULT_DATE_TIME_FORMAT.to_string(),
            check_attributes: true,
            allow_readonly_target_to_populate: false,
        }
    }
}

/// What the factories see about the mapper being built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapperMetadata {
    pub source: String,
    pub target: String,
    pub date_time_format: String,
    pub check_attributes: bool,
}

impl MapperMetadata {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            date_time_format: DEFAULT_DATE_TIME_FORMAT.to_string(),
            check_attributes: true,
        }
    }

    pub fn with_options(mut self, options: &MapperOptions) -> Self {
        self.date_time_format.clone_from(&options.date_time_format);
        self.check_attributes = options.check_attributes;
        self
    }

    pub fn source_is_array(&self) -> bool {
        self.source == ARRAY
    }

    pub fn target_is_array(&self) -> bool {
        self.target == ARRAY
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMapping {
    pub property: String,
    pub source_types: Option<Vec<LegacyType>>,
    pub target_types: Option<Vec<LegacyType>>,
    pub transformer: Transformer,
    /// The source may lack the property (array sources).
    pub check_exists: bool,
    pub source_groups: Option<Vec<String>>,
    pub target_groups: Option<Vec<String>>,
    pub max_depth: Option<u32>,
    pub source_ignored: bool,
    pub target_ignored: bool,
}

impl PropertyMapping {
    pub fn should_ignore_property(&self) -> bool {
        self.source_ignored || self.target_ignored
    }
}

/// Property mappings chosen for one source/target pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingPlan {
    pub metadata: MapperMetadata,
    pub properties: Vec<PropertyMapping>,
    /// Target properties left out because no transformer matched.
    pub unmapped: Vec<String>,
}

impl MappingPlan {
    /// Mappings that are not ignored on either side.
    pub fn active(&self) -> impl Iterator<Item = &PropertyMapping> {
        self.properties
            .iter()
            .filter(|mapping| !mapping.should_ignore_property())
    }

    pub fn get(&self, property: &str) -> Option<&PropertyMapping> {
        self.properties
            .iter()
            .find(|mapping| mapping.property == property)
    }
}
