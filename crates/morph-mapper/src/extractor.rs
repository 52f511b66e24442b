//! Property introspection.
//!
//! The mapper never inspects classes itself; it asks these extractors. The
//! static extractor answers from declarations loaded out of configuration.

use indexmap::IndexMap;
use morph_types::{LegacyType, Type, convert_type_to_legacy_types};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub trait PropertyListExtractor {
    /// Property names of `class` in declaration order, or `None` for an
    /// unknown class.
    fn properties(&self, class: &str) -> Option<Vec<String>>;
}

pub trait PropertyTypeExtractor {
    fn get_type(&self, class: &str, property: &str) -> Option<Type>;

    /// The property type flattened into legacy types.
    fn get_types(&self, class: &str, property: &str) -> Option<Vec<LegacyType>> {
        convert_type_to_legacy_types(self.get_type(class, property).as_ref(), true)
    }
}

pub trait PropertyAccessExtractor {
    fn is_readable(&self, class: &str, property: &str) -> Option<bool>;
    fn is_writable(&self, class: &str, property: &str) -> Option<bool>;
}

/// Serialization attributes attached to a property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyAttributes {
    pub groups: Option<Vec<String>>,
    pub max_depth: Option<u32>,
    pub ignored: bool,
}

pub trait PropertyAttributeExtractor {
    fn attributes(&self, class: &str, property: &str) -> PropertyAttributes;
}

/// Everything the planner needs from an extractor.
pub trait PropertyExtractor:
    PropertyListExtractor
    + PropertyTypeExtractor
    + PropertyAccessExtractor
    + PropertyAttributeExtractor
    + Send
    + Sync
{
}

impl<T> PropertyExtractor for T where
    T: PropertyListExtractor
        + PropertyTypeExtractor
        + PropertyAccessExtractor
        + PropertyAttributeExtractor
        + Send
        + Sync
{
}

fn default_true() -> bool {
    true
}

/// Declared property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    #[serde(rename = "type", default)]
    pub ty: Option<Type>,
    #[serde(default)]
    pub groups: Option<Vec<String>>,
    #[serde(default)]
    pub max_depth: Option<u32>,
    #[serde(default)]
    pub ignored: bool,
    #[serde(default = "default_true")]
    pub readable: bool,
    #[serde(default = "default_true")]
    pub writable: bool,
}

impl PropertyDescriptor {
    pub fn new(ty: Option<Type>) -> Self {
        Self {
            ty,
            groups: None,
            max_depth: None,
            ignored: false,
            readable: true,
            writable: true,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }
}

/// In-memory extractor fed from declarations.
#[derive(Debug, Clone, Default)]
pub struct StaticPropertyExtractor {
    classes: FxHashMap<String, IndexMap<String, PropertyDescriptor>>,
}

impl StaticPropertyExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a class (possibly without properties).
    pub fn add_class(&mut self, class: impl Into<String>) {
        self.classes.entry(class.into()).or_default();
    }

    pub fn add_property(
        &mut self,
        class: impl Into<String>,
        property: impl Into<String>,
        descriptor: PropertyDescriptor,
    ) {
        self.classes
            .entry(class.into())
            .or_default()
            .insert(property.into(), descriptor);
    }

    pub fn descriptor(&self, class: &str, property: &str) -> Option<&PropertyDescriptor> {
        self.classes.get(class)?.get(property)
    }
}

impl PropertyListExtractor for StaticPropertyExtractor {
    fn properties(&self, class: &str) -> Option<Vec<String>> {
        self.classes
            .get(class)
            .map(|properties| properties.keys().cloned().collect())
    }
}

impl PropertyTypeExtractor for StaticPropertyExtractor {
    fn get_type(&self, class: &str, property: &str) -> Option<Type> {
        self.descriptor(class, property)?.ty.clone()
    }
}

impl PropertyAccessExtractor for StaticPropertyExtractor {
    fn is_readable(&self, class: &str, property: &str) -> Option<bool> {
        self.descriptor(class, property).map(|descriptor| descriptor.readable)
    }

    fn is_writable(&self, class: &str, property: &str) -> Option<bool> {
        self.descriptor(class, property).map(|descriptor| descriptor.writable)
    }
}

impl PropertyAttributeExtractor for StaticPropertyExtractor {
    fn attributes(&self, class: &str, property: &str) -> PropertyAttributes {
        self.descriptor(class, property)
            .map(|descriptor| PropertyAttributes {
                groups: descriptor.groups.clone(),
                max_depth: descriptor.max_depth,
                ignored: descriptor.ignored,
            })
            .unwrap_or_default()
    }
}
