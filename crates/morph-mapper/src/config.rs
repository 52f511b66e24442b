//! JSON mapper configuration.
//!
//! A configuration declares classes (kind, parents, properties), the
//! mapper pairs to register and the mapper options. A file may `extends`
//! another file; the child's options win and its classes replace same-named
//! base classes.

use crate::extractor::{PropertyDescriptor, StaticPropertyExtractor};
use crate::metadata::{DEFAULT_DATE_TIME_FORMAT, MapperOptions};
use crate::registry::ConfiguredMappers;
use anyhow::{Context, Result, anyhow, bail};
use indexmap::IndexMap;
use morph_types::{ClassInfo, ClassRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MorphConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub date_time_format: Option<String>,
    #[serde(default)]
    pub auto_register: Option<bool>,
    #[serde(default)]
    pub allow_readonly_target_to_populate: Option<bool>,
    #[serde(default)]
    pub check_attributes: Option<bool>,
    #[serde(default)]
    pub classes: IndexMap<String, ClassConfig>,
    #[serde(default)]
    pub mappings: Vec<MappingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClassConfig {
    #[serde(flatten)]
    pub info: ClassInfo,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct MappingConfig {
    pub source: String,
    pub target: String,
}

/// Everything an `AutoMapper` is built from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub classes: ClassRegistry,
    pub extractor: StaticPropertyExtractor,
    pub mappers: ConfiguredMappers,
    pub options: MapperOptions,
}

pub fn parse_config(source: &str) -> Result<MorphConfig> {
    let config = serde_json::from_str(source).context("failed to parse mapper configuration JSON")?;
    Ok(config)
}

/// Loads a configuration file, following `extends` chains.
pub fn load_config(path: &Path) -> Result<MorphConfig> {
    let mut visited = HashSet::new();
    load_config_inner(path, &mut visited)
}

fn load_config_inner(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<MorphConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("configuration extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration: {}", path.display()))?;
    let mut config = parse_config(&source)
        .with_context(|| format!("failed to parse configuration: {}", path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_path = resolve_extends_path(path, &extends)?;
        debug!(config = %path.display(), base = %base_path.display(), "loading base configuration");
        let base = load_config_inner(&base_path, visited)?;
        config = merge_configs(base, config);
    }

    visited.remove(&canonical);
    Ok(config)
}

fn resolve_extends_path(current_path: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = current_path
        .parent()
        .ok_or_else(|| anyhow!("configuration has no parent directory"))?;
    let mut path = base_dir.join(extends);
    if path.extension().is_none() {
        path.set_extension("json");
    }
    Ok(path)
}

fn merge_configs(base: MorphConfig, child: MorphConfig) -> MorphConfig {
    let mut classes = base.classes;
    for (name, class) in child.classes {
        classes.insert(name, class);
    }

    let mut mappings = base.mappings;
    for mapping in child.mappings {
        if !mappings.contains(&mapping) {
            mappings.push(mapping);
        }
    }

    MorphConfig {
        extends: None,
        date_time_format: child.date_time_format.or(base.date_time_format),
        auto_register: child.auto_register.or(base.auto_register),
        allow_readonly_target_to_populate: child
            .allow_readonly_target_to_populate
            .or(base.allow_readonly_target_to_populate),
        check_attributes: child.check_attributes.or(base.check_attributes),
        classes,
        mappings,
    }
}

impl MorphConfig {
    pub fn options(&self) -> MapperOptions {
        MapperOptions {
            date_time_format: self
                .date_time_format
                .clone()
                .unwrap_or_else(|| DEFAULT_DATE_TIME_FORMAT.to_string()),
            check_attributes: self.check_attributes.unwrap_or(true),
            allow_readonly_target_to_populate: self
                .allow_readonly_target_to_populate
                .unwrap_or(false),
        }
    }

    /// Builds the class registry, property extractor and mapper registry.
    ///
    /// Declared classes are added on top of the builtin date-time and UID
    /// classes. Property types are resolved against the registry so enum
    /// properties carry their enum kind.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let mut classes = ClassRegistry::with_builtin_classes();
        for (name, class) in &self.classes {
            classes.register(name.as_str(), class.info.clone());
        }

        for (name, class) in &self.classes {
            for parent in &class.info.parents {
                if !classes.contains(parent) {
                    bail!("class \"{name}\" extends unknown class \"{parent}\"");
                }
            }
        }

        let mut extractor = StaticPropertyExtractor::new();
        for (name, class) in &self.classes {
            extractor.add_class(name.as_str());
            for (property, descriptor) in &class.properties {
                let mut descriptor = descriptor.clone();
                descriptor.ty = descriptor.ty.as_ref().map(|ty| classes.resolve_type(ty));
                extractor.add_property(name.as_str(), property.as_str(), descriptor);
            }
        }

        let mut mappers = ConfiguredMappers::new(self.auto_register.unwrap_or(false));
        for mapping in &self.mappings {
            mappers.register(mapping.source.as_str(), mapping.target.as_str());
        }

        debug!(
            classes = self.classes.len(),
            mappings = self.mappings.len(),
            "resolved mapper configuration"
        );

        Ok(ResolvedConfig {
            classes,
            extractor,
            mappers,
            options: self.options(),
        })
    }
}
