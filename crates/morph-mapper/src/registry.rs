//! Which source/target pairs have a mapper.

use rustc_hash::FxHashSet;
use tracing::trace;

/// Name used for an associative-array side of a mapping.
pub const ARRAY: &str = "array";

pub trait MapperRegistry: Send + Sync {
    /// Whether values of `source` can be mapped into `target`. Either side
    /// may be `"array"`.
    fn has_mapper(&self, source: &str, target: &str) -> bool;
}

/// Mappers declared up front, optionally accepting any pair.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredMappers {
    pairs: FxHashSet<(String, String)>,
    auto_register: bool,
}

impl ConfiguredMappers {
    pub fn new(auto_register: bool) -> Self {
        Self {
            pairs: FxHashSet::default(),
            auto_register,
        }
    }

    pub fn register(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let source = source.into();
        let target = target.into();
        trace!(%source, %target, "registering mapper");
        self.pairs.insert((source, target));
    }
}

impl MapperRegistry for ConfiguredMappers {
    fn has_mapper(&self, source: &str, target: &str) -> bool {
        if source == ARRAY && target == ARRAY {
            return false;
        }
        self.auto_register || self.pairs.contains(&(source.to_string(), target.to_string()))
    }
}
