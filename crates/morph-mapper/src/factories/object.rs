use super::{TransformerContext, TransformerFactory, unique_pair};
use crate::errors::MapperError;
use crate::metadata::MapperMetadata;
use crate::registry::ARRAY;
use crate::transformer::Transformer;
use morph_types::classes::{ABSTRACT_UID, DATE_TIME_INTERFACE};
use morph_types::{BuiltinKind, ClassRegistry, LegacyType};
use tracing::trace;

/// Nested mapping between objects, or between an object and an
/// associative array, when the mapper registry knows the pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectTransformerFactory;

impl ObjectTransformerFactory {
    pub const NAME: &'static str = "object";
}

/// Mapper-side name of a type: its class, or `array` for a non-collection
/// array. Enums, date-times, UIDs and collections have dedicated factories.
fn mapped_side<'t>(ty: &'t LegacyType, classes: &ClassRegistry) -> Option<&'t str> {
    if ty.is_collection() {
        return None;
    }
    match ty.builtin_type() {
        BuiltinKind::Array => Some(ARRAY),
        BuiltinKind::Object => {
            let class = ty.class_name()?;
            let dedicated = classes.is_enum(class)
                || classes.is_subclass_of(class, DATE_TIME_INTERFACE)
                || classes.is_subclass_of(class, ABSTRACT_UID);
            (!dedicated).then_some(class)
        }
        _ => None,
    }
}

impl TransformerFactory for ObjectTransformerFactory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        20
    }

    fn get_transformer(
        &self,
        source: Option<&[LegacyType]>,
        target: Option<&[LegacyType]>,
        _metadata: &MapperMetadata,
        ctx: &TransformerContext<'_>,
    ) -> Result<Option<Transformer>, MapperError> {
        let Some((source, target)) = unique_pair(source, target) else {
            return Ok(None);
        };
        let (Some(source_name), Some(target_name)) = (
            mapped_side(source, ctx.classes),
            mapped_side(target, ctx.classes),
        ) else {
            return Ok(None);
        };
        if source_name == ARRAY && target_name == ARRAY {
            return Ok(None);
        }
        if !ctx.mappers.has_mapper(source_name, target_name) {
            trace!(source = source_name, target = target_name, "no mapper registered");
            return Ok(None);
        }

        Ok(Some(Transformer::Object {
            source: source.clone(),
            target: target.clone(),
        }))
    }
}
