use super::{TransformerContext, TransformerFactory, unique_pair};
use crate::errors::MapperError;
use crate::metadata::MapperMetadata;
use crate::transformer::Transformer;
use morph_types::classes::{DATE_TIME, DATE_TIME_IMMUTABLE, DATE_TIME_INTERFACE};
use morph_types::{BuiltinKind, ClassRegistry, LegacyType};

/// Date-time values: copied or converted between mutable and immutable
/// classes, formatted to strings and parsed from strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeTransformerFactory;

impl DateTimeTransformerFactory {
    pub const NAME: &'static str = "date_time";
}

fn date_time_class<'t>(ty: &'t LegacyType, classes: &ClassRegistry) -> Option<&'t str> {
    if ty.builtin_type() != BuiltinKind::Object {
        return None;
    }
    ty.class_name()
        .filter(|class| classes.is_subclass_of(class, DATE_TIME_INTERFACE))
}

fn is_string(ty: &LegacyType) -> bool {
    ty.builtin_type() == BuiltinKind::String
}

impl TransformerFactory for DateTimeTransformerFactory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        16
    }

    fn get_transformer(
        &self,
        source: Option<&[LegacyType]>,
        target: Option<&[LegacyType]>,
        metadata: &MapperMetadata,
        ctx: &TransformerContext<'_>,
    ) -> Result<Option<Transformer>, MapperError> {
        let Some((source, target)) = unique_pair(source, target) else {
            return Ok(None);
        };
        let classes = ctx.classes;

        let transformer = match (date_time_class(source, classes), date_time_class(target, classes)) {
            (Some(source_class), Some(target_class)) => {
                let source_mutable = classes.is_subclass_of(source_class, DATE_TIME);
                let target_mutable = classes.is_subclass_of(target_class, DATE_TIME);
                Some(match (source_mutable, target_mutable) {
                    (true, false) => Transformer::DateTimeMutableToImmutable,
                    (false, true) => Transformer::DateTimeImmutableToMutable,
                    _ => Transformer::Copy,
                })
            }
            (Some(_), None) if is_string(target) => Some(Transformer::DateTimeToString {
                format: metadata.date_time_format.clone(),
            }),
            (None, Some(target_class)) if is_string(source) => {
                // The interface cannot be instantiated; parse into the
                // immutable class instead.
                let class = if target_class == DATE_TIME_INTERFACE {
                    DATE_TIME_IMMUTABLE
                } else {
                    target_class
                };
                Some(Transformer::StringToDateTime {
                    class: class.to_string(),
                    format: metadata.date_time_format.clone(),
                })
            }
            _ => None,
        };
        Ok(transformer)
    }
}
