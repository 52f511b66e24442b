use super::{TransformerContext, TransformerFactory, unique_pair};
use crate::errors::MapperError;
use crate::metadata::MapperMetadata;
use crate::transformer::Transformer;
use morph_types::{BuiltinKind, LegacyType};

/// Collection to collection, element by element.
///
/// Without value types on either side the collection is copied as is;
/// otherwise the chain must find an element transformer. String-keyed
/// sources keep their keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayTransformerFactory;

impl ArrayTransformerFactory {
    pub const NAME: &'static str = "array";
}

fn has_string_keys(ty: &LegacyType) -> bool {
    matches!(ty.collection_key_types(), [key] if key.builtin_type() == BuiltinKind::String)
}

impl TransformerFactory for ArrayTransformerFactory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        4
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
        if !source.is_collection() || !target.is_collection() {
            return Ok(None);
        }

        let source_values = source.collection_value_types();
        let target_values = target.collection_value_types();
        if source_values.is_empty() || target_values.is_empty() {
            return Ok(Some(Transformer::Copy));
        }

        let element = ctx.delegate(Self::NAME, Some(source_values), Some(target_values), metadata)?;
        Ok(element.map(|element| {
            if has_string_keys(source) {
                Transformer::dictionary(element)
            } else {
                Transformer::array(element)
            }
        }))
    }
}
