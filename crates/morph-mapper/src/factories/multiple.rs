use super::{TransformerContext, TransformerFactory};
use crate::errors::MapperError;
use crate::metadata::MapperMetadata;
use crate::transformer::{MultipleBranch, Transformer};
use morph_types::LegacyType;
use tracing::trace;

/// Several candidate source types: one sub-transformer per source type,
/// dispatched at runtime on the value's actual type.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultipleTransformerFactory;

impl MultipleTransformerFactory {
    pub const NAME: &'static str = "multiple";
}

impl TransformerFactory for MultipleTransformerFactory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        128
    }

    fn get_transformer(
        &self,
        source: Option<&[LegacyType]>,
        target: Option<&[LegacyType]>,
        metadata: &MapperMetadata,
        ctx: &TransformerContext<'_>,
    ) -> Result<Option<Transformer>, MapperError> {
        let Some(source) = source.filter(|source| source.len() > 1) else {
            return Ok(None);
        };

        let mut branches = Vec::with_capacity(source.len());
        for source_type in source {
            let single = std::slice::from_ref(source_type);
            match ctx.delegate(Self::NAME, Some(single), target, metadata)? {
                Some(transformer) => branches.push(MultipleBranch {
                    source: source_type.clone(),
                    transformer,
                }),
                None => trace!(source = %source_type, "no transformer for source candidate"),
            }
        }

        Ok(match branches.len() {
            0 => None,
            1 => branches.pop().map(|branch| branch.transformer),
            _ => Some(Transformer::Multiple { branches }),
        })
    }
}
