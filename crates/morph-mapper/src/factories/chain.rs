use super::{
    ArrayTransformerFactory, BuiltinTransformerFactory, DateTimeTransformerFactory,
    EnumTransformerFactory, MultipleTransformerFactory, NullableTransformerFactory,
    ObjectTransformerFactory, TransformerContext, TransformerFactory, UidTransformerFactory,
    UniqueTypeTransformerFactory,
};
use crate::errors::MapperError;
use crate::metadata::MapperMetadata;
use crate::transformer::Transformer;
use morph_types::LegacyType;
use tracing::{debug, trace};

/// Factories ordered by descending priority, ties in registration order.
///
/// Built with `&mut self`, then shared read-only: lookups take `&self`.
#[derive(Default)]
pub struct ChainTransformerFactory {
    factories: Vec<Box<dyn TransformerFactory>>,
}

impl ChainTransformerFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain holding every standard factory.
    pub fn with_default_factories() -> Self {
        let mut chain = Self::new();
        chain.add(MultipleTransformerFactory);
        chain.add(NullableTransformerFactory);
        chain.add(UniqueTypeTransformerFactory);
        chain.add(UidTransformerFactory);
        chain.add(ObjectTransformerFactory);
        chain.add(EnumTransformerFactory);
        chain.add(DateTimeTransformerFactory);
        chain.add(BuiltinTransformerFactory);
        chain.add(ArrayTransformerFactory);
        chain
    }

    /// Adds a factory. A factory whose name is already present is ignored.
    pub fn add(&mut self, factory: impl TransformerFactory + 'static) {
        self.add_boxed(Box::new(factory));
    }

    pub fn add_boxed(&mut self, factory: Box<dyn TransformerFactory>) {
        if self.has(factory.name()) {
            debug!(factory = factory.name(), "transformer factory already registered");
            return;
        }
        let priority = factory.priority();
        let position = self
            .factories
            .iter()
            .position(|existing| existing.priority() < priority)
            .unwrap_or(self.factories.len());
        trace!(factory = factory.name(), priority, position, "adding transformer factory");
        self.factories.insert(position, factory);
    }

    pub fn has(&self, name: &str) -> bool {
        self.factories.iter().any(|factory| factory.name() == name)
    }

    /// Factory names in lookup order.
    pub fn names(&self) -> Vec<&'static str> {
        self.factories.iter().map(|factory| factory.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// First transformer any factory produces. Factories are invoked with
    /// this chain in their context, so delegating factories recurse here.
    pub fn get_transformer(
        &self,
        source: Option<&[LegacyType]>,
        target: Option<&[LegacyType]>,
        metadata: &MapperMetadata,
        ctx: &TransformerContext<'_>,
    ) -> Result<Option<Transformer>, MapperError> {
        let ctx = ctx.with_chain(self);
        for factory in &self.factories {
            if let Some(transformer) = factory.get_transformer(source, target, metadata, &ctx)? {
                trace!(
                    factory = factory.name(),
                    transformer = %transformer,
                    "transformer factory matched"
                );
                return Ok(Some(transformer));
            }
        }
        Ok(None)
    }
}

impl std::fmt::Debug for ChainTransformerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainTransformerFactory")
            .field("factories", &self.names())
            .finish()
    }
}
