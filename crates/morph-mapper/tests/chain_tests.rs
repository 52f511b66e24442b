use super::*;
use morph_types::{BuiltinKind, ClassRegistry, LegacyType};

struct FixedFactory {
    name: &'static str,
    priority: i32,
    answer: Option<Transformer>,
}

impl TransformerFactory for FixedFactory {
    fn name(&self) -> &'static str {
        self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn get_transformer(
        &self,
        _source: Option<&[LegacyType]>,
        _target: Option<&[LegacyType]>,
        _metadata: &MapperMetadata,
        _ctx: &TransformerContext<'_>,
    ) -> Result<Option<Transformer>, MapperError> {
        Ok(self.answer.clone())
    }
}

fn fixed(name: &'static str, priority: i32, answer: Option<Transformer>) -> FixedFactory {
    FixedFactory {
        name,
        priority,
        answer,
    }
}

fn lookup(chain: &ChainTransformerFactory) -> Option<Transformer> {
    let classes = ClassRegistry::with_builtin_classes();
    let mappers = ConfiguredMappers::default();
    let ctx = TransformerContext::new(&classes, &mappers);
    chain
        .get_transformer(Some(&[]), Some(&[]), &MapperMetadata::new("A", "B"), &ctx)
        .unwrap()
}

#[test]
fn test_chain_returns_sub_factory_transformer() {
    let mut chain = ChainTransformerFactory::new();
    chain.add(fixed("copy", 1, Some(Transformer::Copy)));
    assert_eq!(lookup(&chain), Some(Transformer::Copy));
}

#[test]
fn test_chain_without_match_returns_none() {
    let mut chain = ChainTransformerFactory::new();
    chain.add(fixed("nothing", 1, None));
    assert_eq!(lookup(&chain), None);
    assert_eq!(lookup(&ChainTransformerFactory::new()), None);
}

#[test]
fn test_chain_orders_by_descending_priority() {
    let mut chain = ChainTransformerFactory::new();
    chain.add(fixed("low", 1, Some(Transformer::SourceEnum)));
    chain.add(fixed("high", 10, Some(Transformer::Copy)));
    chain.add(fixed("middle", 5, None));
    assert_eq!(chain.names(), vec!["high", "middle", "low"]);
    assert_eq!(lookup(&chain), Some(Transformer::Copy));
}

#[test]
fn test_chain_keeps_registration_order_on_ties() {
    let mut chain = ChainTransformerFactory::new();
    chain.add(fixed("first", 3, Some(Transformer::SourceEnum)));
    chain.add(fixed("second", 3, Some(Transformer::Copy)));
    assert_eq!(chain.names(), vec!["first", "second"]);
    assert_eq!(lookup(&chain), Some(Transformer::SourceEnum));
}

#[test]
fn test_chain_ignores_duplicate_names() {
    let mut chain = ChainTransformerFactory::new();
    chain.add(fixed("same", 1, Some(Transformer::SourceEnum)));
    chain.add(fixed("same", 100, Some(Transformer::Copy)));
    assert_eq!(chain.len(), 1);
    assert_eq!(lookup(&chain), Some(Transformer::SourceEnum));
}

#[test]
fn test_default_chain_order() {
    let chain = ChainTransformerFactory::with_default_factories();
    assert_eq!(
        chain.names(),
        vec![
            MultipleTransformerFactory::NAME,
            NullableTransformerFactory::NAME,
            UniqueTypeTransformerFactory::NAME,
            UidTransformerFactory::NAME,
            ObjectTransformerFactory::NAME,
            EnumTransformerFactory::NAME,
            DateTimeTransformerFactory::NAME,
            BuiltinTransformerFactory::NAME,
            ArrayTransformerFactory::NAME,
        ]
    );
}

#[test]
fn test_custom_factory_without_priority_runs_first() {
    struct AlwaysCopy;

    impl TransformerFactory for AlwaysCopy {
        fn name(&self) -> &'static str {
            "always_copy"
        }

        fn get_transformer(
            &self,
            _source: Option<&[LegacyType]>,
            _target: Option<&[LegacyType]>,
            _metadata: &MapperMetadata,
            _ctx: &TransformerContext<'_>,
        ) -> Result<Option<Transformer>, MapperError> {
            Ok(Some(Transformer::Copy))
        }
    }

    let mut chain = ChainTransformerFactory::with_default_factories();
    chain.add(AlwaysCopy);
    assert_eq!(chain.names().first(), Some(&"always_copy"));

    let classes = ClassRegistry::with_builtin_classes();
    let mappers = ConfiguredMappers::default();
    let ctx = TransformerContext::new(&classes, &mappers);
    let source = [LegacyType::new(BuiltinKind::Int)];
    let target = [LegacyType::new(BuiltinKind::String)];
    let transformer = chain
        .get_transformer(Some(&source), Some(&target), &MapperMetadata::new("A", "B"), &ctx)
        .unwrap();
    assert_eq!(transformer, Some(Transformer::Copy));
}

#[test]
fn test_delegating_factory_without_chain_fails() {
    let classes = ClassRegistry::with_builtin_classes();
    let mappers = ConfiguredMappers::default();
    let ctx = TransformerContext::new(&classes, &mappers);
    let source = [
        LegacyType::new(BuiltinKind::String),
        LegacyType::new(BuiltinKind::Int),
    ];
    let err = MultipleTransformerFactory
        .get_transformer(Some(&source), Some(&[]), &MapperMetadata::new("A", "B"), &ctx)
        .unwrap_err();
    assert_eq!(
        err,
        MapperError::MissingChain {
            factory: MultipleTransformerFactory::NAME
        }
    );
}
