use super::*;
use crate::api::BuildOptions;
use crate::test_utils::init_test_logging;
use crate::transform::ModelTransformPipeline;
use omnigen_types::{PrimitiveKind, TargetFeatures};
use pretty_assertions::assert_eq;

fn normalize(model: &mut OmniModel, features: TargetFeatures) -> Result<(), TransformError> {
    init_test_logging();
    let options = BuildOptions {
        features,
        ..BuildOptions::default()
    };
    ModelTransformPipeline::new()
        .with_second_pass(CompositionNormalizationModelTransformer)
        .run(model, &options)
}

struct Boxed {
    model: OmniModel,
    source_identifier: TypeId,
}

impl Boxed {
    /// `Box<T>` with a single `value: T` property.
    fn new() -> Self {
        let mut model = OmniModel::new("boxes");
        let boxed = model.object("Box");
        let source_identifier = model.generic_source_identifier("T", None, None);
        model.property(boxed, "value", source_identifier).unwrap();
        let source = model.generic_source(boxed, vec![source_identifier]);
        model.export(source);
        Self {
            model,
            source_identifier,
        }
    }

    fn source(&self) -> TypeId {
        self.model
            .ids()
            .find(|id| matches!(self.model.get(*id), OmniType::GenericSource { .. }))
            .unwrap()
    }

    /// A `holder` object with a `boxed: Box<bound>` property; returns the
    /// target identifier binding `bound`.
    fn bind(&mut self, holder: &str, bound: TypeId) -> TypeId {
        let source = self.source();
        let identifier = self.model.generic_target_identifier(self.source_identifier, bound);
        let target = self.model.generic_target(source, vec![identifier]);
        let holder = self.model.object(holder);
        self.model.property(holder, "boxed", target).unwrap();
        self.model.export(holder);
        identifier
    }

    fn bound(&self, identifier: TypeId) -> TypeId {
        match self.model.get(identifier) {
            OmniType::GenericTargetIdentifier { ty, .. } => *ty,
            other => panic!("not a target identifier: {other:?}"),
        }
    }

    fn named_pet(&mut self) -> TypeId {
        let named = self.model.object("Named");
        let pet = self.model.object("Pet");
        self.model.composition(
            CompositionKind::And,
            vec![named, pet],
            Some("NamedPet".into()),
        )
    }
}

#[test]
fn bound_intersection_becomes_an_object() {
    let mut boxed = Boxed::new();
    let named_pet = boxed.named_pet();
    let identifier = boxed.bind("Holder", named_pet);

    normalize(&mut boxed.model, TargetFeatures::JAVA).unwrap();

    let object = boxed.bound(identifier);
    assert_eq!(boxed.model.describe(object), "NamedPet");
    assert_eq!(boxed.model.get(object).extended_by(), Some(named_pet));
    assert_eq!(boxed.model.get(named_pet).name(), None);
}

#[test]
fn same_composition_shares_one_object() {
    let mut boxed = Boxed::new();
    let named_pet = boxed.named_pet();
    let first = boxed.bind("First", named_pet);
    let second = boxed.bind("Second", named_pet);

    normalize(&mut boxed.model, TargetFeatures::JAVA).unwrap();

    assert_eq!(boxed.bound(first), boxed.bound(second));
}

#[test]
fn exclusive_unions_are_left_alone() {
    let mut boxed = Boxed::new();
    let cat = boxed.model.object("Cat");
    let dog = boxed.model.object("Dog");
    let pet = boxed
        .model
        .composition(CompositionKind::Xor, vec![cat, dog], Some("Pet".into()));
    boxed.bind("Holder", pet);
    let before = boxed.model.clone();

    normalize(&mut boxed.model, TargetFeatures::JAVA).unwrap();

    assert_eq!(boxed.model, before);
}

#[test]
fn union_targets_are_untouched() {
    let mut boxed = Boxed::new();
    let named_pet = boxed.named_pet();
    boxed.bind("Holder", named_pet);
    let before = boxed.model.clone();

    normalize(&mut boxed.model, TargetFeatures::TYPESCRIPT).unwrap();

    assert_eq!(boxed.model, before);
}

#[test]
fn unnamed_composition_is_rejected() {
    let mut boxed = Boxed::new();
    let named = boxed.model.object("Named");
    let pet = boxed.model.object("Pet");
    let anonymous = boxed
        .model
        .composition(CompositionKind::And, vec![named, pet], None);
    boxed.bind("Holder", anonymous);

    let err = normalize(&mut boxed.model, TargetFeatures::JAVA).unwrap_err();

    assert_eq!(
        err,
        TransformError::Precondition {
            pass: "composition-normalization",
            ty: "(Named & Pet)".into(),
            reason: "a composition needs a name to become an object".into(),
        }
    );
}

#[test]
fn primitive_members_are_rejected() {
    let mut boxed = Boxed::new();
    let int = boxed.model.primitive(PrimitiveKind::Integer);
    let pet = boxed.model.object("Pet");
    let either = boxed
        .model
        .composition(CompositionKind::Or, vec![int, pet], Some("IntOrPet".into()));
    boxed.bind("Holder", either);

    let err = normalize(&mut boxed.model, TargetFeatures::JAVA).unwrap_err();

    assert!(matches!(
        err,
        TransformError::Precondition { ref ty, .. } if ty == "int"
    ));
}
