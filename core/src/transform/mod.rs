//! Model transformer engine.
//!
//! A build runs two strictly ordered stages over one [`OmniModel`]. First
//! pass transformers ([`OmniModelTransformer`]) may restructure the model
//! freely. Second pass transformers ([`OmniModel2ndPassTransformer`]) also
//! see the target's options and capabilities, and only rewrite what that
//! target cannot express. Within a stage, transformers run in registration
//! order.

mod composition;
mod elevate;
mod generics;
mod interface;
mod simplify;

pub use composition::CompositionNormalizationModelTransformer;
pub use elevate::ElevateCommonPropertiesModelTransformer;
pub use generics::GenericsModelTransformer;
pub(crate) use generics::pascal_case;
pub use interface::{InterfaceExtractionModelTransformer, InterfaceExtractor};
pub use simplify::SimplifyInheritanceModelTransformer;

use crate::api::{BuildOptions, ModelTransformOptions, ParserOptions, TargetOptions};
use crate::errors::TransformError;
use crate::{Box, Vec};
use alloc::collections::BTreeSet;
use core::cmp::Reverse;
use omnigen_types::{OmniModel, OmniType, TargetFeatures, TypeId};
use tracing::{debug, trace};

/// What a first-pass transformer gets to work with.
pub struct OmniModelTransformerArgs<'m> {
    pub model: &'m mut OmniModel,
    pub parser_options: &'m ParserOptions,
    pub options: &'m ModelTransformOptions,
}

/// What a second-pass transformer gets to work with.
pub struct OmniModel2ndPassTransformerArgs<'m> {
    pub model: &'m mut OmniModel,
    pub parser_options: &'m ParserOptions,
    pub options: &'m ModelTransformOptions,
    pub target_options: &'m TargetOptions,
    pub features: TargetFeatures,
}

pub trait OmniModelTransformer {
    fn name(&self) -> &'static str;

    fn transform_model(&self, args: &mut OmniModelTransformerArgs<'_>)
    -> Result<(), TransformError>;
}

pub trait OmniModel2ndPassTransformer {
    fn name(&self) -> &'static str;

    fn transform_model_2nd_pass(
        &self,
        args: &mut OmniModel2ndPassTransformerArgs<'_>,
    ) -> Result<(), TransformError>;
}

/// Ordered lists of transformers for both stages.
///
/// The model is validated before the first stage and after each one, so a
/// pass that breaks an integrity rule is reported right after its stage.
///
/// # Example
///
/// ```
/// use omnigen_core::api::BuildOptions;
/// use omnigen_core::transform::ModelTransformPipeline;
/// use omnigen_types::{OmniModel, PrimitiveKind};
///
/// let mut model = OmniModel::new("example");
/// let pet = model.object("Pet");
/// let string = model.primitive(PrimitiveKind::String);
/// model.property(pet, "name", string).unwrap();
/// model.export(pet);
///
/// let before = model.clone();
/// ModelTransformPipeline::standard()
///     .run(&mut model, &BuildOptions::default())
///     .unwrap();
/// assert_eq!(model, before);
/// ```
#[derive(Default)]
pub struct ModelTransformPipeline {
    first_pass: Vec<Box<dyn OmniModelTransformer>>,
    second_pass: Vec<Box<dyn OmniModel2ndPassTransformer>>,
}

impl ModelTransformPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default set of passes, in their canonical order.
    pub fn standard() -> Self {
        Self::new()
            .with_first_pass(SimplifyInheritanceModelTransformer)
            .with_first_pass(ElevateCommonPropertiesModelTransformer)
            .with_first_pass(GenericsModelTransformer)
            .with_second_pass(ElevateCommonPropertiesModelTransformer)
            .with_second_pass(CompositionNormalizationModelTransformer)
            .with_second_pass(InterfaceExtractionModelTransformer)
    }

    pub fn with_first_pass(mut self, transformer: impl OmniModelTransformer + 'static) -> Self {
        self.first_pass.push(Box::new(transformer));
        self
    }

    pub fn with_second_pass(
        mut self,
        transformer: impl OmniModel2ndPassTransformer + 'static,
    ) -> Self {
        self.second_pass.push(Box::new(transformer));
        self
    }

    pub fn first_pass_names(&self) -> Vec<&'static str> {
        self.first_pass.iter().map(|t| t.name()).collect()
    }

    pub fn second_pass_names(&self) -> Vec<&'static str> {
        self.second_pass.iter().map(|t| t.name()).collect()
    }

    pub fn run(&self, model: &mut OmniModel, options: &BuildOptions) -> Result<(), TransformError> {
        self.run_first_pass(model, options)?;
        self.run_second_pass(model, options)
    }

    pub fn run_first_pass(
        &self,
        model: &mut OmniModel,
        options: &BuildOptions,
    ) -> Result<(), TransformError> {
        model.validate()?;
        let mut args = OmniModelTransformerArgs {
            model,
            parser_options: &options.parser,
            options: &options.transform,
        };
        for transformer in &self.first_pass {
            debug!(pass = transformer.name(), "running first-pass transformer");
            transformer.transform_model(&mut args)?;
        }
        args.model.validate()?;
        Ok(())
    }

    pub fn run_second_pass(
        &self,
        model: &mut OmniModel,
        options: &BuildOptions,
    ) -> Result<(), TransformError> {
        let mut args = OmniModel2ndPassTransformerArgs {
            model,
            parser_options: &options.parser,
            options: &options.transform,
            target_options: &options.target,
            features: options.features,
        };
        for transformer in &self.second_pass {
            debug!(pass = transformer.name(), "running second-pass transformer");
            transformer.transform_model_2nd_pass(&mut args)?;
        }
        args.model.validate()?;
        Ok(())
    }
}

/// Objects that some other object extends, deepest first, then by id.
///
/// Deepest first means a type's own subtypes are handled before the type
/// itself is treated as a supertype.
pub(crate) fn object_supertypes(model: &OmniModel) -> Vec<TypeId> {
    let mut supertypes = BTreeSet::new();
    for id in model.ids() {
        if let Some(sup) = model.get_object(id).and_then(|o| o.extended_by) {
            if matches!(model.get(sup), OmniType::Object(_)) {
                supertypes.insert(sup);
            }
        }
    }
    let mut ordered: Vec<TypeId> = supertypes.into_iter().collect();
    ordered.sort_by_key(|id| (Reverse(model.depth(*id)), *id));
    ordered
}

/// Retire every type in `dropped` (and below) that nothing reaches anymore.
///
/// Passes call this with the types of edges they removed, so that a
/// rewrite never leaves orphans behind.
pub(crate) fn retire_dropped(model: &mut OmniModel, dropped: &[TypeId]) -> usize {
    let reachable = model.reachable_types();
    let mut unreachable = BTreeSet::new();
    let mut stack = dropped.to_vec();
    while let Some(id) = stack.pop() {
        if reachable.contains(id) || model.is_retired(id) || !unreachable.insert(id) {
            continue;
        }
        stack.extend(model.children(id));
    }
    for id in &unreachable {
        trace!(ty = %id, "retiring unreachable type");
        model.retire(*id);
    }
    unreachable.len()
}
