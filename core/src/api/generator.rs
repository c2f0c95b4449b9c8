//! Orchestration of a whole build.

use super::BuildOptions;
use crate::ast::RootAstNode;
use crate::errors::TransformError;
use crate::interpret::{
    AddAccessorsAstTransformer, AstTransformer, AstTransformerArguments, ExternalSyntaxTree,
    Interpreter, ReorderMembersAstTransformer,
};
use crate::transform::ModelTransformPipeline;
use crate::{Box, Vec};
use bumpalo::Bump;
use omnigen_types::OmniModel;
use tracing::debug;

/// Runs model passes, interpretation and tree passes for one target.
///
/// # Lifetimes
///
/// - `'a`: Lifetime of the arena holding every syntax tree this generator
///   builds. Trees borrow from it, not from the generator.
///
/// The generator holds no per-build state, so one instance can build any
/// number of models, each with its own result.
pub struct Generator<'a> {
    arena: &'a Bump,
    options: BuildOptions,
    pipeline: ModelTransformPipeline,
    ast_transformers: Vec<Box<dyn AstTransformer>>,
}

impl<'a> Generator<'a> {
    /// A generator with the standard model and tree transformers.
    pub fn new(arena: &'a Bump, options: BuildOptions) -> Self {
        Self {
            arena,
            options,
            pipeline: ModelTransformPipeline::standard(),
            ast_transformers: Vec::new(),
        }
        .with_ast_transformer(AddAccessorsAstTransformer)
        .with_ast_transformer(ReorderMembersAstTransformer)
    }

    /// Replace the model transformers.
    pub fn with_pipeline(mut self, pipeline: ModelTransformPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Drop every tree transformer, including the standard ones.
    pub fn without_ast_transformers(mut self) -> Self {
        self.ast_transformers.clear();
        self
    }

    pub fn with_ast_transformer(mut self, transformer: impl AstTransformer + 'static) -> Self {
        self.ast_transformers.push(Box::new(transformer));
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn ast_transformer_names(&self) -> Vec<&'static str> {
        self.ast_transformers.iter().map(|t| t.name()).collect()
    }

    /// Run both model stages only.
    pub fn transform_model(&self, model: &mut OmniModel) -> Result<(), TransformError> {
        self.pipeline.run(model, &self.options)
    }

    pub fn generate(&self, model: &mut OmniModel) -> Result<RootAstNode<'a>, TransformError> {
        self.generate_with_externals(model, &[])
    }

    /// Build `model`, giving tree transformers access to the trees of
    /// models it references.
    ///
    /// Any error aborts the build; the model may then be partially
    /// transformed and should be discarded.
    pub fn generate_with_externals(
        &self,
        model: &mut OmniModel,
        externals: &[ExternalSyntaxTree<'_, 'a>],
    ) -> Result<RootAstNode<'a>, TransformError> {
        self.transform_model(model)?;

        let model = &*model;
        let mut root = Interpreter::build(self.arena, model, &self.options)?;
        for transformer in &self.ast_transformers {
            debug!(pass = transformer.name(), "running tree transformer");
            let mut args = AstTransformerArguments {
                model,
                root: &mut root,
                externals,
                options: &self.options,
                features: self.options.features,
            };
            transformer.transform_ast(&mut args)?;
        }

        root.verify_references()?;
        Ok(root)
    }
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod generator_test;
