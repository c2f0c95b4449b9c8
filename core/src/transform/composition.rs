use super::{OmniModel2ndPassTransformer, OmniModel2ndPassTransformerArgs};
use crate::errors::TransformError;
use crate::{Vec, format};
use alloc::collections::BTreeMap;
use omnigen_types::{CompositionKind, OmniModel, OmniType, TypeId};
use tracing::debug;

const PASS: &str = "composition-normalization";

/// Replaces compositions bound as generic arguments with a concrete object,
/// for targets without union or intersection types.
///
/// `Box<Named & Aged>` becomes `Box<NamedAged>` where `NamedAged` is a new
/// object that takes the composition's name and extends it. Exclusive unions
/// are left alone; they are rendered elsewhere.
pub struct CompositionNormalizationModelTransformer;

impl OmniModel2ndPassTransformer for CompositionNormalizationModelTransformer {
    fn name(&self) -> &'static str {
        PASS
    }

    fn transform_model_2nd_pass(
        &self,
        args: &mut OmniModel2ndPassTransformerArgs<'_>,
    ) -> Result<(), TransformError> {
        if args.features.unions() {
            return Ok(());
        }
        let model = &mut *args.model;

        let bindings: Vec<(TypeId, TypeId)> = model
            .ids()
            .filter_map(|id| match model.get(id) {
                OmniType::GenericTargetIdentifier { ty, .. } => Some((id, *ty)),
                _ => None,
            })
            .collect();

        let mut replacements: BTreeMap<TypeId, TypeId> = BTreeMap::new();
        for (identifier, bound) in bindings {
            let needs_object = matches!(
                model.get(bound),
                OmniType::Composition(c) if c.kind != CompositionKind::Xor
            );
            if !needs_object {
                continue;
            }

            let object = match replacements.get(&bound) {
                Some(object) => *object,
                None => {
                    let object = concrete_object(model, bound)?;
                    replacements.insert(bound, object);
                    object
                }
            };
            if let OmniType::GenericTargetIdentifier { ty, .. } = model.get_mut(identifier) {
                *ty = object;
            }
        }
        Ok(())
    }
}

/// A new object named after `composition` that extends it.
fn concrete_object(model: &mut OmniModel, composition: TypeId) -> Result<TypeId, TransformError> {
    let Some(c) = model.get(composition).as_composition() else {
        return Ok(composition);
    };

    for member in &c.types {
        if !model.get(model.unwrap_type(*member)).is_inheritable() {
            return Err(TransformError::precondition(
                PASS,
                model.describe(*member),
                format!("cannot be a supertype of {}", model.describe(composition)),
            ));
        }
    }
    let Some(name) = c.name.clone() else {
        return Err(TransformError::precondition(
            PASS,
            model.describe(composition),
            "a composition needs a name to become an object",
        ));
    };

    if let OmniType::Composition(c) = model.get_mut(composition) {
        c.name = None;
    }
    let object = model.object(name);
    model.extend(object, composition)?;
    debug!(object = %model.describe(object), "replaced composition with an object");
    Ok(object)
}

#[cfg(test)]
#[path = "composition_test.rs"]
mod composition_test;
