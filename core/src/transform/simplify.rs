use super::{OmniModelTransformer, OmniModelTransformerArgs};
use crate::Vec;
use crate::errors::TransformError;
use omnigen_types::{CompositionKind, OmniModel, OmniType, TypeId};
use tracing::debug;

/// Removes redundant members of AND compositions.
///
/// A member that another member already inherits from adds nothing:
/// `B & A` where `B extends A` is just `B`. An AND left with a single
/// member is replaced by that member everywhere.
pub struct SimplifyInheritanceModelTransformer;

impl OmniModelTransformer for SimplifyInheritanceModelTransformer {
    fn name(&self) -> &'static str {
        "simplify-inheritance"
    }

    fn transform_model(
        &self,
        args: &mut OmniModelTransformerArgs<'_>,
    ) -> Result<(), TransformError> {
        if !args.options.simplify_type_hierarchy {
            return Ok(());
        }

        let model = &mut *args.model;
        let intersections: Vec<TypeId> = model
            .ids()
            .filter(|id| {
                matches!(model.get(*id), OmniType::Composition(c) if c.kind == CompositionKind::And)
            })
            .collect();

        for id in intersections {
            let Some(members) = model.get(id).as_composition().map(|c| c.types.clone()) else {
                continue;
            };
            let kept = necessary_members(model, &members);
            if kept.len() == members.len() {
                continue;
            }
            if kept.first().is_some_and(|first| is_negation(model, *first)) {
                // Dropping the head would leave a negation first.
                continue;
            }

            match kept.as_slice() {
                [single] => {
                    debug!(
                        composition = %model.describe(id),
                        replacement = %model.describe(*single),
                        "replacing single-member intersection"
                    );
                    model.replace_type(id, *single);
                    model.retire(id);
                }
                _ => {
                    debug!(
                        composition = %model.describe(id),
                        removed = members.len() - kept.len(),
                        "dropping redundant intersection members"
                    );
                    if let OmniType::Composition(c) = model.get_mut(id) {
                        c.types = kept;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Members not already implied by another member, first occurrence kept.
fn necessary_members(model: &OmniModel, members: &[TypeId]) -> Vec<TypeId> {
    let hierarchies: Vec<Vec<TypeId>> = members.iter().map(|m| model.supertypes(*m)).collect();
    let mut kept: Vec<TypeId> = Vec::new();
    for (index, member) in members.iter().enumerate() {
        if kept.contains(member) {
            continue;
        }
        let implied = members.iter().enumerate().any(|(other, candidate)| {
            other != index && candidate != member && hierarchies[other].contains(member)
        });
        if !implied {
            kept.push(*member);
        }
    }
    kept
}

fn is_negation(model: &OmniModel, id: TypeId) -> bool {
    matches!(model.get(id), OmniType::Composition(c) if c.kind == CompositionKind::Not)
}
