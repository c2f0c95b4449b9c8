use super::{
    OmniModel2ndPassTransformer, OmniModel2ndPassTransformerArgs, OmniModelTransformer,
    OmniModelTransformerArgs, object_supertypes, retire_dropped,
};
use crate::api::ModelTransformOptions;
use crate::errors::TransformError;
use crate::{Vec, vec};
use alloc::collections::BTreeMap;
use omnigen_types::{
    CommonProperty, CommonType, EqualityLevel, OmniModel, OmniProperty, PropertyDiffKind,
    TargetFeatures, TypeDiffKind, TypeDiffer, TypeId, UnknownKind,
};
use tracing::{debug, trace};

/// Moves properties that every subtype shares into their supertype.
///
/// ```text
/// Animal {}                    Animal { name }
/// Dog : Animal { name, bark }  Dog : Animal { bark }
/// Cat : Animal { name }        Cat : Animal {}
/// ```
///
/// The first pass grades against a target that can express everything, so
/// only properties that stay equal in any language move. The second pass
/// repeats the work with the real target, where e.g. two string literals
/// may become one abstract string property.
pub struct ElevateCommonPropertiesModelTransformer;

impl OmniModelTransformer for ElevateCommonPropertiesModelTransformer {
    fn name(&self) -> &'static str {
        "elevate-properties"
    }

    fn transform_model(
        &self,
        args: &mut OmniModelTransformerArgs<'_>,
    ) -> Result<(), TransformError> {
        elevate(
            args.model,
            args.options,
            args.parser_options.default_unknown_kind,
            TargetFeatures::GENERIC,
        );
        Ok(())
    }
}

impl OmniModel2ndPassTransformer for ElevateCommonPropertiesModelTransformer {
    fn name(&self) -> &'static str {
        "elevate-properties"
    }

    fn transform_model_2nd_pass(
        &self,
        args: &mut OmniModel2ndPassTransformerArgs<'_>,
    ) -> Result<(), TransformError> {
        elevate(
            args.model,
            args.options,
            args.parser_options.default_unknown_kind,
            args.features,
        );
        Ok(())
    }
}

/// One property to add to the supertype.
struct Elevation {
    property: OmniProperty,
    common: CommonType,
    /// Subtype copies to delete; empty for an abstract property.
    remove: Vec<(TypeId, usize)>,
}

fn elevate(
    model: &mut OmniModel,
    options: &ModelTransformOptions,
    unknown_kind: UnknownKind,
    features: TargetFeatures,
) {
    if !options.elevate_properties {
        return;
    }

    let mut banned = vec![TypeDiffKind::FundamentalType, TypeDiffKind::IsomorphicType];
    if features.literal_types() {
        banned.push(TypeDiffKind::NarrowedLiteralType);
    }

    for sup in object_supertypes(model) {
        let subtypes = model.direct_subtypes(sup);
        if subtypes.len() < 2 {
            continue;
        }
        let plan = plan(model, sup, &subtypes, &banned, options, features);
        if plan.is_empty() {
            continue;
        }
        debug!(
            supertype = %model.describe(sup),
            count = plan.len(),
            "elevating properties"
        );
        apply(model, sup, plan, unknown_kind);
    }
}

/// Decide everything before touching the model, so that property indices
/// stay valid until the removals run.
fn plan(
    model: &OmniModel,
    sup: TypeId,
    subtypes: &[TypeId],
    banned: &[TypeDiffKind],
    options: &ModelTransformOptions,
    features: TargetFeatures,
) -> Vec<Elevation> {
    let differ = TypeDiffer::new(model, features);
    let owned = model.get(sup).properties();

    let mut out = Vec::new();
    for candidate in differ.common_properties(subtypes, banned, &[PropertyDiffKind::Name]) {
        if owned.iter().any(|p| p.name == candidate.name) {
            trace!(property = %candidate.name, "supertype already declares it");
            continue;
        }
        let Some(common) = candidate.common.clone() else {
            continue;
        };

        let literal_only = !candidate.type_diffs.is_empty()
            && candidate
                .type_diffs
                .iter()
                .all(|d| *d == TypeDiffKind::NarrowedLiteralType);
        if !meets_thresholds(&candidate, literal_only, options) {
            trace!(property = %candidate.name, "below equality threshold");
            continue;
        }

        let copies: Vec<&OmniProperty> = candidate
            .locations
            .iter()
            .map(|(owner, index)| &model.get(*owner).properties()[*index])
            .collect();
        let Some(first) = copies.first() else {
            continue;
        };

        let mut property = (*first).clone();
        property.owner = sup;
        property.required = copies.iter().all(|p| p.required);
        property.deprecated = copies.iter().all(|p| p.deprecated);
        let remove = if literal_only {
            property.is_abstract = true;
            property.description = None;
            Vec::new()
        } else {
            candidate.locations.clone()
        };

        out.push(Elevation {
            property,
            common,
            remove,
        });
    }
    out
}

fn meets_thresholds(
    candidate: &CommonProperty,
    literal_only: bool,
    options: &ModelTransformOptions,
) -> bool {
    // Literal narrowing is bridged by an abstract property, so it is not graded.
    let (type_diffs, property_diffs): (Vec<TypeDiffKind>, Vec<PropertyDiffKind>) = if literal_only
    {
        let property_diffs = candidate
            .property_diffs
            .iter()
            .copied()
            .filter(|d| *d != PropertyDiffKind::Type)
            .collect();
        (Vec::new(), property_diffs)
    } else {
        (candidate.type_diffs.clone(), candidate.property_diffs.clone())
    };

    EqualityLevel::of(&type_diffs, &property_diffs).meets(options.elevate_properties_more_equal_than)
        && EqualityLevel::of(&type_diffs, &[])
            .meets(options.elevate_properties_with_types_more_equal_than)
}

fn apply(model: &mut OmniModel, sup: TypeId, plan: Vec<Elevation>, unknown_kind: UnknownKind) {
    let mut removals: BTreeMap<TypeId, Vec<usize>> = BTreeMap::new();
    let mut dropped = Vec::new();
    let mut additions = Vec::with_capacity(plan.len());

    for Elevation {
        mut property,
        common,
        remove,
    } in plan
    {
        property.ty = common.materialize(model, unknown_kind);
        for (owner, index) in remove {
            dropped.push(model.get(owner).properties()[index].ty);
            removals.entry(owner).or_default().push(index);
        }
        additions.push(property);
    }

    for (owner, mut indices) in removals {
        indices.sort_unstable();
        indices.dedup();
        if let Some(object) = model.get_object_mut(owner) {
            for index in indices.into_iter().rev() {
                object.properties.remove(index);
            }
        }
    }
    if let Some(object) = model.get_object_mut(sup) {
        object.properties.extend(additions);
    }
    retire_dropped(model, &dropped);
}

#[cfg(test)]
#[path = "elevate_test.rs"]
mod elevate_test;
