use super::{OmniModelTransformer, OmniModelTransformerArgs, object_supertypes};
use crate::api::ModelTransformOptions;
use crate::errors::TransformError;
use crate::{String, Vec, format};
use alloc::collections::BTreeMap;
use omnigen_types::{
    CommonType, OmniModel, OmniProperty, OmniType, PropertyDiffKind, TargetFeatures, TypeDiffer,
    TypeId, UnknownKind,
};
use tracing::{debug, warn};

/// Turns a family of subtypes that differ only in property types into
/// bindings of one generic supertype.
///
/// ```text
/// A { a: int }                 A<T extends double> { a: int, x: T }
/// AA : A { x: int }      =>    AA : A<int> {}
/// AB : A { x: double }         AB : A<double> {}
/// ```
pub struct GenericsModelTransformer;

impl OmniModelTransformer for GenericsModelTransformer {
    fn name(&self) -> &'static str {
        "generics"
    }

    fn transform_model(
        &self,
        args: &mut OmniModelTransformerArgs<'_>,
    ) -> Result<(), TransformError> {
        if !args.options.generify_types {
            return Ok(());
        }

        let unknown_kind = args.parser_options.default_unknown_kind;
        let model = &mut *args.model;
        for sup in object_supertypes(model) {
            let subtypes = model.direct_subtypes(sup);
            if subtypes.len() < 2 || subtypes.iter().any(|s| is_generic_declaration(model, *s)) {
                continue;
            }
            let plan = plan(model, sup, &subtypes, args.options);
            if plan.is_empty() {
                continue;
            }
            debug!(
                supertype = %model.describe(sup),
                identifiers = plan.len(),
                "generifying supertype"
            );
            apply(model, sup, &subtypes, plan, unknown_kind)?;
        }
        Ok(())
    }
}

/// A property that becomes one source identifier.
struct Generic {
    property: OmniProperty,
    upper: Option<CommonType>,
    lower: Option<TypeId>,
    locations: Vec<(TypeId, usize)>,
}

fn is_generic_declaration(model: &OmniModel, id: TypeId) -> bool {
    model
        .ids()
        .any(|other| matches!(model.get(other), OmniType::GenericSource { of, .. } if *of == id))
}

fn plan(
    model: &OmniModel,
    sup: TypeId,
    subtypes: &[TypeId],
    options: &ModelTransformOptions,
) -> Vec<Generic> {
    let differ = TypeDiffer::new(model, TargetFeatures::GENERIC);
    let owned = model.get(sup).properties();

    let mut out = Vec::new();
    for candidate in differ.common_properties(subtypes, &[], &[]) {
        if candidate.distinct_types.len() <= 1
            || owned.iter().any(|p| p.name == candidate.name)
            || candidate
                .property_diffs
                .iter()
                .any(|d| *d != PropertyDiffKind::Type)
        {
            continue;
        }
        if !options.generification_box_allowed
            && candidate
                .distinct_types
                .iter()
                .any(|ty| matches!(model.get(*ty), OmniType::Primitive(_)))
        {
            warn!(
                property = %candidate.name,
                "skipping property since some of its types cannot be made generic"
            );
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
        property.read_only = copies.iter().all(|p| p.read_only);
        property.deprecated = copies.iter().all(|p| p.deprecated);
        property.is_abstract = copies.iter().all(|p| p.is_abstract);

        out.push(Generic {
            property,
            upper: candidate.common.filter(|c| !c.is_unknown()),
            lower: differ.narrowest(&candidate.distinct_types),
            locations: candidate.locations,
        });
    }
    out
}

fn apply(
    model: &mut OmniModel,
    sup: TypeId,
    subtypes: &[TypeId],
    plan: Vec<Generic>,
    unknown_kind: UnknownKind,
) -> Result<(), TransformError> {
    let single = plan.len() == 1;
    let mut identifiers = Vec::with_capacity(plan.len());
    for generic in &plan {
        let placeholder = if single {
            String::from("T")
        } else {
            format!("T{}", pascal_case(&generic.property.name))
        };
        let upper = generic
            .upper
            .as_ref()
            .map(|c| c.materialize(model, unknown_kind));
        let lower = generic.lower.filter(|l| Some(*l) != upper);
        identifiers.push(model.generic_source_identifier(placeholder, lower, upper));
    }

    let source = model.generic_source(sup, identifiers.clone());
    model.swap_type(sup, source);

    let mut removals: BTreeMap<TypeId, Vec<usize>> = BTreeMap::new();
    for (position, sub) in subtypes.iter().enumerate() {
        let mut bound = Vec::with_capacity(plan.len());
        for (generic, identifier) in plan.iter().zip(&identifiers) {
            let (owner, index) = generic.locations[position];
            let ty = model.get(owner).properties()[index].ty;
            bound.push(model.generic_target_identifier(*identifier, ty));
            removals.entry(owner).or_default().push(index);
        }
        let target = model.generic_target(source, bound);
        model.extend(*sub, target)?;
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

    let additions = plan
        .into_iter()
        .zip(identifiers)
        .map(|(generic, identifier)| OmniProperty {
            ty: identifier,
            ..generic.property
        });
    if let Some(object) = model.get_object_mut(sup) {
        object.properties.extend(additions);
    }
    Ok(())
}

pub(crate) fn pascal_case(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
#[path = "generics_test.rs"]
mod generics_test;
