use super::{
    CommonType, PropertyDiffKind, TypeDiffKind, TypeDiffer, matches_any_prop_diff,
    matches_any_type_diff,
};
use crate::{OmniProperty, TypeId};
use alloc::string::String;
use alloc::vec::Vec;

/// Result of comparing two properties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyEquality {
    pub property_diffs: Vec<PropertyDiffKind>,
    pub type_diffs: Vec<TypeDiffKind>,
    /// Common type of the two property types, `None` if fundamentally different.
    pub common: Option<CommonType>,
}

/// A property present in every one of a set of sibling types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommonProperty {
    pub name: String,
    /// `(owner, index into owner.properties)` for every sibling, in input order.
    pub locations: Vec<(TypeId, usize)>,
    pub property_diffs: Vec<PropertyDiffKind>,
    pub type_diffs: Vec<TypeDiffKind>,
    pub common: Option<CommonType>,
    /// Property types that are not identical to one another, first seen first.
    pub distinct_types: Vec<TypeId>,
}

impl CommonProperty {
    /// Diffs left once everything listed in `ignored` is set aside.
    pub fn remaining_type_diffs(&self, ignored: &[TypeDiffKind]) -> Vec<TypeDiffKind> {
        self.type_diffs
            .iter()
            .copied()
            .filter(|d| !ignored.contains(d))
            .collect()
    }
}

impl TypeDiffer<'_> {
    pub fn diff_property(&self, a: &OmniProperty, b: &OmniProperty) -> PropertyEquality {
        let mut property_diffs = Vec::new();
        if a.name != b.name {
            property_diffs.push(PropertyDiffKind::Name);
        }

        let (type_diffs, common) = match self.common(a.ty, b.ty) {
            Some(common) => (common.diffs, Some(common.ty)),
            None => (alloc::vec![TypeDiffKind::FundamentalType], None),
        };
        if !type_diffs.is_empty() {
            property_diffs.push(PropertyDiffKind::Type);
        }
        if a.required != b.required {
            property_diffs.push(PropertyDiffKind::Required);
        }
        if a.field_name != b.field_name {
            property_diffs.push(PropertyDiffKind::FieldName);
        }
        if a.description != b.description {
            property_diffs.push(PropertyDiffKind::Meta);
        }

        PropertyEquality {
            property_diffs,
            type_diffs,
            common,
        }
    }

    /// Properties shared by every type in `siblings`.
    ///
    /// Consecutive siblings are compared pairwise and their diffs merged; a
    /// property whose merged diffs match any banned diff is left out.
    pub fn common_properties(
        &self,
        siblings: &[TypeId],
        banned_type_diffs: &[TypeDiffKind],
        banned_prop_diffs: &[PropertyDiffKind],
    ) -> Vec<CommonProperty> {
        let model = self.model();
        let objects: Option<Vec<_>> = siblings.iter().map(|id| model.get_object(*id)).collect();
        let Some(objects) = objects else {
            return Vec::new();
        };
        let Some((first, _)) = objects.split_first() else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for property in &first.properties {
            let locations: Option<Vec<(TypeId, usize)>> = siblings
                .iter()
                .zip(&objects)
                .map(|(id, object)| {
                    object
                        .properties
                        .iter()
                        .position(|p| p.name == property.name)
                        .map(|index| (*id, index))
                })
                .collect();
            let Some(locations) = locations else {
                continue;
            };
            let properties: Vec<&OmniProperty> = locations
                .iter()
                .zip(&objects)
                .map(|((_, index), object)| &object.properties[*index])
                .collect();

            let mut property_diffs = Vec::new();
            let mut type_diffs = Vec::new();
            for pair in properties.windows(2) {
                let equality = self.diff_property(pair[0], pair[1]);
                for d in equality.property_diffs {
                    if !property_diffs.contains(&d) {
                        property_diffs.push(d);
                    }
                }
                for d in equality.type_diffs {
                    if !type_diffs.contains(&d) {
                        type_diffs.push(d);
                    }
                }
            }
            if matches_any_type_diff(&type_diffs, banned_type_diffs)
                || matches_any_prop_diff(&property_diffs, banned_prop_diffs)
            {
                continue;
            }

            let types: Vec<TypeId> = properties.iter().map(|p| p.ty).collect();
            let common = self.common_of(&types).map(|c| c.ty);
            let mut distinct_types: Vec<TypeId> = Vec::new();
            for ty in types {
                let seen = distinct_types
                    .iter()
                    .any(|d| self.common(*d, ty).is_some_and(|c| c.diffs.is_empty()));
                if !seen {
                    distinct_types.push(ty);
                }
            }

            out.push(CommonProperty {
                name: property.name.clone(),
                locations,
                property_diffs,
                type_diffs,
                common,
                distinct_types,
            });
        }
        out
    }
}
