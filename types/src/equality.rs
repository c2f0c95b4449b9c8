//! Graded equality between types and between properties.
//!
//! The engine answers "how different are these two things" as a list of
//! [`TypeDiffKind`]s (and [`PropertyDiffKind`]s for properties), plus the
//! common type both sides could be expressed as. Passes never inspect these
//! lists by hand: they go through [`matches_type_diff`] and
//! [`matches_prop_diff`], which own the implication rules, and compare
//! [`EqualityLevel`]s against their configured thresholds.
//!
//! Common types are returned as a [`CommonType`] derivation rather than a
//! freshly allocated type, so asking a question never adds anything to the
//! model. A pass that decides to use a common type calls
//! [`CommonType::materialize`].

mod common;
mod diff;
mod property;

pub use common::{Common, CommonType, TypeDiffer};
pub use diff::{
    EqualityLevel, PropertyDiffKind, TypeDiffKind, matches_any_prop_diff, matches_any_type_diff,
    matches_prop_diff, matches_type_diff,
};
pub use property::{CommonProperty, PropertyEquality};


#[cfg(test)]
#[path = "equality/property_test.rs"]
mod property_test;
