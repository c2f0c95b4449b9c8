//! Configuration options for a build.
//!
//! A build sees exactly one [`BuildOptions`], resolved before any pass runs
//! from an ordered list of [`PartialOptions`] (defaults first, later sets
//! override earlier ones). Passes never deal with missing values.

use omnigen_types::{EqualityLevel, TargetFeatures, UnknownKind};
use serde::Deserialize;

/// Options describing how the model was parsed.
///
/// # Example
///
/// ```
/// use omnigen_core::api::ParserOptions;
/// use omnigen_types::UnknownKind;
///
/// let options = ParserOptions::default();
/// assert_eq!(options.default_unknown_kind, UnknownKind::Any);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Kind given to unknown types created while transforming the model.
    pub default_unknown_kind: UnknownKind,
}

/// Options controlling the model transformer passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTransformOptions {
    /// Remove redundant members of AND compositions.
    ///
    /// Default: true
    pub simplify_type_hierarchy: bool,

    /// Move properties shared by every subtype into the supertype.
    ///
    /// Default: true
    pub elevate_properties: bool,

    /// Minimum equality (property and type diffs) for a property to be elevated.
    ///
    /// Default: `FunctionMin`
    pub elevate_properties_more_equal_than: EqualityLevel,

    /// Minimum equality of the property types alone for a property to be elevated.
    ///
    /// Default: `FunctionMin`
    pub elevate_properties_with_types_more_equal_than: EqualityLevel,

    /// Turn families of subtypes that differ only in property types into generics.
    ///
    /// Default: true
    pub generify_types: bool,

    /// Allow primitives to become generic arguments (boxed if the target needs it).
    ///
    /// Default: true
    pub generification_box_allowed: bool,
}

impl Default for ModelTransformOptions {
    fn default() -> Self {
        Self {
            simplify_type_hierarchy: true,
            elevate_properties: true,
            elevate_properties_more_equal_than: EqualityLevel::FunctionMin,
            elevate_properties_with_types_more_equal_than: EqualityLevel::FunctionMin,
            generify_types: true,
            generification_box_allowed: true,
        }
    }
}

/// Options controlling the syntax tree built for a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOptions {
    /// Add a getter for every field.
    ///
    /// Default: true
    pub generate_accessors: bool,

    /// Order class members as fields first, then methods.
    ///
    /// Default: true
    pub reorder_members: bool,
}

impl Default for TargetOptions {
    fn default() -> Self {
        Self {
            generate_accessors: true,
            reorder_members: true,
        }
    }
}

/// Fully resolved options of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub parser: ParserOptions,
    pub transform: ModelTransformOptions,
    pub target: TargetOptions,
    pub features: TargetFeatures,
}

/// An option set where anything may be left unspecified.
///
/// Typically deserialized from configuration files or command-line glue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialOptions {
    pub default_unknown_kind: Option<UnknownKind>,
    pub simplify_type_hierarchy: Option<bool>,
    pub elevate_properties: Option<bool>,
    pub elevate_properties_more_equal_than: Option<EqualityLevel>,
    pub elevate_properties_with_types_more_equal_than: Option<EqualityLevel>,
    pub generify_types: Option<bool>,
    pub generification_box_allowed: Option<bool>,
    pub generate_accessors: Option<bool>,
    pub reorder_members: Option<bool>,
}

impl BuildOptions {
    /// Merge `partials` in order over the defaults, for a target with `features`.
    ///
    /// # Example
    ///
    /// ```
    /// use omnigen_core::api::{BuildOptions, PartialOptions};
    /// use omnigen_types::TargetFeatures;
    ///
    /// let user = PartialOptions {
    ///     generify_types: Some(false),
    ///     ..PartialOptions::default()
    /// };
    /// let options = BuildOptions::resolve(TargetFeatures::JAVA, &[user]);
    /// assert!(!options.transform.generify_types);
    /// assert!(options.transform.elevate_properties);
    /// ```
    pub fn resolve(features: TargetFeatures, partials: &[PartialOptions]) -> Self {
        let mut options = BuildOptions {
            features,
            ..BuildOptions::default()
        };
        for partial in partials {
            options.apply(partial);
        }
        options
    }

    fn apply(&mut self, partial: &PartialOptions) {
        fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }

        set(&mut self.parser.default_unknown_kind, &partial.default_unknown_kind);
        let t = &mut self.transform;
        set(&mut t.simplify_type_hierarchy, &partial.simplify_type_hierarchy);
        set(&mut t.elevate_properties, &partial.elevate_properties);
        set(
            &mut t.elevate_properties_more_equal_than,
            &partial.elevate_properties_more_equal_than,
        );
        set(
            &mut t.elevate_properties_with_types_more_equal_than,
            &partial.elevate_properties_with_types_more_equal_than,
        );
        set(&mut t.generify_types, &partial.generify_types);
        set(&mut t.generification_box_allowed, &partial.generification_box_allowed);
        set(&mut self.target.generate_accessors, &partial.generate_accessors);
        set(&mut self.target.reorder_members, &partial.reorder_members);
    }
}
