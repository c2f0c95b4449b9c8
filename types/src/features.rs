//! Capability flags describing what an output language natively supports.

use bitflags::bitflags;

bitflags! {
    /// Boolean capabilities of a target language.
    ///
    /// Second-pass transformers consult these to decide whether a rewrite
    /// is needed (or legal) for the chosen output.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct FeatureFlags: u16 {
        /// `"a" | "b"` style literal types.
        const LITERAL_TYPES = 1;
        /// Primitives as generic arguments without boxing.
        const PRIMITIVE_GENERICS = 1 << 1;
        /// Types may extend primitives.
        const PRIMITIVE_INHERITANCE = 1 << 2;
        const NESTED_DECLARATIONS = 1 << 3;
        const RELATIVE_IMPORTS = 1 << 4;
        const FORCED_IMPORTS = 1 << 5;
        const INTERFACE_WITH_FIELDS = 1 << 6;
        /// Native union and intersection types, usable anywhere a type is.
        const UNIONS = 1 << 7;
        const TRANSPARENT_ACCESSORS = 1 << 8;
        const EXPLODED_GENERICS = 1 << 9;
        /// A class may extend more than one class.
        const MULTIPLE_INHERITANCE = 1 << 10;
    }
}

/// How nested declarations relate to their parent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StaticInnerTypes {
    #[default]
    DefaultStatic,
    DefaultParentAccessible,
}

/// Capability record of one target language.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetFeatures {
    pub flags: FeatureFlags,
    pub static_inner_types: StaticInnerTypes,
}

impl TargetFeatures {
    /// A target that can express everything the model can.
    pub const GENERIC: TargetFeatures = TargetFeatures {
        flags: FeatureFlags::LITERAL_TYPES
            .union(FeatureFlags::PRIMITIVE_GENERICS)
            .union(FeatureFlags::PRIMITIVE_INHERITANCE)
            .union(FeatureFlags::NESTED_DECLARATIONS)
            .union(FeatureFlags::RELATIVE_IMPORTS)
            .union(FeatureFlags::INTERFACE_WITH_FIELDS)
            .union(FeatureFlags::UNIONS)
            .union(FeatureFlags::TRANSPARENT_ACCESSORS)
            .union(FeatureFlags::MULTIPLE_INHERITANCE),
        static_inner_types: StaticInnerTypes::DefaultParentAccessible,
    };

    /// A target that can express almost nothing beyond plain classes.
    pub const RESTRICTIVE: TargetFeatures = TargetFeatures {
        flags: FeatureFlags::INTERFACE_WITH_FIELDS,
        static_inner_types: StaticInnerTypes::DefaultStatic,
    };

    pub const JAVA: TargetFeatures = TargetFeatures {
        flags: FeatureFlags::NESTED_DECLARATIONS
            .union(FeatureFlags::FORCED_IMPORTS)
            .union(FeatureFlags::EXPLODED_GENERICS),
        static_inner_types: StaticInnerTypes::DefaultParentAccessible,
    };

    pub const TYPESCRIPT: TargetFeatures = TargetFeatures {
        flags: FeatureFlags::LITERAL_TYPES
            .union(FeatureFlags::PRIMITIVE_GENERICS)
            .union(FeatureFlags::RELATIVE_IMPORTS)
            .union(FeatureFlags::INTERFACE_WITH_FIELDS)
            .union(FeatureFlags::UNIONS)
            .union(FeatureFlags::TRANSPARENT_ACCESSORS),
        static_inner_types: StaticInnerTypes::DefaultStatic,
    };

    pub fn has(&self, flag: FeatureFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn literal_types(&self) -> bool {
        self.has(FeatureFlags::LITERAL_TYPES)
    }

    pub fn unions(&self) -> bool {
        self.has(FeatureFlags::UNIONS)
    }

    pub fn multiple_inheritance(&self) -> bool {
        self.has(FeatureFlags::MULTIPLE_INHERITANCE)
    }

    pub fn primitive_generics(&self) -> bool {
        self.has(FeatureFlags::PRIMITIVE_GENERICS)
    }
}

impl Default for TargetFeatures {
    fn default() -> Self {
        Self::GENERIC
    }
}
