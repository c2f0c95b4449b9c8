//! Leaf enumerations of the type algebra.
//!
//! Primitive kinds follow the usual schema vocabulary, with the numeric kinds
//! ordered so that widening questions can be answered by the diff engine.

use alloc::string::String;
use core::fmt;

/// Primitive type kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveKind {
    /// Any number; isomorphic to every other numeric kind.
    Number,
    IntegerSmall,
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    Char,
    String,
    Bool,
    Null,
    Undefined,
    Void,
}

impl PrimitiveKind {
    /// Returns true for `Number` through `Decimal`.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Number
                | PrimitiveKind::IntegerSmall
                | PrimitiveKind::Integer
                | PrimitiveKind::Long
                | PrimitiveKind::Float
                | PrimitiveKind::Double
                | PrimitiveKind::Decimal
        )
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            PrimitiveKind::IntegerSmall | PrimitiveKind::Integer | PrimitiveKind::Long
        )
    }

    pub fn is_floating(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Float | PrimitiveKind::Double | PrimitiveKind::Decimal
        )
    }

    /// Kinds that carry no value and cannot be boxed into a generic argument.
    pub fn is_nothing(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Null | PrimitiveKind::Undefined | PrimitiveKind::Void
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Number => "number",
            PrimitiveKind::IntegerSmall => "short",
            PrimitiveKind::Integer => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Decimal => "decimal",
            PrimitiveKind::Char => "char",
            PrimitiveKind::String => "string",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Undefined => "undefined",
            PrimitiveKind::Void => "void",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural composition operators, mirroring `anyOf`/`allOf`/`oneOf`/`not`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompositionKind {
    And,
    Or,
    Xor,
    Not,
}

impl CompositionKind {
    pub fn symbol(self) -> &'static str {
        match self {
            CompositionKind::And => "&",
            CompositionKind::Or => "|",
            CompositionKind::Xor => "^",
            CompositionKind::Not => "!",
        }
    }
}

/// What an unknown type stands for when rendered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum UnknownKind {
    #[default]
    Any,
    Object,
    Wildcard,
    Map,
}

/// Literal value attached to a primitive.
///
/// Floating point literals are kept in their textual form so that the
/// algebra stays `Eq` and `Hash`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    Bool(bool),
    Integer(i64),
    Decimal(String),
    String(String),
    Null,
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Bool(b) => write!(f, "{}", b),
            LiteralValue::Integer(i) => write!(f, "{}", i),
            LiteralValue::Decimal(d) => f.write_str(d),
            LiteralValue::String(s) => write!(f, "{:?}", s),
            LiteralValue::Null => f.write_str("null"),
        }
    }
}

/// Dialect a model was parsed from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SchemaType {
    JsonSchema,
    OpenApi,
    OpenRpc,
    #[default]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_classification() {
        assert!(PrimitiveKind::Number.is_numeric());
        assert!(PrimitiveKind::Long.is_integral());
        assert!(!PrimitiveKind::Long.is_floating());
        assert!(PrimitiveKind::Decimal.is_floating());
        assert!(!PrimitiveKind::Char.is_numeric());
        assert!(PrimitiveKind::Void.is_nothing());
    }
}
