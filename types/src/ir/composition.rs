//! Folding schema composition keywords into a single type.

use super::{CompositionKind, OmniModel, TypeId, UnknownKind};
use alloc::vec;
use alloc::vec::Vec;

impl OmniModel {
    /// Combine `anyOf`, `allOf`, `oneOf` and `not` into one type.
    ///
    /// Keywords are applied in that order. Every keyword after the first
    /// present one is attached as `AND[accumulated, new]`, and a negation is
    /// always the second operand of an AND (a fresh unknown stands in for
    /// the first when nothing else was given). Returns `None` when all lists
    /// are empty.
    ///
    /// # Example
    ///
    /// ```
    /// use omnigen_types::{OmniModel, PrimitiveKind};
    ///
    /// let mut model = OmniModel::new("m");
    /// let string = model.primitive(PrimitiveKind::String);
    /// let number = model.primitive(PrimitiveKind::Number);
    /// let boolean = model.primitive(PrimitiveKind::Bool);
    ///
    /// let merged = model
    ///     .merge_compositions(&[number, boolean], &[string], &[], None)
    ///     .unwrap();
    /// assert_eq!(model.describe(merged), "((number | bool) & string)");
    /// ```
    pub fn merge_compositions(
        &mut self,
        any_of: &[TypeId],
        all_of: &[TypeId],
        one_of: &[TypeId],
        not: Option<TypeId>,
    ) -> Option<TypeId> {
        let mut merged = self.combine(None, any_of, CompositionKind::Or);
        merged = self.combine(merged, all_of, CompositionKind::And);
        merged = self.combine(merged, one_of, CompositionKind::Xor);

        if let Some(negated) = not {
            let negation = self.composition(CompositionKind::Not, vec![negated], None);
            let base = match merged {
                Some(base) => base,
                None => self.unknown(UnknownKind::Any),
            };
            merged = Some(self.composition(CompositionKind::And, vec![base, negation], None));
        }
        merged
    }

    fn combine(
        &mut self,
        acc: Option<TypeId>,
        types: &[TypeId],
        kind: CompositionKind,
    ) -> Option<TypeId> {
        let next = match types {
            [] => return acc,
            [single] => *single,
            many => self.composition(kind, Vec::from(many), None),
        };
        Some(match acc {
            None => next,
            Some(existing) => self.composition(CompositionKind::And, vec![existing, next], None),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{CompositionKind, OmniModel, OmniType, PrimitiveKind, TypeId};
    use alloc::vec;
    use alloc::vec::Vec;

    fn composition(model: &OmniModel, id: TypeId) -> (CompositionKind, Vec<TypeId>) {
        match model.get(id) {
            OmniType::Composition(c) => (c.kind, c.types.clone()),
            other => panic!("expected composition, got {:?}", other),
        }
    }

    #[test]
    fn and_merge_keeps_operand_order() {
        let mut model = OmniModel::new("m");
        let string = model.primitive(PrimitiveKind::String);
        let number = model.primitive(PrimitiveKind::Number);
        let boolean = model.primitive(PrimitiveKind::Bool);

        let merged = model
            .merge_compositions(&[number, boolean], &[string], &[], None)
            .unwrap();

        let (kind, types) = composition(&model, merged);
        assert_eq!(kind, CompositionKind::And);
        assert_eq!(types.len(), 2);
        assert_eq!(types[1], string);
        assert_eq!(composition(&model, types[0]), (CompositionKind::Or, vec![number, boolean]));
    }

    #[test]
    fn single_entries_are_used_directly() {
        let mut model = OmniModel::new("m");
        let string = model.primitive(PrimitiveKind::String);
        assert_eq!(model.merge_compositions(&[], &[string], &[], None), Some(string));
        assert_eq!(model.merge_compositions(&[], &[], &[], None), None);
    }

    #[test]
    fn one_of_becomes_xor() {
        let mut model = OmniModel::new("m");
        let a = model.object("A");
        let b = model.object("B");
        let merged = model.merge_compositions(&[], &[], &[a, b], None).unwrap();
        assert_eq!(composition(&model, merged), (CompositionKind::Xor, vec![a, b]));
    }

    #[test]
    fn negation_is_second_and_operand() {
        let mut model = OmniModel::new("m");
        let string = model.primitive(PrimitiveKind::String);
        let int = model.primitive(PrimitiveKind::Integer);

        let merged = model
            .merge_compositions(&[], &[string], &[], Some(int))
            .unwrap();
        let (kind, types) = composition(&model, merged);
        assert_eq!(kind, CompositionKind::And);
        assert_eq!(types[0], string);
        assert_eq!(composition(&model, types[1]), (CompositionKind::Not, vec![int]));
    }

    #[test]
    fn lone_negation_gets_unknown_base() {
        let mut model = OmniModel::new("m");
        let int = model.primitive(PrimitiveKind::Integer);

        let merged = model.merge_compositions(&[], &[], &[], Some(int)).unwrap();
        let (kind, types) = composition(&model, merged);
        assert_eq!(kind, CompositionKind::And);
        assert!(matches!(model.get(types[0]), OmniType::Unknown { .. }));

        model.export(merged);
        assert_eq!(model.validate(), Ok(()));
    }
}
