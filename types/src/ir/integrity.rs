//! Structural validation of a model.

use super::{CompositionKind, OmniModel, OmniType, TypeId};
use crate::error::ModelError;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mark {
    Unseen,
    Active,
    Done,
}

impl OmniModel {
    /// Check every integrity rule, reporting the first violation found.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.check_edges()?;
        for id in self.ids() {
            self.check_type(id)?;
        }
        self.check_extension_cycles()?;
        self.check_orphans()
    }

    fn check_ref(&self, id: TypeId, referrer: impl FnOnce() -> String) -> Result<(), ModelError> {
        if self.try_get(id).is_none() {
            return Err(ModelError::DanglingType { id });
        }
        if self.is_retired(id) {
            return Err(ModelError::RetiredType {
                id,
                referrer: referrer(),
            });
        }
        Ok(())
    }

    fn check_edges(&self) -> Result<(), ModelError> {
        for id in self.ids() {
            for child in self.children(id) {
                self.check_ref(child, || self.describe(id))?;
            }
        }
        for root in self.roots() {
            self.check_ref(root, || self.name.clone())?;
            if self.is_negation(root) {
                return Err(ModelError::MisplacedNegation { id: root });
            }
        }
        Ok(())
    }

    fn is_negation(&self, id: TypeId) -> bool {
        matches!(self.get(id), OmniType::Composition(c) if c.kind == CompositionKind::Not)
    }

    fn check_type(&self, id: TypeId) -> Result<(), ModelError> {
        let ty = self.get(id);
        match ty {
            OmniType::Interface { of, .. } => {
                if matches!(self.get(self.unwrap_type(*of)), OmniType::Interface { .. }) {
                    return Err(ModelError::InterfaceOfInterface { id });
                }
            }
            OmniType::GenericTarget {
                source,
                target_identifiers,
            } => {
                let expected = match self.get(*source) {
                    OmniType::GenericSource {
                        source_identifiers, ..
                    } => source_identifiers.len(),
                    _ => 0,
                };
                if expected != target_identifiers.len() {
                    return Err(ModelError::GenericArityMismatch {
                        target: self.describe(id),
                        expected,
                        found: target_identifiers.len(),
                    });
                }
            }
            OmniType::Composition(c) => {
                for (index, member) in c.types.iter().enumerate() {
                    let allowed = c.kind == CompositionKind::And && index > 0;
                    if !allowed && self.is_negation(*member) {
                        return Err(ModelError::MisplacedNegation { id: *member });
                    }
                }
                return Ok(());
            }
            _ => {}
        }

        if let Some(parent) = ty.extended_by() {
            if !self.get(self.unwrap_type(parent)).is_inheritable() {
                return Err(ModelError::NotInheritable { id, parent });
            }
        }

        // A negation reached through anything but an AND is meaningless.
        for child in ty.children() {
            if self.is_negation(child) {
                return Err(ModelError::MisplacedNegation { id: child });
            }
        }
        Ok(())
    }

    fn extension_edges(&self, id: TypeId) -> Vec<TypeId> {
        match self.get(id) {
            OmniType::Composition(c) => c.types.clone(),
            OmniType::GenericTarget { source, .. } => vec![*source],
            OmniType::GenericSource { of, .. } => vec![*of],
            OmniType::Decorating { of, .. } | OmniType::ExternalModelReference { of, .. } => {
                vec![*of]
            }
            other => other.extended_by().into_iter().collect(),
        }
    }

    fn check_extension_cycles(&self) -> Result<(), ModelError> {
        let mut marks = vec![Mark::Unseen; self.len()];
        for start in self.ids() {
            if marks[start.index()] != Mark::Unseen || self.get(start).extended_by().is_none() {
                continue;
            }
            // Iterative depth-first search; `Active` marks the current path.
            let mut stack = vec![(start, 0usize)];
            marks[start.index()] = Mark::Active;
            while let Some((current, next)) = stack.pop() {
                let edges = self.extension_edges(current);
                if next < edges.len() {
                    stack.push((current, next + 1));
                    let child = edges[next];
                    match marks[child.index()] {
                        Mark::Active => {
                            return Err(ModelError::CyclicExtension {
                                name: self.describe(child),
                            });
                        }
                        Mark::Unseen => {
                            marks[child.index()] = Mark::Active;
                            stack.push((child, 0));
                        }
                        Mark::Done => {}
                    }
                } else {
                    marks[current.index()] = Mark::Done;
                }
            }
        }
        Ok(())
    }

    /// Live arena slots that no traversal rule reaches.
    pub fn orphans(&self) -> Vec<TypeId> {
        let reachable = self.reachable_types();
        self.ids().filter(|id| !reachable.contains(*id)).collect()
    }

    fn check_orphans(&self) -> Result<(), ModelError> {
        match self.orphans().first() {
            Some(id) => Err(ModelError::Orphaned {
                id: *id,
                description: self.describe(*id),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "integrity_test.rs"]
mod integrity_test;
