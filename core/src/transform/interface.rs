use super::{OmniModel2ndPassTransformer, OmniModel2ndPassTransformerArgs};
use crate::errors::TransformError;
use crate::{Vec, vec};
use alloc::collections::{BTreeMap, BTreeSet};
use omnigen_types::{CompositionKind, OmniModel, OmniType, TypeId};
use tracing::debug;

const PASS: &str = "interface-extraction";

/// Splits types that are inherited next to a class into a class plus an
/// interface, for targets where a type has a single parent class.
///
/// For an object extending `A & B & C`, `A` keeps the class slot while `B`
/// and `C` are replaced by `INTERFACE{of: B}` and `INTERFACE{of: C}`. For an
/// interface, every member of its intersection becomes an interface.
pub struct InterfaceExtractionModelTransformer;

impl OmniModel2ndPassTransformer for InterfaceExtractionModelTransformer {
    fn name(&self) -> &'static str {
        PASS
    }

    fn transform_model_2nd_pass(
        &self,
        args: &mut OmniModel2ndPassTransformerArgs<'_>,
    ) -> Result<(), TransformError> {
        if args.features.multiple_inheritance() {
            return Ok(());
        }
        InterfaceExtractor::new(args.model).extract(args.model)
    }
}

/// Hands out one interface per origin type.
///
/// Seeded with the interfaces already present in the model, so running the
/// extraction again reuses them instead of creating duplicates.
#[derive(Debug, Default)]
pub struct InterfaceExtractor {
    interfaces: BTreeMap<TypeId, TypeId>,
}

impl InterfaceExtractor {
    pub fn new(model: &OmniModel) -> Self {
        let mut interfaces = BTreeMap::new();
        for id in model.ids() {
            if let OmniType::Interface { of, .. } = model.get(id) {
                if !matches!(model.get(*of), OmniType::Interface { .. }) {
                    interfaces.entry(*of).or_insert(id);
                }
            }
        }
        Self { interfaces }
    }

    /// Convert the extensions of every object and interface in the model.
    pub fn extract(&mut self, model: &mut OmniModel) -> Result<(), TransformError> {
        let mut seen = BTreeSet::new();
        let candidates: Vec<TypeId> = model
            .ids()
            .map(|id| model.unwrap_type(id))
            .filter(|id| seen.insert(*id))
            .collect();

        for id in candidates {
            match model.get(id) {
                OmniType::Object(_) => self.convert_extensions(model, id, 1)?,
                OmniType::Interface { .. } => self.convert_extensions(model, id, 0)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// The interface of `origin`, created and attached to it on first request.
    pub fn get_or_create_interface(
        &mut self,
        model: &mut OmniModel,
        origin: TypeId,
    ) -> Result<TypeId, TransformError> {
        if let Some(existing) = self.interfaces.get(&origin) {
            return Ok(*existing);
        }
        if let OmniType::ExternalModelReference { .. } = model.get(origin) {
            return Err(TransformError::precondition(
                PASS,
                model.describe(origin),
                "types of another model cannot be given an interface",
            ));
        }

        let interface = model.interface(origin);
        debug!(origin = %model.describe(origin), "created interface");
        attach(model, origin, interface)?;
        self.interfaces.insert(origin, interface);
        Ok(interface)
    }

    fn convert_extensions(
        &mut self,
        model: &mut OmniModel,
        owner: TypeId,
        start: usize,
    ) -> Result<(), TransformError> {
        let Some(extension) = model.get(owner).extended_by() else {
            return Ok(());
        };
        let members = match model.get(extension) {
            OmniType::Composition(c) if c.kind == CompositionKind::And => c.types.clone(),
            _ => return Ok(()),
        };

        for (index, member) in members.into_iter().enumerate().skip(start) {
            if !needs_interface(model, member) {
                continue;
            }
            let interface = self.get_or_create_interface(model, member)?;
            if let OmniType::Composition(c) = model.get_mut(extension) {
                c.types[index] = interface;
            }
        }
        Ok(())
    }
}

fn needs_interface(model: &OmniModel, member: TypeId) -> bool {
    if let OmniType::ExternalModelReference { .. } = model.get(member) {
        return true;
    }
    match model.get(model.unwrap_type(member)) {
        OmniType::Interface { .. } => false,
        OmniType::Composition(c) => c.kind != CompositionKind::Not,
        other => other.is_inheritable(),
    }
}

/// Make `origin` implement its new interface.
fn attach(model: &mut OmniModel, origin: TypeId, interface: TypeId) -> Result<(), TransformError> {
    if model.get_mut(origin).extended_by_mut().is_none() {
        return Ok(());
    }
    match model.get(origin).extended_by() {
        None => model.extend(origin, interface)?,
        Some(extension) => {
            if let OmniType::Composition(c) = model.get_mut(extension) {
                if c.kind == CompositionKind::And {
                    c.types.push(interface);
                    return Ok(());
                }
            }
            let both = model.composition(CompositionKind::And, vec![extension, interface], None);
            model.extend(origin, both)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "interface_test.rs"]
mod interface_test;
