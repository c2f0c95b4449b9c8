//! The model aggregate: type arena, export registry and endpoint surface.

use super::{
    CompositionKind, CompositionType, EnumMember, EnumType, LiteralValue, ObjectType, OmniProperty,
    OmniType, PrimitiveKind, PrimitiveType, SchemaType, SwapFolder, TypeFolder, TypeId,
    UnknownKind,
};
use crate::error::ModelError;
use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

/// Root aggregate of the generic type model.
///
/// Types are stored in an arena owned by the model and addressed by
/// [`TypeId`]. `types` is the export registry; endpoints reference types
/// but do not own them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OmniModel {
    pub name: String,
    pub version: String,
    pub schema_type: SchemaType,
    pub schema_version: String,
    pub description: Option<String>,
    pub types: Vec<TypeId>,
    pub endpoints: Vec<OmniEndpoint>,
    pub servers: Vec<OmniServer>,
    pub continuations: Vec<OmniContinuation>,
    arena: Vec<OmniType>,
    retired: BTreeSet<TypeId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OmniEndpoint {
    pub name: String,
    pub path: String,
    pub request: OmniInput,
    pub responses: Vec<OmniOutput>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OmniInput {
    pub ty: Option<TypeId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OmniOutput {
    pub name: String,
    pub ty: TypeId,
    pub error: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OmniServer {
    pub name: String,
    pub url: String,
}

/// Links the result of one endpoint to the parameters of another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OmniContinuation {
    pub source_endpoint: String,
    pub target_endpoint: String,
    pub mappings: Vec<OmniContinuationMapping>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OmniContinuationMapping {
    pub source_path: Vec<String>,
    pub target_path: Vec<String>,
}

impl OmniModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: String::from("1.0"),
            schema_type: SchemaType::default(),
            schema_version: String::new(),
            description: None,
            types: Vec::new(),
            endpoints: Vec::new(),
            servers: Vec::new(),
            continuations: Vec::new(),
            arena: Vec::new(),
            retired: BTreeSet::new(),
        }
    }

    // ============================================================================
    // Arena access
    // ============================================================================

    /// Look up a type.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this model. Models handed to the
    /// transformer engine are validated first, so passes never see such ids.
    pub fn get(&self, id: TypeId) -> &OmniType {
        &self.arena[id.index()]
    }

    pub fn get_mut(&mut self, id: TypeId) -> &mut OmniType {
        &mut self.arena[id.index()]
    }

    pub fn try_get(&self, id: TypeId) -> Option<&OmniType> {
        self.arena.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Ids of every live (non-retired) arena slot, in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.arena.len() as u32)
            .map(TypeId)
            .filter(|id| !self.retired.contains(id))
    }

    pub fn is_retired(&self, id: TypeId) -> bool {
        self.retired.contains(&id)
    }

    /// Mark a slot as no longer part of the graph.
    ///
    /// The id stays allocated so that other ids keep their meaning; any edge
    /// still pointing at it is reported by [`OmniModel::validate`].
    pub fn retire(&mut self, id: TypeId) {
        self.types.retain(|t| *t != id);
        self.retired.insert(id);
    }

    pub fn add(&mut self, ty: OmniType) -> TypeId {
        let id = TypeId(self.arena.len() as u32);
        self.arena.push(ty);
        id
    }

    /// Add `id` to the export registry unless already present.
    pub fn export(&mut self, id: TypeId) -> TypeId {
        if !self.types.contains(&id) {
            self.types.push(id);
        }
        id
    }

    pub fn children(&self, id: TypeId) -> Vec<TypeId> {
        self.get(id).children()
    }

    pub fn get_object(&self, id: TypeId) -> Option<&ObjectType> {
        self.get(id).as_object()
    }

    pub fn get_object_mut(&mut self, id: TypeId) -> Option<&mut ObjectType> {
        self.get_mut(id).as_object_mut()
    }

    /// Follow decorating and external-model wrappers down to the wrapped type.
    pub fn unwrap_type(&self, mut id: TypeId) -> TypeId {
        // Wrapper chains are acyclic in a valid model; the bound guards the rest.
        for _ in 0..self.arena.len() {
            match self.get(id).wrapped() {
                Some(of) => id = of,
                None => break,
            }
        }
        id
    }

    // ============================================================================
    // Builders
    // ============================================================================

    pub fn primitive(&mut self, kind: PrimitiveKind) -> TypeId {
        self.add(OmniType::Primitive(PrimitiveType::new(kind)))
    }

    pub fn nullable(&mut self, kind: PrimitiveKind) -> TypeId {
        self.add(OmniType::Primitive(PrimitiveType {
            kind,
            literal: None,
            nullable: true,
        }))
    }

    pub fn literal(&mut self, kind: PrimitiveKind, value: LiteralValue) -> TypeId {
        self.add(OmniType::Primitive(PrimitiveType {
            kind,
            literal: Some(value),
            nullable: false,
        }))
    }

    pub fn object(&mut self, name: impl Into<String>) -> TypeId {
        self.add(OmniType::Object(ObjectType {
            name: name.into(),
            properties: Vec::new(),
            extended_by: None,
            description: None,
        }))
    }

    /// Append a property to an object and return it for further tweaking.
    pub fn property(
        &mut self,
        owner: TypeId,
        name: impl Into<String>,
        ty: TypeId,
    ) -> Result<&mut OmniProperty, ModelError> {
        let object = self.get_object_mut(owner).ok_or(ModelError::NotAnObject { id: owner })?;
        object.properties.push(OmniProperty::new(name, ty, owner));
        // Just pushed, so `last_mut` is present.
        object
            .properties
            .last_mut()
            .ok_or(ModelError::NotAnObject { id: owner })
    }

    /// Set the single-parent extension slot of `sub`.
    pub fn extend(&mut self, sub: TypeId, sup: TypeId) -> Result<(), ModelError> {
        let slot = self
            .get_mut(sub)
            .extended_by_mut()
            .ok_or(ModelError::NotInheritable { id: sub, parent: sup })?;
        *slot = Some(sup);
        Ok(())
    }

    pub fn composition(
        &mut self,
        kind: CompositionKind,
        types: Vec<TypeId>,
        name: Option<String>,
    ) -> TypeId {
        self.add(OmniType::Composition(CompositionType { kind, types, name }))
    }

    pub fn array(&mut self, of: TypeId) -> TypeId {
        self.add(OmniType::Array { of })
    }

    pub fn dictionary(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.add(OmniType::Dictionary { key, value })
    }

    pub fn unknown(&mut self, unknown_kind: UnknownKind) -> TypeId {
        self.add(OmniType::Unknown {
            unknown_kind,
            upper_bound: None,
        })
    }

    pub fn enumeration(
        &mut self,
        name: impl Into<String>,
        item_kind: PrimitiveKind,
        members: Vec<EnumMember>,
    ) -> TypeId {
        self.add(OmniType::Enum(EnumType {
            name: name.into(),
            item_kind,
            members,
            extended_by: None,
        }))
    }

    pub fn interface(&mut self, of: TypeId) -> TypeId {
        self.add(OmniType::Interface {
            of,
            name: None,
            extended_by: None,
        })
    }

    pub fn hardcoded(&mut self, fqn: impl Into<String>) -> TypeId {
        self.add(OmniType::HardcodedReference { fqn: fqn.into() })
    }

    pub fn decorating(&mut self, of: TypeId, description: Option<String>) -> TypeId {
        self.add(OmniType::Decorating { of, description })
    }

    pub fn generic_source_identifier(
        &mut self,
        placeholder_name: impl Into<String>,
        lower_bound: Option<TypeId>,
        upper_bound: Option<TypeId>,
    ) -> TypeId {
        self.add(OmniType::GenericSourceIdentifier {
            placeholder_name: placeholder_name.into(),
            lower_bound,
            upper_bound,
        })
    }

    pub fn generic_source(&mut self, of: TypeId, source_identifiers: Vec<TypeId>) -> TypeId {
        self.add(OmniType::GenericSource {
            of,
            source_identifiers,
        })
    }

    pub fn generic_target(&mut self, source: TypeId, target_identifiers: Vec<TypeId>) -> TypeId {
        self.add(OmniType::GenericTarget {
            source,
            target_identifiers,
        })
    }

    pub fn generic_target_identifier(&mut self, source_identifier: TypeId, ty: TypeId) -> TypeId {
        self.add(OmniType::GenericTargetIdentifier {
            source_identifier,
            ty,
        })
    }

    // ============================================================================
    // Rewriting helpers
    // ============================================================================

    /// Rewrite the edges of a single type with `folder`.
    pub fn fold_type<F: TypeFolder + ?Sized>(&mut self, id: TypeId, folder: &mut F) {
        folder.super_fold_type(&mut self.arena[id.index()]);
    }

    /// Point every edge that targets `from` at `to` instead.
    ///
    /// `to` itself is left untouched so that a wrapper of `from` (such as a
    /// generic source declaring it) keeps its inner edge. Registry entries
    /// and endpoint types are swapped as well. Returns the number of edges
    /// rewritten.
    pub fn swap_type(&mut self, from: TypeId, to: TypeId) -> usize {
        self.redirect(from, to, Some(to))
    }

    /// Like [`OmniModel::swap_type`], but `to` is rewritten too.
    ///
    /// Use this when `from` is about to be retired: an edge from `to` back
    /// to `from` becomes a self reference instead of dangling.
    pub fn replace_type(&mut self, from: TypeId, to: TypeId) -> usize {
        self.redirect(from, to, None)
    }

    fn redirect(&mut self, from: TypeId, to: TypeId, skip: Option<TypeId>) -> usize {
        let mut folder = SwapFolder::new(from, to);
        for index in 0..self.arena.len() {
            let id = TypeId(index as u32);
            if Some(id) == skip || self.retired.contains(&id) {
                continue;
            }
            folder.super_fold_type(&mut self.arena[index]);
        }
        for t in self.types.iter_mut() {
            *t = folder.fold_ref(*t);
        }
        for endpoint in self.endpoints.iter_mut() {
            folder.fold_opt(&mut endpoint.request.ty);
            for response in endpoint.responses.iter_mut() {
                response.ty = folder.fold_ref(response.ty);
            }
        }
        folder.swapped
    }

    // ============================================================================
    // Hierarchy queries
    // ============================================================================

    /// Objects whose extension slot points directly at `sup`, by id order.
    pub fn direct_subtypes(&self, sup: TypeId) -> Vec<TypeId> {
        self.ids()
            .filter(|id| {
                self.get(*id)
                    .as_object()
                    .is_some_and(|o| o.extended_by == Some(sup))
            })
            .collect()
    }

    /// Every type `id` extends, transitively, including AND members and
    /// generic target sources. Nearest first; each type at most once.
    pub fn supertypes(&self, id: TypeId) -> Vec<TypeId> {
        let mut out = Vec::new();
        let mut queue: Vec<TypeId> = self.get(id).extended_by().into_iter().collect();
        let mut index = 0;
        while index < queue.len() {
            let current = queue[index];
            index += 1;
            if out.contains(&current) || current == id {
                continue;
            }
            out.push(current);
            match self.get(current) {
                OmniType::Composition(c) if c.kind != CompositionKind::Not => {
                    queue.extend(c.types.iter().copied());
                }
                OmniType::GenericTarget { source, .. } => queue.push(*source),
                OmniType::GenericSource { of, .. } => queue.push(*of),
                OmniType::Decorating { of, .. } | OmniType::ExternalModelReference { of, .. } => {
                    queue.push(*of)
                }
                other => queue.extend(other.extended_by()),
            }
        }
        out
    }

    /// Number of object ancestors above `id` through plain extension edges.
    pub fn depth(&self, id: TypeId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).extended_by();
        while let Some(parent) = current {
            depth += 1;
            if depth > self.arena.len() {
                break;
            }
            current = self.get(parent).extended_by();
        }
        depth
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;
