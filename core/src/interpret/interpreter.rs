use super::getter_name;
use crate::{String, ToString, Vec, format, vec};
use crate::api::BuildOptions;
use crate::ast::{AstBuilder, Node, NodeKind, RootAstNode};
use crate::errors::TransformError;
use alloc::collections::BTreeSet;
use bumpalo::Bump;
use omnigen_types::{CompositionKind, OmniModel, OmniType, TargetFeatures, TypeId};
use tracing::{debug, trace};

const PASS: &str = "interpreter";

/// Declares the types of a model as a syntax tree.
///
/// Every object, interface, enum and generic source reachable from the
/// model gets one compilation unit, in reachability order. The object a
/// generic source wraps is declared once, as a generic class.
pub struct Interpreter<'a, 'm> {
    builder: &'a AstBuilder<'a>,
    model: &'m OmniModel,
    features: TargetFeatures,
    generic_objects: BTreeSet<TypeId>,
}

impl<'a, 'm> Interpreter<'a, 'm> {
    /// The model is validated first; an invalid one is reported as
    /// [`TransformError::Model`].
    pub fn build(
        arena: &'a Bump,
        model: &'m OmniModel,
        options: &BuildOptions,
    ) -> Result<RootAstNode<'a>, TransformError> {
        model.validate()?;
        let generic_objects = model
            .ids()
            .filter_map(|id| match model.get(id) {
                OmniType::GenericSource { of, .. } => Some(*of),
                _ => None,
            })
            .collect();
        let interpreter = Interpreter {
            builder: AstBuilder::new(arena),
            model,
            features: options.features,
            generic_objects,
        };

        let mut units = Vec::new();
        for id in model.reachable_types().order {
            if let Some(unit) = interpreter.unit(id)? {
                units.push(unit);
            }
        }
        debug!(units = units.len(), "interpreted model");

        let builder = interpreter.builder;
        let root = builder.alloc(NodeKind::Root {
            units: builder.nodes(&units),
        });
        Ok(RootAstNode::new(builder, root))
    }

    fn unit(&self, id: TypeId) -> Result<Option<&'a Node<'a>>, TransformError> {
        let declaration = match self.model.get(id) {
            OmniType::Object(_) if self.generic_objects.contains(&id) => return Ok(None),
            OmniType::Object(_) => self.class(id, &[])?,
            OmniType::GenericSource {
                of,
                source_identifiers,
            } => self.class(*of, source_identifiers)?,
            OmniType::Interface { of, .. } => self.interface(id, *of)?,
            OmniType::Enum(e) => {
                let constants: Vec<_> = e
                    .members
                    .iter()
                    .map(|m| self.builder.identifier(&m.name))
                    .collect();
                self.builder.alloc(NodeKind::EnumDeclaration {
                    name: self.builder.identifier(&e.name),
                    constants: self.builder.nodes(&constants),
                })
            }
            _ => return Ok(None),
        };

        let name = declaration.name().unwrap_or_default();
        trace!(unit = name, ty = %id, "declared");
        Ok(Some(self.builder.alloc(NodeKind::CompilationUnit {
            name,
            declarations: self.builder.nodes(&[declaration]),
        })))
    }

    fn class(&self, id: TypeId, parameters: &[TypeId]) -> Result<&'a Node<'a>, TransformError> {
        let Some(object) = self.model.get_object(id) else {
            return Err(TransformError::precondition(
                PASS,
                self.model.describe(id),
                "only objects can be declared as classes",
            ));
        };

        let generics: Vec<_> = parameters.iter().map(|p| self.generic_parameter(*p)).collect();
        let (extends, implements) = self.supertypes(object.extended_by);
        let fields: Vec<_> = object
            .properties
            .iter()
            .map(|p| self.builder.field(&p.name, self.type_node(p.ty)))
            .collect();

        Ok(self.builder.alloc(NodeKind::ClassDeclaration {
            name: self.builder.identifier(&object.name),
            generics: self.builder.nodes(&generics),
            extends,
            implements: self.builder.nodes(&implements),
            body: self.builder.block(&fields),
        }))
    }

    /// Split an extension edge into the class slot and implemented interfaces.
    fn supertypes(
        &self,
        extension: Option<TypeId>,
    ) -> (Option<&'a Node<'a>>, Vec<&'a Node<'a>>) {
        let Some(extension) = extension else {
            return (None, Vec::new());
        };
        let members = match self.model.get(extension) {
            OmniType::Composition(c) if c.kind == CompositionKind::And => c.types.clone(),
            _ => vec![extension],
        };

        let mut extends = None;
        let mut implements = Vec::new();
        for (index, member) in members.into_iter().enumerate() {
            match self.model.get(self.model.unwrap_type(member)) {
                OmniType::Composition(c) if c.kind == CompositionKind::Not => {}
                OmniType::Interface { .. } => implements.push(self.type_node(member)),
                _ if index == 0 => extends = Some(self.type_node(member)),
                // Only reachable with multiple inheritance.
                _ => implements.push(self.type_node(member)),
            }
        }
        (extends, implements)
    }

    fn interface(&self, id: TypeId, of: TypeId) -> Result<&'a Node<'a>, TransformError> {
        let origin = match self.model.get(self.model.unwrap_type(of)) {
            OmniType::GenericSource { of, .. } => *of,
            _ => self.model.unwrap_type(of),
        };

        let signatures: Vec<_> = self
            .model
            .get(origin)
            .properties()
            .iter()
            .map(|p| {
                self.builder.alloc(NodeKind::MethodDeclaration {
                    name: self.builder.identifier(&getter_name(&p.name)),
                    return_type: self.type_node(p.ty),
                    parameters: &[],
                    body: None,
                })
            })
            .collect();

        let extends: Vec<_> = match self.model.get(id).extended_by() {
            None => Vec::new(),
            Some(extension) => match self.model.get(extension) {
                OmniType::Composition(c) if c.kind == CompositionKind::And => {
                    c.types.iter().map(|t| self.type_node(*t)).collect()
                }
                _ => vec![self.type_node(extension)],
            },
        };

        let name: String = match self.model.get(id).name() {
            Some(name) => name.to_string(),
            None => format!("I{}", self.model.describe(origin)),
        };
        Ok(self.builder.alloc(NodeKind::InterfaceDeclaration {
            name: self.builder.identifier(&name),
            generics: &[],
            extends: self.builder.nodes(&extends),
            body: self.builder.block(&signatures),
        }))
    }

    fn generic_parameter(&self, identifier: TypeId) -> &'a Node<'a> {
        let (name, upper_bound) = match self.model.get(identifier) {
            OmniType::GenericSourceIdentifier {
                placeholder_name,
                upper_bound,
                ..
            } => (placeholder_name.as_str(), *upper_bound),
            _ => ("T", None),
        };
        let upper_bound = upper_bound
            .filter(|upper| self.bound_is_expressible(*upper))
            .map(|upper| self.type_node(upper));
        self.builder.alloc(NodeKind::GenericParameter {
            name: self.builder.identifier(name),
            upper_bound,
        })
    }

    /// Primitive bounds need a target that takes primitives as type arguments.
    fn bound_is_expressible(&self, bound: TypeId) -> bool {
        !matches!(self.model.get(bound), OmniType::Primitive(_)) || self.features.primitive_generics()
    }

    /// The node standing for a use of `ty`.
    fn type_node(&self, ty: TypeId) -> &'a Node<'a> {
        match self.model.get(ty) {
            OmniType::GenericTarget {
                source,
                target_identifiers,
            } => {
                let base = match self.model.get(*source) {
                    OmniType::GenericSource { of, .. } => *of,
                    _ => *source,
                };
                let arguments: Vec<_> =
                    target_identifiers.iter().map(|t| self.type_node(*t)).collect();
                self.builder.alloc(NodeKind::GenericType {
                    base: self.builder.edge_type(base),
                    arguments: self.builder.nodes(&arguments),
                })
            }
            OmniType::GenericTargetIdentifier { ty, .. } => self.type_node(*ty),
            _ => self.builder.edge_type(ty),
        }
    }
}

#[cfg(test)]
#[path = "interpreter_test.rs"]
mod interpreter_test;
