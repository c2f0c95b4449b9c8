use super::{CompositionKind, OmniModel, OmniType, TypeId, TypeVisitor, UnknownKind};
use alloc::string::String;
use core::fmt::Write;

/// Visitor that formats types into short, human readable labels.
///
/// Named types print their name only, so formatting terminates on cyclic
/// graphs; anonymous structure is printed in full.
pub struct TypeFormatter {
    output: String,
    depth: usize,
}

const MAX_DEPTH: usize = 16;

impl TypeFormatter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            depth: 0,
        }
    }

    pub fn format(ty: TypeId, model: &OmniModel) -> String {
        let mut formatter = Self::new();
        formatter.visit_ty(ty, model);
        formatter.output
    }

    fn list(&mut self, ids: &[TypeId], sep: &str, model: &OmniModel) {
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                self.output.push_str(sep);
            }
            self.visit_ty(*id, model);
        }
    }
}

impl Default for TypeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeVisitor for TypeFormatter {
    fn visit_ty(&mut self, ty: TypeId, model: &OmniModel) {
        let Some(data) = model.try_get(ty) else {
            let _ = write!(self.output, "<dangling {}>", ty);
            return;
        };
        if self.depth > MAX_DEPTH {
            self.output.push_str("...");
            return;
        }
        self.depth += 1;
        match data {
            OmniType::Primitive(p) => {
                match &p.literal {
                    Some(value) => {
                        let _ = write!(self.output, "{}", value);
                    }
                    None => self.output.push_str(p.kind.name()),
                }
                if p.nullable {
                    self.output.push('?');
                }
            }
            OmniType::Object(o) => self.output.push_str(&o.name),
            OmniType::Enum(e) => self.output.push_str(&e.name),
            OmniType::Interface { of, name, .. } => match name {
                Some(name) => self.output.push_str(name),
                None => {
                    self.output.push('I');
                    self.visit_ty(*of, model);
                }
            },
            OmniType::Composition(c) => match &c.name {
                Some(name) => self.output.push_str(name),
                None => {
                    self.output.push('(');
                    if c.types.len() == 1 {
                        self.output.push_str(c.kind.symbol());
                    }
                    let sep = match c.kind {
                        CompositionKind::And => " & ",
                        CompositionKind::Or => " | ",
                        CompositionKind::Xor => " ^ ",
                        CompositionKind::Not => ", ",
                    };
                    self.list(&c.types, sep, model);
                    self.output.push(')');
                }
            },
            OmniType::GenericSource {
                of,
                source_identifiers,
            } => {
                self.visit_ty(*of, model);
                self.output.push('<');
                self.list(source_identifiers, ", ", model);
                self.output.push('>');
            }
            OmniType::GenericSourceIdentifier {
                placeholder_name,
                upper_bound,
                ..
            } => {
                self.output.push_str(placeholder_name);
                if let Some(upper) = upper_bound {
                    self.output.push_str(" extends ");
                    self.visit_ty(*upper, model);
                }
            }
            OmniType::GenericTarget {
                source,
                target_identifiers,
            } => {
                match model.try_get(*source) {
                    Some(OmniType::GenericSource { of, .. }) => self.visit_ty(*of, model),
                    _ => self.visit_ty(*source, model),
                }
                self.output.push('<');
                self.list(target_identifiers, ", ", model);
                self.output.push('>');
            }
            OmniType::GenericTargetIdentifier { ty, .. } => self.visit_ty(*ty, model),
            OmniType::Unknown { unknown_kind, .. } => self.output.push_str(match unknown_kind {
                UnknownKind::Any => "any",
                UnknownKind::Object => "object",
                UnknownKind::Wildcard => "?",
                UnknownKind::Map => "map",
            }),
            OmniType::Dictionary { key, value } => {
                self.output.push_str("Map<");
                self.visit_ty(*key, model);
                self.output.push_str(", ");
                self.visit_ty(*value, model);
                self.output.push('>');
            }
            OmniType::Array { of } => {
                self.output.push_str("Array<");
                self.visit_ty(*of, model);
                self.output.push('>');
            }
            OmniType::HardcodedReference { fqn } => self.output.push_str(fqn),
            OmniType::ExternalModelReference {
                model_name, name, ..
            } => {
                let _ = write!(self.output, "{}::{}", model_name, name);
            }
            OmniType::Decorating { of, .. } => self.visit_ty(*of, model),
        }
        self.depth -= 1;
    }
}

impl OmniModel {
    /// Short label for `id`, used in diagnostics and logs.
    pub fn describe(&self, id: TypeId) -> String {
        TypeFormatter::format(id, self)
    }
}
