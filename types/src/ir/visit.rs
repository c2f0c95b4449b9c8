use super::{OmniModel, TypeId};
use alloc::vec::Vec;
use hashbrown::HashSet;

/// Trait for visiting types.
///
/// Implement this trait to traverse the type graph without mutation.
/// The default implementation follows every edge of every variant, which is
/// exactly the set of traversal rules a reachable type must be found by.
///
/// The graph may be cyclic (a property typed by its own owner), so visitors
/// that walk arbitrary models must remember what they have already seen, as
/// [`ReachableTypes`] does.
///
/// # Example
///
/// ```
/// use omnigen_types::{OmniModel, PrimitiveKind, TypeId, TypeVisitor};
///
/// struct DepthCalculator {
///     max_depth: usize,
///     current_depth: usize,
/// }
///
/// impl TypeVisitor for DepthCalculator {
///     fn visit_ty(&mut self, ty: TypeId, model: &OmniModel) {
///         self.current_depth += 1;
///         self.max_depth = self.max_depth.max(self.current_depth);
///
///         self.super_visit_ty(ty, model);
///
///         self.current_depth -= 1;
///     }
/// }
///
/// let mut model = OmniModel::new("m");
/// let int = model.primitive(PrimitiveKind::Integer);
/// let inner = model.array(int);
/// let outer = model.array(inner);
///
/// let mut calc = DepthCalculator { max_depth: 0, current_depth: 0 };
/// calc.visit_ty(outer, &model);
/// assert_eq!(calc.max_depth, 3); // Array -> Array -> int
/// ```
pub trait TypeVisitor {
    /// Visit a type.
    ///
    /// Override this to customize behavior for all types.
    /// Call `super_visit_ty` to recurse into nested types.
    fn visit_ty(&mut self, ty: TypeId, model: &OmniModel) {
        self.super_visit_ty(ty, model)
    }

    /// Default recursion into nested types.
    ///
    /// Override `visit_ty` instead of this method.
    fn super_visit_ty(&mut self, ty: TypeId, model: &OmniModel) {
        if let Some(data) = model.try_get(ty) {
            data.for_each_edge(|child| self.visit_ty(child, model));
        }
    }
}

/// Collects every type reachable from a set of roots, in pre-order.
#[derive(Default)]
pub struct ReachableTypes {
    seen: HashSet<TypeId>,
    pub order: Vec<TypeId>,
}

impl ReachableTypes {
    pub fn contains(&self, id: TypeId) -> bool {
        self.seen.contains(&id)
    }
}

impl TypeVisitor for ReachableTypes {
    fn visit_ty(&mut self, ty: TypeId, model: &OmniModel) {
        if !self.seen.insert(ty) {
            return;
        }
        self.order.push(ty);
        self.super_visit_ty(ty, model);
    }
}

impl OmniModel {
    /// Ids used directly by the registry and the endpoint surface.
    pub fn roots(&self) -> Vec<TypeId> {
        let mut roots = self.types.clone();
        for endpoint in &self.endpoints {
            roots.extend(endpoint.request.ty);
            roots.extend(endpoint.responses.iter().map(|r| r.ty));
        }
        roots
    }

    /// Every type reachable from [`OmniModel::roots`], in pre-order.
    pub fn reachable_types(&self) -> ReachableTypes {
        let mut visitor = ReachableTypes::default();
        for root in self.roots() {
            visitor.visit_ty(root, self);
        }
        visitor
    }
}
