// Per-unit translation state: the type registry and the context that owns
// it. There is deliberately no process-global registry — each compilation
// unit gets its own context, so units can translate on separate threads
// without locks.

use std::collections::HashMap;

use crate::NodeId;
use crate::graph::types::Type;
use crate::scope::ScopeStack;

// ── Type registry ─────────────────────────────────────────────────────

/// Generic type-parameter bindings, keyed by the owning record's qualified
/// name. Consulted before any resolver call, so an explicit generic
/// parameter always wins over the general resolver.
///
/// The registry never fails; lookups simply miss.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    parameters: HashMap<String, Vec<String>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an owner's generic parameter list. Registered once, at
    /// record-translation time; later registrations for the same owner are
    /// ignored.
    pub fn add_type_parameters(&mut self, owner: &str, names: Vec<String>) {
        self.parameters.entry(owner.to_string()).or_insert(names);
    }

    /// The type bound to `name` under `owner`, if `name` is one of the
    /// owner's declared generic parameters.
    pub fn type_parameter(&self, owner: &str, name: &str) -> Option<Type> {
        self.parameters
            .get(owner)?
            .iter()
            .find(|p| p.as_str() == name)
            .map(|p| Type::type_parameter(p.as_str()))
    }
}

// ── Translation context ───────────────────────────────────────────────

/// Everything one unit's translation mutates: scope stack, type registry,
/// node id allocation.
#[derive(Debug, Default)]
pub struct TranslationContext {
    pub scopes: ScopeStack,
    pub registry: TypeRegistry,
    next_id: u32,
}

impl TranslationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{TypeKind, TypeOrigin};

    #[test]
    fn registered_parameter_resolves() {
        let mut registry = TypeRegistry::new();
        registry.add_type_parameters("A", vec!["T".to_string(), "U".to_string()]);

        let ty = registry.type_parameter("A", "T").unwrap();
        assert_eq!(ty.name, "T");
        assert_eq!(ty.kind, TypeKind::TypeParameter);
        assert_eq!(ty.origin, TypeOrigin::Resolved);
    }

    #[test]
    fn unknown_owner_or_name_misses() {
        let mut registry = TypeRegistry::new();
        registry.add_type_parameters("A", vec!["T".to_string()]);
        assert!(registry.type_parameter("B", "T").is_none());
        assert!(registry.type_parameter("A", "V").is_none());
    }

    #[test]
    fn first_registration_wins() {
        let mut registry = TypeRegistry::new();
        registry.add_type_parameters("A", vec!["T".to_string()]);
        registry.add_type_parameters("A", vec!["X".to_string()]);
        assert!(registry.type_parameter("A", "T").is_some());
        assert!(registry.type_parameter("A", "X").is_none());
    }

    #[test]
    fn fresh_ids_are_sequential() {
        let mut ctx = TranslationContext::new();
        assert_eq!(ctx.fresh_id(), NodeId(0));
        assert_eq!(ctx.fresh_id(), NodeId(1));
    }
}
