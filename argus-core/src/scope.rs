// The scope stack — the "current insertion point" for new declarations.
//
// Scopes are lexical: namespace, record, function. A frame is pushed when
// translation enters a declaration's body or member list and popped exactly
// once on the way out; enter/leave must pair even across early returns, and
// `leave` verifies the pairing at runtime. Scope records persist after
// their frame is popped so a scope can be transiently re-entered (the
// nested-class `this` field needs this).

use std::collections::HashMap;

use thiserror::Error;

use crate::NodeId;

// ── Scope kinds and anchors ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Namespace,
    Record,
    Function,
}

/// Identity of the declaration that opened a scope. Non-owning: the graph
/// owns the node; the stack only refers to it by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeAnchor {
    pub id: NodeId,
    pub kind: ScopeKind,
    pub simple_name: String,
    pub qualified_name: String,
}

// ── Errors ────────────────────────────────────────────────────────────

/// Violations of the enter/leave pairing contract. These are translator
/// bugs, not input conditions, and abort the current unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("scope mismatch: leaving `{requested}` but the current scope is `{current}`")]
    Mismatch { requested: String, current: String },

    #[error("scope mismatch: leaving `{requested}` with no scope active")]
    NoneActive { requested: String },
}

// ── Scope stack ───────────────────────────────────────────────────────

#[derive(Debug)]
struct Scope {
    anchor: ScopeAnchor,
    /// Simple name → declaration node id. Last write wins on collision.
    symbols: HashMap<String, NodeId>,
}

#[derive(Debug, Default)]
pub struct ScopeStack {
    /// Active frames, innermost last; each entry is an anchor id into
    /// `records`.
    stack: Vec<NodeId>,
    /// Persistent scope records, keyed by anchor id. A record survives
    /// `leave` so `enter` with the same anchor re-activates it.
    records: HashMap<NodeId, Scope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Push a frame for `anchor`. Re-entering a known anchor re-activates
    /// its existing symbol table.
    pub fn enter(&mut self, anchor: ScopeAnchor) {
        let id = anchor.id;
        self.records.entry(id).or_insert_with(|| Scope {
            anchor,
            symbols: HashMap::new(),
        });
        self.stack.push(id);
    }

    /// Pop the top frame, verifying it is anchored at `anchor_id`.
    pub fn leave(&mut self, anchor_id: NodeId) -> Result<(), ScopeError> {
        let requested = self.describe(anchor_id);
        match self.stack.last() {
            None => Err(ScopeError::NoneActive { requested }),
            Some(&top) if top != anchor_id => Err(ScopeError::Mismatch {
                requested,
                current: self.describe(top),
            }),
            Some(_) => {
                self.stack.pop();
                Ok(())
            }
        }
    }

    /// Register a declaration in the current frame's symbol table.
    ///
    /// Collisions within one frame overwrite (last write wins); later
    /// passes may report shadowing, this layer does not reject it.
    pub fn add_declaration(&mut self, name: &str, id: NodeId) {
        let Some(&top) = self.stack.last() else {
            tracing::warn!(name, "declaration registered with no scope active; dropped");
            return;
        };
        if let Some(scope) = self.records.get_mut(&top) {
            scope.symbols.insert(name.to_string(), id);
        }
    }

    /// The anchor of the current (innermost) scope.
    pub fn current_anchor(&self) -> Option<&ScopeAnchor> {
        let &top = self.stack.last()?;
        self.records.get(&top).map(|s| &s.anchor)
    }

    /// The nearest enclosing record scope's anchor, if any.
    pub fn current_record(&self) -> Option<&ScopeAnchor> {
        self.first_scope_matching(|a| a.kind == ScopeKind::Record)
    }

    /// The nearest enclosing frame whose anchor satisfies `predicate`.
    pub fn first_scope_matching<P>(&self, predicate: P) -> Option<&ScopeAnchor>
    where
        P: Fn(&ScopeAnchor) -> bool,
    {
        self.stack
            .iter()
            .rev()
            .filter_map(|id| self.records.get(id).map(|s| &s.anchor))
            .find(|a| predicate(a))
    }

    /// Qualified-name prefix from all enclosing namespace/record frames,
    /// outermost first. Function frames and empty fragments contribute
    /// nothing.
    pub fn current_name_prefix(&self, delimiter: &str) -> String {
        self.stack
            .iter()
            .filter_map(|id| self.records.get(id).map(|s| &s.anchor))
            .filter(|a| matches!(a.kind, ScopeKind::Namespace | ScopeKind::Record))
            .map(|a| a.simple_name.as_str())
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(delimiter)
    }

    /// Resolve a simple name by walking frames innermost-out.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.stack
            .iter()
            .rev()
            .filter_map(|id| self.records.get(id))
            .find_map(|s| s.symbols.get(name).copied())
    }

    /// A scope's registered symbols, by anchor id (also for scopes that
    /// have been left).
    pub fn symbols_of(&self, anchor_id: NodeId) -> Option<&HashMap<String, NodeId>> {
        self.records.get(&anchor_id).map(|s| &s.symbols)
    }

    fn describe(&self, id: NodeId) -> String {
        self.records
            .get(&id)
            .map_or_else(|| format!("#{}", id.0), |s| s.anchor.qualified_name.clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(id: u32, kind: ScopeKind, name: &str) -> ScopeAnchor {
        ScopeAnchor {
            id: NodeId(id),
            kind,
            simple_name: name.to_string(),
            qualified_name: name.to_string(),
        }
    }

    #[test]
    fn depth_returns_after_nested_enter_leave() {
        let mut scopes = ScopeStack::new();
        scopes.enter(anchor(0, ScopeKind::Namespace, "pkg"));
        scopes.enter(anchor(1, ScopeKind::Record, "Foo"));
        scopes.enter(anchor(2, ScopeKind::Function, "bar"));
        assert_eq!(scopes.depth(), 3);
        scopes.leave(NodeId(2)).unwrap();
        scopes.leave(NodeId(1)).unwrap();
        scopes.leave(NodeId(0)).unwrap();
        assert_eq!(scopes.depth(), 0);
    }

    #[test]
    fn leave_out_of_order_is_a_mismatch() {
        let mut scopes = ScopeStack::new();
        scopes.enter(anchor(0, ScopeKind::Record, "Foo"));
        scopes.enter(anchor(1, ScopeKind::Function, "bar"));
        let err = scopes.leave(NodeId(0)).unwrap_err();
        assert!(matches!(err, ScopeError::Mismatch { .. }));
    }

    #[test]
    fn leave_on_empty_stack_fails() {
        let mut scopes = ScopeStack::new();
        let err = scopes.leave(NodeId(7)).unwrap_err();
        assert!(matches!(err, ScopeError::NoneActive { .. }));
    }

    #[test]
    fn collision_overwrites_last_write_wins() {
        let mut scopes = ScopeStack::new();
        scopes.enter(anchor(0, ScopeKind::Record, "Foo"));
        scopes.add_declaration("x", NodeId(10));
        scopes.add_declaration("x", NodeId(11));
        assert_eq!(scopes.lookup("x"), Some(NodeId(11)));
    }

    #[test]
    fn lookup_walks_outward() {
        let mut scopes = ScopeStack::new();
        scopes.enter(anchor(0, ScopeKind::Record, "Foo"));
        scopes.add_declaration("field", NodeId(10));
        scopes.enter(anchor(1, ScopeKind::Function, "bar"));
        scopes.add_declaration("param", NodeId(11));
        assert_eq!(scopes.lookup("param"), Some(NodeId(11)));
        assert_eq!(scopes.lookup("field"), Some(NodeId(10)));
        assert_eq!(scopes.lookup("missing"), None);
    }

    #[test]
    fn name_prefix_skips_function_frames() {
        let mut scopes = ScopeStack::new();
        scopes.enter(anchor(0, ScopeKind::Namespace, "com.example"));
        scopes.enter(anchor(1, ScopeKind::Record, "Outer"));
        scopes.enter(anchor(2, ScopeKind::Function, "run"));
        assert_eq!(scopes.current_name_prefix("."), "com.example.Outer");
    }

    #[test]
    fn name_prefix_skips_empty_fragments() {
        let mut scopes = ScopeStack::new();
        scopes.enter(anchor(0, ScopeKind::Namespace, ""));
        scopes.enter(anchor(1, ScopeKind::Record, "Foo"));
        assert_eq!(scopes.current_name_prefix("."), "Foo");
    }

    #[test]
    fn current_record_skips_function_scope() {
        let mut scopes = ScopeStack::new();
        scopes.enter(anchor(0, ScopeKind::Record, "Foo"));
        scopes.enter(anchor(1, ScopeKind::Function, "bar"));
        assert_eq!(scopes.current_record().map(|a| a.id), Some(NodeId(0)));
    }

    #[test]
    fn current_record_outside_any_record() {
        let mut scopes = ScopeStack::new();
        scopes.enter(anchor(0, ScopeKind::Namespace, "pkg"));
        assert!(scopes.current_record().is_none());
    }

    #[test]
    fn reentry_preserves_symbols() {
        let mut scopes = ScopeStack::new();
        let inner = anchor(1, ScopeKind::Record, "Inner");
        scopes.enter(anchor(0, ScopeKind::Record, "Outer"));
        scopes.enter(inner.clone());
        scopes.add_declaration("x", NodeId(10));
        scopes.leave(NodeId(1)).unwrap();

        // transient re-entry, as used for the nested-class `this` field
        scopes.enter(inner);
        scopes.add_declaration("Outer.this", NodeId(11));
        scopes.leave(NodeId(1)).unwrap();

        let symbols = scopes.symbols_of(NodeId(1)).unwrap();
        assert_eq!(symbols.get("x"), Some(&NodeId(10)));
        assert_eq!(symbols.get("Outer.this"), Some(&NodeId(11)));
    }
}
