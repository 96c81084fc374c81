pub mod graph;
pub mod registry;
pub mod scope;

use serde::{Deserialize, Serialize};

pub use registry::{TranslationContext, TypeRegistry};
pub use scope::{ScopeAnchor, ScopeError, ScopeKind, ScopeStack};

// ── Node IDs ──────────────────────────────────────────────────────────

/// Opaque ID for a graph node. Unique within a single translated unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

// ── Span type ──────────────────────────────────────────────────────

/// Line/column region of a node in its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}
