// The property graph schema — the persisted contract downstream analysis
// passes rely on. Declaration and statement nodes both hang off a shared
// `NodeInfo`; any one-to-many relationship where sibling order matters goes
// through `edges::OrderedEdges`.

pub mod declarations;
pub mod edges;
pub mod statements;
pub mod types;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{NodeId, SourceSpan};

pub use declarations::{
    ConstructorNode, Declaration, EnumConstantNode, EnumNode, FieldNode, MethodNode,
    ParameterNode, ProblemKind, ProblemNode, RecordKind, RecordNode, TranslationUnit,
};
pub use edges::{EdgeProperty, OrderedEdges, PropertyEdge, PropertyValue};
pub use statements::{
    BlockStatement, CatchClause, Expression, RawStatement, ReturnStatement, Statement,
    TryStatement,
};
pub use types::{Type, TypeKind, TypeOrigin};

// ── Shared node attributes ────────────────────────────────────────────

/// Attributes common to every graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub id: NodeId,
    /// Simple name. Empty for anonymous nodes (blocks, raw statements).
    pub name: String,
    /// Fully-qualified name built from the enclosing scope prefix.
    pub qualified_name: String,
    /// Verbatim source text this node was translated from, if any.
    pub code: Option<String>,
    pub location: Option<SourceSpan>,
    pub modifiers: BTreeSet<String>,
    /// Synthesized by the translator rather than derived from source.
    pub implicit: bool,
}

impl NodeInfo {
    pub fn new(id: NodeId, name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            qualified_name: qualified_name.into(),
            code: None,
            location: None,
            modifiers: BTreeSet::new(),
            implicit: false,
        }
    }

    /// A node with no name of its own (statements, expressions).
    pub fn anonymous(id: NodeId) -> Self {
        Self::new(id, "", "")
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_location(mut self, location: Option<SourceSpan>) -> Self {
        self.location = location;
        self
    }

    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = modifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn implicit(mut self) -> Self {
        self.implicit = true;
        self
    }
}
