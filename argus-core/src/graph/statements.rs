// Statement nodes.
//
// Statement-level translation is a collaborator concern; the schema here
// covers what the declaration engine needs structurally: blocks (method
// bodies, initializer blocks), returns (implicit-return synthesis), the
// try construct (the ordered-edge flagship), and an opaque fallback for
// everything else.

use serde::{Deserialize, Serialize};

use super::NodeInfo;
use super::declarations::ParameterNode;
use super::edges::OrderedEdges;
use crate::SourceSpan;

// ── Expressions ───────────────────────────────────────────────────────

/// An opaque expression leaf. Expression translation happens elsewhere;
/// the declaration engine only carries source text through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub code: String,
    pub location: Option<SourceSpan>,
}

// ── Statements ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Block(BlockStatement),
    Return(ReturnStatement),
    Try(Box<TryStatement>),
    Raw(RawStatement),
}

impl Statement {
    pub fn info(&self) -> &NodeInfo {
        match self {
            Statement::Block(s) => &s.info,
            Statement::Return(s) => &s.info,
            Statement::Try(s) => &s.info,
            Statement::Raw(s) => &s.info,
        }
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Statement::Return(_))
    }
}

/// A compound statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStatement {
    pub info: NodeInfo,
    pub statements: Vec<Statement>,
    /// True for `static { ... }` class initializer blocks.
    pub static_block: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub info: NodeInfo,
    /// Return value; `None` for a bare `return;`.
    pub value: Option<Expression>,
}

/// A statement the translator does not model structurally. Source text is
/// kept in `info.code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStatement {
    pub info: NodeInfo,
}

// ── Try construct ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub info: NodeInfo,
    /// The caught exception binding; `None` for a malformed clause.
    pub parameter: Option<ParameterNode>,
    pub body: BlockStatement,
}

/// A try statement: ordered resources, one try block, ordered catch
/// clauses, and at most one finally block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TryStatement {
    pub info: NodeInfo,
    /// try-with-resources bindings, in source order.
    pub resources: OrderedEdges<Statement>,
    pub try_block: BlockStatement,
    /// Catch clauses, in source order.
    pub catch_clauses: OrderedEdges<CatchClause>,
    pub finally_block: Option<BlockStatement>,
}

impl PartialEq for TryStatement {
    /// Equality covers both the raw edge lists and their materialized
    /// ordered views: two try nodes whose edges store the same children in
    /// a different physical order are not equal.
    fn eq(&self, other: &Self) -> bool {
        self.info == other.info
            && self.resources.edges() == other.resources.edges()
            && self.resources.ordered() == other.resources.ordered()
            && self.try_block == other.try_block
            && self.catch_clauses.edges() == other.catch_clauses.edges()
            && self.catch_clauses.ordered() == other.catch_clauses.ordered()
            && self.finally_block == other.finally_block
    }
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeId;
    use crate::graph::edges::PropertyEdge;

    fn block(id: u32) -> BlockStatement {
        BlockStatement {
            info: NodeInfo::anonymous(NodeId(id)),
            statements: Vec::new(),
            static_block: false,
        }
    }

    fn raw(id: u32, code: &str) -> Statement {
        Statement::Raw(RawStatement {
            info: NodeInfo::anonymous(NodeId(id)).with_code(code),
        })
    }

    fn try_stmt(resources: OrderedEdges<Statement>) -> TryStatement {
        TryStatement {
            info: NodeInfo::anonymous(NodeId(0)),
            resources,
            try_block: block(1),
            catch_clauses: OrderedEdges::new(),
            finally_block: None,
        }
    }

    #[test]
    fn equal_when_identical() {
        let resources = || {
            OrderedEdges::from_children(vec![raw(2, "r = open(a)"), raw(3, "s = open(b)")])
        };
        assert_eq!(try_stmt(resources()), try_stmt(resources()));
    }

    #[test]
    fn unequal_when_physical_order_differs() {
        let a = OrderedEdges::from_edges(vec![
            PropertyEdge::with_index(raw(2, "r = open(a)"), 0),
            PropertyEdge::with_index(raw(3, "s = open(b)"), 1),
        ]);
        let b = OrderedEdges::from_edges(vec![
            PropertyEdge::with_index(raw(3, "s = open(b)"), 1),
            PropertyEdge::with_index(raw(2, "r = open(a)"), 0),
        ]);
        // same ordered view...
        let va: Vec<_> = a.ordered();
        let vb: Vec<_> = b.ordered();
        assert_eq!(va, vb);
        // ...but raw edge lists differ, so the try nodes are not equal
        assert_ne!(try_stmt(a), try_stmt(b));
    }

    #[test]
    fn unequal_when_resource_order_differs() {
        let a = OrderedEdges::from_children(vec![raw(2, "x"), raw(3, "y")]);
        let b = OrderedEdges::from_children(vec![raw(3, "y"), raw(2, "x")]);
        assert_ne!(try_stmt(a), try_stmt(b));
    }
}
