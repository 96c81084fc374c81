// Declaration nodes — named program entities.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::NodeInfo;
use super::edges::OrderedEdges;
use super::statements::{Expression, Statement};
use super::types::Type;

// ── Declaration variants ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Record(RecordNode),
    Method(MethodNode),
    Constructor(ConstructorNode),
    Field(FieldNode),
    Parameter(ParameterNode),
    Enum(EnumNode),
    EnumConstant(EnumConstantNode),
    Problem(ProblemNode),
}

impl Declaration {
    pub fn info(&self) -> &NodeInfo {
        match self {
            Declaration::Record(n) => &n.info,
            Declaration::Method(n) => &n.info,
            Declaration::Constructor(n) => &n.info,
            Declaration::Field(n) => &n.info,
            Declaration::Parameter(n) => &n.info,
            Declaration::Enum(n) => &n.info,
            Declaration::EnumConstant(n) => &n.info,
            Declaration::Problem(n) => &n.info,
        }
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }
}

// ── Records ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Class,
    Interface,
}

/// A class or interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordNode {
    pub info: NodeInfo,
    #[serde(rename = "record_kind")]
    pub kind: RecordKind,
    /// Declared supertypes, in source order.
    pub super_types: OrderedEdges<Type>,
    /// Implemented interfaces, in source order.
    pub implemented_interfaces: OrderedEdges<Type>,
    /// Generic type parameter names, in source order.
    pub type_parameters: Vec<String>,
    /// Non-static imports visible to this record. Wildcard imports keep
    /// their `.*` suffix.
    pub import_statements: Vec<String>,
    pub static_import_statements: Vec<String>,
    pub fields: Vec<FieldNode>,
    pub methods: Vec<MethodNode>,
    pub constructors: Vec<ConstructorNode>,
    /// Nested records, enums, and problem placeholders, in source order.
    pub members: Vec<Declaration>,
    /// Initializer blocks, in source order.
    pub statements: Vec<Statement>,
}

// ── Functions ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodNode {
    pub info: NodeInfo,
    pub is_static: bool,
    /// The synthesized `this` receiver. Always present after translation;
    /// its type degrades to unknown outside a record.
    pub receiver: Option<ParameterNode>,
    pub parameters: OrderedEdges<ParameterNode>,
    /// Declared checked exceptions, in source order.
    pub throw_types: OrderedEdges<Type>,
    pub return_types: Vec<Type>,
    /// Signature type computed from parameter and return types.
    pub function_type: Type,
    /// `None` for bodiless (abstract/interface) methods.
    pub body: Option<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorNode {
    pub info: NodeInfo,
    pub receiver: Option<ParameterNode>,
    pub parameters: OrderedEdges<ParameterNode>,
    pub throw_types: OrderedEdges<Type>,
    /// The enclosing record's own type.
    pub ty: Type,
    pub body: Statement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterNode {
    pub info: NodeInfo,
    pub ty: Type,
    pub is_variadic: bool,
}

// ── Fields and enums ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
    pub info: NodeInfo,
    pub ty: Type,
    pub initializer: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumNode {
    pub info: NodeInfo,
    pub entries: Vec<EnumConstantNode>,
    pub implemented_interfaces: OrderedEdges<Type>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumConstantNode {
    pub info: NodeInfo,
    /// The enum's own type, assigned after all constants are translated.
    pub ty: Type,
}

// ── Problem placeholders ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemKind {
    TranslationUnsupported,
}

/// Stand-in for a construct with no translation rule. Carries a diagnostic
/// instead of semantic content so the surrounding graph stays well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemNode {
    pub info: NodeInfo,
    pub message: String,
    pub problem: ProblemKind,
}

// ── Translation unit ──────────────────────────────────────────────────

/// Graph root for one translated source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationUnit {
    pub file_path: PathBuf,
    pub package: Option<String>,
    pub declarations: Vec<Declaration>,
}
