//! Declaration-level AST for Java sources.
//!
//! These types are the front end's closed input contract: every declaration
//! kind the parser can produce is a variant here, so translator dispatch is
//! an exhaustive match. The structures are intentionally plain; they exist
//! only between parsing and translation.

use argus_core::SourceSpan;

// ── Compilation unit ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub package: Option<String>,
    pub imports: Vec<ImportDecl>,
    /// Top-level type declarations, in source order.
    pub types: Vec<MemberDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    /// Dotted path without any wildcard suffix.
    pub path: String,
    pub is_static: bool,
    pub is_wildcard: bool,
    pub span: Option<SourceSpan>,
}

// ── Declarations ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum MemberDecl {
    Record(RecordDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Field(FieldDecl),
    Enum(EnumDecl),
    Initializer(InitializerDecl),
    Annotation(AnnotationDecl),
}

/// A textual type reference as written in source.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    pub text: String,
    pub span: Option<SourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordDecl {
    pub name: String,
    pub is_interface: bool,
    pub modifiers: Vec<String>,
    pub type_parameters: Vec<String>,
    pub extends: Vec<TypeRef>,
    pub implements: Vec<TypeRef>,
    pub members: Vec<MemberDecl>,
    pub span: Option<SourceSpan>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub modifiers: Vec<String>,
    pub return_type: TypeRef,
    pub parameters: Vec<ParamDecl>,
    pub throws: Vec<TypeRef>,
    /// `None` for abstract/interface methods.
    pub body: Option<Block>,
    pub span: Option<SourceSpan>,
    pub code: String,
}

impl MethodDecl {
    pub fn is_static(&self) -> bool {
        self.modifiers.iter().any(|m| m == "static")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub name: String,
    pub modifiers: Vec<String>,
    pub parameters: Vec<ParamDecl>,
    pub throws: Vec<TypeRef>,
    pub body: Block,
    pub span: Option<SourceSpan>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub name: String,
    pub type_ref: TypeRef,
    pub is_variadic: bool,
    pub span: Option<SourceSpan>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub modifiers: Vec<String>,
    pub type_ref: TypeRef,
    /// One or more declarators: `int a, b;` carries two.
    pub variables: Vec<VariableDecl>,
    pub span: Option<SourceSpan>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub name: String,
    pub initializer: Option<ExprRef>,
    pub span: Option<SourceSpan>,
    pub code: String,
}

/// An opaque expression: source text plus location.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprRef {
    pub code: String,
    pub span: Option<SourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub modifiers: Vec<String>,
    pub implements: Vec<TypeRef>,
    pub constants: Vec<EnumConstantDecl>,
    pub span: Option<SourceSpan>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstantDecl {
    pub name: String,
    pub span: Option<SourceSpan>,
    pub code: String,
}

/// A static or instance initializer block.
#[derive(Debug, Clone, PartialEq)]
pub struct InitializerDecl {
    pub is_static: bool,
    pub body: Block,
    pub span: Option<SourceSpan>,
    pub code: String,
}

/// An annotation declaration — kept as a variant so the translator can emit
/// a problem placeholder for it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationDecl {
    pub name: String,
    pub span: Option<SourceSpan>,
    pub code: String,
}

// ── Statements ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Option<SourceSpan>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Return(ReturnStmt),
    Try(TryStmt),
    Block(Block),
    Raw(RawStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<ExprRef>,
    pub span: Option<SourceSpan>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStmt {
    /// try-with-resources bindings, in source order.
    pub resources: Vec<ResourceDecl>,
    pub block: Block,
    pub catches: Vec<CatchDecl>,
    pub finally: Option<Block>,
    pub span: Option<SourceSpan>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDecl {
    pub name: Option<String>,
    pub code: String,
    pub span: Option<SourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchDecl {
    pub parameter: Option<ParamDecl>,
    pub body: Block,
    pub span: Option<SourceSpan>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawStmt {
    pub code: String,
    pub span: Option<SourceSpan>,
}
