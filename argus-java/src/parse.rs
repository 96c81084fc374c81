// tree-sitter-java → declaration AST.
//
// Lowering is defensive: a malformed subtree is skipped rather than
// panicking, so a partially broken file still yields a usable unit.

use std::path::Path;

use tree_sitter::Node;

use argus_core::SourceSpan;

use crate::ast::{
    AnnotationDecl, Block, CatchDecl, CompilationUnit, ConstructorDecl, EnumConstantDecl, EnumDecl,
    ExprRef, FieldDecl, ImportDecl, InitializerDecl, MemberDecl, MethodDecl, ParamDecl, RawStmt,
    RecordDecl, ResourceDecl, ReturnStmt, Stmt, TryStmt, TypeRef, VariableDecl,
};
use crate::{Result, TranslateError};

// ── Node helpers ──────────────────────────────────────────────────────

fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

fn child_by_field<'a>(node: Node<'a>, field: &str) -> Option<Node<'a>> {
    node.child_by_field_name(field)
}

fn find_child_by_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|c| c.kind() == kind)
}

fn node_span(node: Node<'_>) -> Option<SourceSpan> {
    let range = node.range();
    Some(SourceSpan {
        start_row: range.start_point.row,
        start_col: range.start_point.column,
        end_row: range.end_point.row,
        end_col: range.end_point.column,
    })
}

fn type_ref(node: Node<'_>, source: &str) -> TypeRef {
    TypeRef {
        text: node_text(node, source).to_string(),
        span: node_span(node),
    }
}

fn modifiers(node: Node<'_>, source: &str) -> Vec<String> {
    let Some(mods) = find_child_by_kind(node, "modifiers") else {
        return Vec::new();
    };
    let mut cursor = mods.walk();
    mods.children(&mut cursor)
        .filter(|c| !c.kind().ends_with("annotation"))
        .map(|c| node_text(c, source).to_string())
        .collect()
}

// ── Entry point ───────────────────────────────────────────────────────

/// Parse one Java source file into the declaration AST.
pub fn parse_source(path: &Path, source: &str) -> Result<CompilationUnit> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| TranslateError::TreeSitter(e.to_string()))?;
    let tree = parser.parse(source, None).ok_or_else(|| TranslateError::Parse {
        path: path.display().to_string(),
        message: "tree-sitter produced no tree".to_string(),
    })?;
    Ok(lower_unit(tree.root_node(), source))
}

fn lower_unit(root: Node<'_>, source: &str) -> CompilationUnit {
    let mut package = None;
    let mut imports = Vec::new();
    let mut types = Vec::new();

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        match child.kind() {
            "package_declaration" => {
                package = child
                    .named_children(&mut child.walk())
                    .find(|c| matches!(c.kind(), "identifier" | "scoped_identifier"))
                    .map(|c| node_text(c, source).to_string());
            }
            "import_declaration" => imports.push(lower_import(child, source)),
            "class_declaration" | "interface_declaration" => {
                if let Some(record) = lower_record(child, source) {
                    types.push(MemberDecl::Record(record));
                }
            }
            "enum_declaration" => {
                if let Some(decl) = lower_enum(child, source) {
                    types.push(MemberDecl::Enum(decl));
                }
            }
            "annotation_type_declaration" => {
                if let Some(decl) = lower_annotation(child, source) {
                    types.push(MemberDecl::Annotation(decl));
                }
            }
            _ => {}
        }
    }

    CompilationUnit {
        package,
        imports,
        types,
    }
}

// Java imports: `import java.util.List;`, `import static java.lang.Math.max;`,
// `import java.util.*;`
fn lower_import(node: Node<'_>, source: &str) -> ImportDecl {
    let text = node_text(node, source);
    let body = text
        .strip_prefix("import")
        .unwrap_or(text)
        .trim()
        .trim_end_matches(';')
        .trim();
    let (is_static, body) = match body.strip_prefix("static") {
        Some(rest) => (true, rest.trim()),
        None => (false, body),
    };
    let (is_wildcard, path) = match body.strip_suffix(".*") {
        Some(prefix) => (true, prefix),
        None => (false, body),
    };
    ImportDecl {
        path: path.to_string(),
        is_static,
        is_wildcard,
        span: node_span(node),
    }
}

// ── Type declarations ─────────────────────────────────────────────────

fn lower_record(node: Node<'_>, source: &str) -> Option<RecordDecl> {
    let name = node_text(child_by_field(node, "name")?, source).to_string();
    let is_interface = node.kind() == "interface_declaration";

    let mut extends = Vec::new();
    let mut implements = Vec::new();
    if let Some(superclass) = child_by_field(node, "superclass") {
        // `superclass` wraps `extends <type>` — the type is the named child
        extends.extend(collect_type_refs(superclass, source));
    }
    if is_interface {
        // interface `extends A, B` lowers to supertypes
        if let Some(list) = child_by_field(node, "interfaces")
            .or_else(|| find_child_by_kind(node, "extends_interfaces"))
        {
            extends.extend(collect_type_refs(list, source));
        }
    } else if let Some(list) = child_by_field(node, "interfaces")
        .or_else(|| find_child_by_kind(node, "super_interfaces"))
    {
        implements.extend(collect_type_refs(list, source));
    }

    let members = child_by_field(node, "body")
        .map(|body| lower_members(body, source))
        .unwrap_or_default();

    Some(RecordDecl {
        name,
        is_interface,
        modifiers: modifiers(node, source),
        type_parameters: type_parameters(node, source),
        extends,
        implements,
        members,
        span: node_span(node),
        code: node_text(node, source).to_string(),
    })
}

fn type_parameters(node: Node<'_>, source: &str) -> Vec<String> {
    let Some(params) = child_by_field(node, "type_parameters") else {
        return Vec::new();
    };
    let mut cursor = params.walk();
    params
        .children(&mut cursor)
        .filter(|c| c.kind() == "type_parameter")
        .filter_map(|p| {
            p.named_children(&mut p.walk())
                .find(|c| matches!(c.kind(), "identifier" | "type_identifier"))
                .map(|c| node_text(c, source).to_string())
        })
        .collect()
}

/// Collect the type references inside a wrapper node (`superclass`,
/// `super_interfaces`, `extends_interfaces`, `throws`), skipping keywords
/// and punctuation. `type_list` wrappers are flattened.
fn collect_type_refs(node: Node<'_>, source: &str) -> Vec<TypeRef> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "type_list" => out.extend(collect_type_refs(child, source)),
            "line_comment" | "block_comment" => {}
            _ => out.push(type_ref(child, source)),
        }
    }
    out
}

fn lower_members(body: Node<'_>, source: &str) -> Vec<MemberDecl> {
    let mut members = Vec::new();
    let mut cursor = body.walk();
    for child in body.children(&mut cursor) {
        match child.kind() {
            "field_declaration" => {
                if let Some(decl) = lower_field(child, source) {
                    members.push(MemberDecl::Field(decl));
                }
            }
            "method_declaration" => {
                if let Some(decl) = lower_method(child, source) {
                    members.push(MemberDecl::Method(decl));
                }
            }
            "constructor_declaration" => {
                if let Some(decl) = lower_constructor(child, source) {
                    members.push(MemberDecl::Constructor(decl));
                }
            }
            "class_declaration" | "interface_declaration" => {
                if let Some(decl) = lower_record(child, source) {
                    members.push(MemberDecl::Record(decl));
                }
            }
            "enum_declaration" => {
                if let Some(decl) = lower_enum(child, source) {
                    members.push(MemberDecl::Enum(decl));
                }
            }
            "annotation_type_declaration" => {
                if let Some(decl) = lower_annotation(child, source) {
                    members.push(MemberDecl::Annotation(decl));
                }
            }
            "static_initializer" => {
                if let Some(block) = find_child_by_kind(child, "block") {
                    members.push(MemberDecl::Initializer(InitializerDecl {
                        is_static: true,
                        body: lower_block(block, source),
                        span: node_span(child),
                        code: node_text(child, source).to_string(),
                    }));
                }
            }
            "block" => {
                members.push(MemberDecl::Initializer(InitializerDecl {
                    is_static: false,
                    body: lower_block(child, source),
                    span: node_span(child),
                    code: node_text(child, source).to_string(),
                }));
            }
            _ => {}
        }
    }
    members
}

// ── Methods, constructors, parameters ─────────────────────────────────

fn lower_method(node: Node<'_>, source: &str) -> Option<MethodDecl> {
    let name = node_text(child_by_field(node, "name")?, source).to_string();
    let return_type = child_by_field(node, "type").map(|t| type_ref(t, source))?;

    Some(MethodDecl {
        name,
        modifiers: modifiers(node, source),
        return_type,
        parameters: lower_params(node, source),
        throws: lower_throws(node, source),
        body: child_by_field(node, "body").map(|b| lower_block(b, source)),
        span: node_span(node),
        code: node_text(node, source).to_string(),
    })
}

fn lower_constructor(node: Node<'_>, source: &str) -> Option<ConstructorDecl> {
    let name = node_text(child_by_field(node, "name")?, source).to_string();
    let body = child_by_field(node, "body").map(|b| lower_block(b, source))?;

    Some(ConstructorDecl {
        name,
        modifiers: modifiers(node, source),
        parameters: lower_params(node, source),
        throws: lower_throws(node, source),
        body,
        span: node_span(node),
        code: node_text(node, source).to_string(),
    })
}

fn lower_params(node: Node<'_>, source: &str) -> Vec<ParamDecl> {
    let Some(params) = child_by_field(node, "parameters") else {
        return Vec::new();
    };
    let mut cursor = params.walk();
    params
        .children(&mut cursor)
        .filter(|c| matches!(c.kind(), "formal_parameter" | "spread_parameter"))
        .filter_map(|p| lower_param(p, source))
        .collect()
}

fn lower_param(node: Node<'_>, source: &str) -> Option<ParamDecl> {
    let name_node = child_by_field(node, "name").or_else(|| {
        // spread parameters hide the name inside a variable_declarator
        find_child_by_kind(node, "variable_declarator").and_then(|v| child_by_field(v, "name"))
    })?;
    // spread parameters carry no `type` field; their type is the first
    // named child that is not the declarator
    let ty_node = child_by_field(node, "type").or_else(|| {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .find(|c| !matches!(c.kind(), "variable_declarator" | "modifiers" | "identifier"))
    });
    let ty = ty_node
        .map(|t| type_ref(t, source))
        .unwrap_or_else(|| TypeRef {
            text: String::new(),
            span: None,
        });

    Some(ParamDecl {
        name: node_text(name_node, source).to_string(),
        type_ref: ty,
        is_variadic: node.kind() == "spread_parameter",
        span: node_span(node),
        code: node_text(node, source).to_string(),
    })
}

fn lower_throws(node: Node<'_>, source: &str) -> Vec<TypeRef> {
    find_child_by_kind(node, "throws")
        .map(|t| collect_type_refs(t, source))
        .unwrap_or_default()
}

// ── Fields and enums ──────────────────────────────────────────────────

fn lower_field(node: Node<'_>, source: &str) -> Option<FieldDecl> {
    let ty = child_by_field(node, "type").map(|t| type_ref(t, source))?;

    let mut variables = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "variable_declarator" {
            if let Some(name_node) = child_by_field(child, "name") {
                variables.push(VariableDecl {
                    name: node_text(name_node, source).to_string(),
                    initializer: child_by_field(child, "value").map(|v| ExprRef {
                        code: node_text(v, source).to_string(),
                        span: node_span(v),
                    }),
                    span: node_span(child),
                    code: node_text(child, source).to_string(),
                });
            }
        }
    }
    if variables.is_empty() {
        return None;
    }

    Some(FieldDecl {
        modifiers: modifiers(node, source),
        type_ref: ty,
        variables,
        span: node_span(node),
        code: node_text(node, source).to_string(),
    })
}

fn lower_enum(node: Node<'_>, source: &str) -> Option<EnumDecl> {
    let name = node_text(child_by_field(node, "name")?, source).to_string();

    let implements = child_by_field(node, "interfaces")
        .or_else(|| find_child_by_kind(node, "super_interfaces"))
        .map(|list| collect_type_refs(list, source))
        .unwrap_or_default();

    let mut constants = Vec::new();
    if let Some(body) = child_by_field(node, "body") {
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            if child.kind() == "enum_constant" {
                if let Some(name_node) = child_by_field(child, "name") {
                    constants.push(EnumConstantDecl {
                        name: node_text(name_node, source).to_string(),
                        span: node_span(child),
                        code: node_text(child, source).to_string(),
                    });
                }
            }
        }
    }

    Some(EnumDecl {
        name,
        modifiers: modifiers(node, source),
        implements,
        constants,
        span: node_span(node),
        code: node_text(node, source).to_string(),
    })
}

fn lower_annotation(node: Node<'_>, source: &str) -> Option<AnnotationDecl> {
    let name = node_text(child_by_field(node, "name")?, source).to_string();
    Some(AnnotationDecl {
        name,
        span: node_span(node),
        code: node_text(node, source).to_string(),
    })
}

// ── Statements ────────────────────────────────────────────────────────

fn lower_block(node: Node<'_>, source: &str) -> Block {
    let mut statements = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if let Some(stmt) = lower_stmt(child, source) {
            statements.push(stmt);
        }
    }
    Block {
        statements,
        span: node_span(node),
        code: node_text(node, source).to_string(),
    }
}

fn lower_stmt(node: Node<'_>, source: &str) -> Option<Stmt> {
    match node.kind() {
        "return_statement" => {
            let value = node
                .named_children(&mut node.walk())
                .find(|c| !matches!(c.kind(), "line_comment" | "block_comment"))
                .map(|c| ExprRef {
                    code: node_text(c, source).to_string(),
                    span: node_span(c),
                });
            Some(Stmt::Return(ReturnStmt {
                value,
                span: node_span(node),
                code: node_text(node, source).to_string(),
            }))
        }
        "try_statement" | "try_with_resources_statement" => {
            Some(Stmt::Try(lower_try(node, source)))
        }
        "block" => Some(Stmt::Block(lower_block(node, source))),
        "line_comment" | "block_comment" => None,
        _ => Some(Stmt::Raw(RawStmt {
            code: node_text(node, source).to_string(),
            span: node_span(node),
        })),
    }
}

fn lower_try(node: Node<'_>, source: &str) -> TryStmt {
    let mut resources = Vec::new();
    if let Some(resource_list) = child_by_field(node, "resources") {
        let mut cursor = resource_list.walk();
        for child in resource_list.children(&mut cursor) {
            if child.kind() == "resource" {
                resources.push(ResourceDecl {
                    name: child_by_field(child, "name")
                        .map(|n| node_text(n, source).to_string()),
                    code: node_text(child, source).to_string(),
                    span: node_span(child),
                });
            }
        }
    }

    let block = child_by_field(node, "body")
        .map(|b| lower_block(b, source))
        .unwrap_or_else(|| Block {
            statements: Vec::new(),
            span: None,
            code: String::new(),
        });

    let mut catches = Vec::new();
    let mut finally = None;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "catch_clause" => catches.push(lower_catch(child, source)),
            "finally_clause" => {
                finally = find_child_by_kind(child, "block").map(|b| lower_block(b, source));
            }
            _ => {}
        }
    }

    TryStmt {
        resources,
        block,
        catches,
        finally,
        span: node_span(node),
        code: node_text(node, source).to_string(),
    }
}

fn lower_catch(node: Node<'_>, source: &str) -> CatchDecl {
    let parameter = find_child_by_kind(node, "catch_formal_parameter").and_then(|p| {
        let name_node = child_by_field(p, "name").or_else(|| {
            let mut cursor = p.walk();
            p.children(&mut cursor).filter(|c| c.kind() == "identifier").last()
        })?;
        let ty = find_child_by_kind(p, "catch_type")
            .map(|t| type_ref(t, source))
            .unwrap_or_else(|| TypeRef {
                text: String::new(),
                span: None,
            });
        Some(ParamDecl {
            name: node_text(name_node, source).to_string(),
            type_ref: ty,
            is_variadic: false,
            span: node_span(p),
            code: node_text(p, source).to_string(),
        })
    });

    let body = child_by_field(node, "body")
        .or_else(|| find_child_by_kind(node, "block"))
        .map(|b| lower_block(b, source))
        .unwrap_or_else(|| Block {
            statements: Vec::new(),
            span: None,
            code: String::new(),
        });

    CatchDecl {
        parameter,
        body,
        span: node_span(node),
        code: node_text(node, source).to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
