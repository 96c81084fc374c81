// The statement translator boundary.
//
// The declaration engine hands a method/constructor body over exactly once
// and never inspects the result's internals. The default implementation
// models blocks, returns, and try constructs structurally; every other
// statement becomes an opaque raw node carrying its source text.

use argus_core::TranslationContext;
use argus_core::graph::{
    BlockStatement, CatchClause, Expression, NodeInfo, ParameterNode, RawStatement,
    ReturnStatement, Statement, TryStatement, Type, TypeOrigin,
};

use crate::ast;

// ── Trait ─────────────────────────────────────────────────────────────

pub trait StatementTranslator {
    /// Translate one body block. Called at most once per method or
    /// constructor body.
    fn translate_block(&self, ctx: &mut TranslationContext, block: &ast::Block) -> BlockStatement;
}

// ── Default implementation ────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct DefaultStatements;

impl StatementTranslator for DefaultStatements {
    fn translate_block(&self, ctx: &mut TranslationContext, block: &ast::Block) -> BlockStatement {
        let info = NodeInfo::anonymous(ctx.fresh_id())
            .with_code(&block.code)
            .with_location(block.span);
        let statements = block
            .statements
            .iter()
            .map(|stmt| self.translate_stmt(ctx, stmt))
            .collect();
        BlockStatement {
            info,
            statements,
            static_block: false,
        }
    }
}

impl DefaultStatements {
    fn translate_stmt(&self, ctx: &mut TranslationContext, stmt: &ast::Stmt) -> Statement {
        match stmt {
            ast::Stmt::Return(ret) => Statement::Return(ReturnStatement {
                info: NodeInfo::anonymous(ctx.fresh_id())
                    .with_code(&ret.code)
                    .with_location(ret.span),
                value: ret.value.as_ref().map(|v| Expression {
                    code: v.code.clone(),
                    location: v.span,
                }),
            }),
            ast::Stmt::Try(try_stmt) => Statement::Try(Box::new(self.translate_try(ctx, try_stmt))),
            ast::Stmt::Block(block) => Statement::Block(self.translate_block(ctx, block)),
            ast::Stmt::Raw(raw) => Statement::Raw(RawStatement {
                info: NodeInfo::anonymous(ctx.fresh_id())
                    .with_code(&raw.code)
                    .with_location(raw.span),
            }),
        }
    }

    fn translate_try(&self, ctx: &mut TranslationContext, try_stmt: &ast::TryStmt) -> TryStatement {
        let info = NodeInfo::anonymous(ctx.fresh_id())
            .with_code(&try_stmt.code)
            .with_location(try_stmt.span);

        let resources: Vec<Statement> = try_stmt
            .resources
            .iter()
            .map(|resource| {
                let mut info = NodeInfo::anonymous(ctx.fresh_id())
                    .with_code(&resource.code)
                    .with_location(resource.span);
                if let Some(name) = &resource.name {
                    info.name.clone_from(name);
                }
                Statement::Raw(RawStatement { info })
            })
            .collect();

        let try_block = self.translate_block(ctx, &try_stmt.block);

        let catches: Vec<CatchClause> = try_stmt
            .catches
            .iter()
            .map(|catch| self.translate_catch(ctx, catch))
            .collect();

        let finally_block = try_stmt
            .finally
            .as_ref()
            .map(|block| self.translate_block(ctx, block));

        TryStatement {
            info,
            resources: argus_core::graph::OrderedEdges::from_children(resources),
            try_block,
            catch_clauses: argus_core::graph::OrderedEdges::from_children(catches),
            finally_block,
        }
    }

    fn translate_catch(&self, ctx: &mut TranslationContext, catch: &ast::CatchDecl) -> CatchClause {
        let parameter = catch.parameter.as_ref().map(|param| ParameterNode {
            info: NodeInfo::new(ctx.fresh_id(), &param.name, &param.name)
                .with_code(&param.code)
                .with_location(param.span),
            // catch types stay syntactic; the resolver is a declaration-level concern
            ty: Type::parse(&param.type_ref.text, TypeOrigin::Guessed),
            is_variadic: false,
        });
        CatchClause {
            info: NodeInfo::anonymous(ctx.fresh_id())
                .with_code(&catch.code)
                .with_location(catch.span),
            parameter,
            body: self.translate_block(ctx, &catch.body),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn block(stmts: Vec<ast::Stmt>) -> ast::Block {
        ast::Block {
            statements: stmts,
            span: None,
            code: String::new(),
        }
    }

    fn raw(code: &str) -> ast::Stmt {
        ast::Stmt::Raw(ast::RawStmt {
            code: code.to_string(),
            span: None,
        })
    }

    #[test]
    fn block_preserves_statement_order() {
        let mut ctx = TranslationContext::new();
        let translated =
            DefaultStatements.translate_block(&mut ctx, &block(vec![raw("a();"), raw("b();")]));
        assert_eq!(translated.statements.len(), 2);
        assert_eq!(
            translated.statements[0].info().code.as_deref(),
            Some("a();")
        );
        assert_eq!(
            translated.statements[1].info().code.as_deref(),
            Some("b();")
        );
    }

    #[test]
    fn try_preserves_resource_and_catch_order() {
        let mut ctx = TranslationContext::new();
        let try_stmt = ast::TryStmt {
            resources: vec![
                ast::ResourceDecl {
                    name: Some("a".to_string()),
                    code: "Reader a = open()".to_string(),
                    span: None,
                },
                ast::ResourceDecl {
                    name: Some("b".to_string()),
                    code: "Reader b = open()".to_string(),
                    span: None,
                },
            ],
            block: block(vec![]),
            catches: vec![
                ast::CatchDecl {
                    parameter: None,
                    body: block(vec![]),
                    span: None,
                    code: "catch (IOException e) {}".to_string(),
                },
                ast::CatchDecl {
                    parameter: None,
                    body: block(vec![]),
                    span: None,
                    code: "catch (RuntimeException e) {}".to_string(),
                },
            ],
            finally: None,
            span: None,
            code: String::new(),
        };

        let node = DefaultStatements.translate_try(&mut ctx, &try_stmt);
        let resources = node.resources.ordered();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].info().name, "a");
        assert_eq!(resources[1].info().name, "b");
        let catches = node.catch_clauses.ordered();
        assert_eq!(catches.len(), 2);
        assert!(
            catches[0]
                .info
                .code
                .as_deref()
                .is_some_and(|c| c.contains("IOException"))
        );
    }

    #[test]
    fn catch_parameter_has_a_type_origin() {
        let mut ctx = TranslationContext::new();
        let catch = ast::CatchDecl {
            parameter: Some(ast::ParamDecl {
                name: "e".to_string(),
                type_ref: ast::TypeRef {
                    text: "IOException".to_string(),
                    span: None,
                },
                is_variadic: false,
                span: None,
                code: "IOException e".to_string(),
            }),
            body: block(vec![]),
            span: None,
            code: String::new(),
        };
        let clause = DefaultStatements.translate_catch(&mut ctx, &catch);
        let param = clause.parameter.unwrap();
        assert_eq!(param.ty.origin, TypeOrigin::Guessed);
        assert_eq!(param.ty.name, "IOException");
    }
}
