// The declaration translator.
//
// Walks declaration-shaped AST nodes top-down and produces graph nodes,
// correctly nested in the scope stack, with best-effort type resolution.
// On the way out it synthesizes what a queryable graph needs but source
// does not spell out: default constructors, trailing returns, and the
// `Outer.this` field for nested classes.
//
// Resolution failures never abort translation; they degrade to guessed or
// unknown types. Only scope-pairing violations (translator bugs) are fatal
// for the unit.

use std::path::Path;

use tracing::{debug, warn};

use argus_core::graph::{
    BlockStatement, ConstructorNode, Declaration, EnumConstantNode, EnumNode, Expression,
    FieldNode, MethodNode, NodeInfo, OrderedEdges, ParameterNode, ProblemKind, ProblemNode,
    RecordKind, RecordNode, ReturnStatement, Statement, TranslationUnit, Type, TypeOrigin,
};
use argus_core::{ScopeAnchor, ScopeKind, TranslationContext};

use crate::Result;
use crate::ast;
use crate::resolver::SymbolResolver;
use crate::statements::StatementTranslator;

const NAMESPACE_DELIMITER: &str = ".";

/// Translate one parsed compilation unit into its graph root.
///
/// The unit always translates: per-declaration failures degrade to problem
/// placeholders or guessed types rather than propagating.
pub fn translate_unit(
    ctx: &mut TranslationContext,
    resolver: &dyn SymbolResolver,
    statements: &dyn StatementTranslator,
    unit: &ast::CompilationUnit,
    path: &Path,
) -> Result<TranslationUnit> {
    let mut translator = DeclarationTranslator {
        ctx,
        resolver,
        statements,
        unit,
    };
    translator.run(path)
}

struct DeclarationTranslator<'a> {
    ctx: &'a mut TranslationContext,
    resolver: &'a dyn SymbolResolver,
    statements: &'a dyn StatementTranslator,
    unit: &'a ast::CompilationUnit,
}

impl DeclarationTranslator<'_> {
    fn run(&mut self, path: &Path) -> Result<TranslationUnit> {
        let package = self.unit.package.clone().unwrap_or_default();
        let root_id = self.ctx.fresh_id();
        let anchor = ScopeAnchor {
            id: root_id,
            kind: ScopeKind::Namespace,
            simple_name: package.clone(),
            qualified_name: package,
        };

        let declarations = self.scoped(anchor, |this| {
            let unit = this.unit;
            let mut out = Vec::new();
            for decl in &unit.types {
                match decl {
                    ast::MemberDecl::Record(record) => {
                        out.push(Declaration::Record(this.translate_record(record)?));
                    }
                    ast::MemberDecl::Enum(decl) => {
                        out.push(Declaration::Enum(this.translate_enum(decl)));
                    }
                    ast::MemberDecl::Annotation(decl) => {
                        out.push(Declaration::Problem(this.translate_annotation(decl)));
                    }
                    ast::MemberDecl::Method(_)
                    | ast::MemberDecl::Constructor(_)
                    | ast::MemberDecl::Field(_)
                    | ast::MemberDecl::Initializer(_) => {
                        debug!("skipping top-level member with no unit-level translation rule");
                    }
                }
            }
            Ok(out)
        })?;

        Ok(TranslationUnit {
            file_path: path.to_path_buf(),
            package: self.unit.package.clone(),
            declarations,
        })
    }

    /// Run `f` inside a scope anchored at `anchor`. The scope is left on
    /// every path out of `f`, so early returns cannot unbalance the stack.
    fn scoped<T>(
        &mut self,
        anchor: ScopeAnchor,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let anchor_id = anchor.id;
        self.ctx.scopes.enter(anchor);
        let out = f(self);
        let left = self.ctx.scopes.leave(anchor_id);
        let value = out?;
        left?;
        Ok(value)
    }

    fn qualified(&self, name: &str) -> String {
        let prefix = self.ctx.scopes.current_name_prefix(NAMESPACE_DELIMITER);
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}{NAMESPACE_DELIMITER}{name}")
        }
    }

    /// Tiered type resolution: resolver descriptor, then a name salvaged
    /// from the failure diagnostic, then the raw source text. Always
    /// produces a type with a provenance tag.
    fn type_as_good_as_possible(&self, text: &str) -> Type {
        match self.resolver.resolve_type(text) {
            Ok(resolved) => Type::parse(&resolved.describe, TypeOrigin::Resolved),
            Err(failure) => match failure.salvaged_type_name() {
                Some(salvaged) => Type::parse(&salvaged, TypeOrigin::Guessed),
                None => Type::parse(text, TypeOrigin::Guessed),
            },
        }
    }

    // ── Records ───────────────────────────────────────────────────────

    fn translate_record(&mut self, decl: &ast::RecordDecl) -> Result<RecordNode> {
        let fqn = self.qualified(&decl.name);
        let id = self.ctx.fresh_id();
        let info = NodeInfo::new(id, &decl.name, &fqn)
            .with_code(&decl.code)
            .with_location(decl.span)
            .with_modifiers(decl.modifiers.iter().cloned());
        self.ctx.scopes.add_declaration(&decl.name, id);

        let super_types = OrderedEdges::from_children(
            decl.extends
                .iter()
                .map(|t| self.type_as_good_as_possible(&t.text))
                .collect::<Vec<_>>(),
        );
        let implemented_interfaces = OrderedEdges::from_children(
            decl.implements
                .iter()
                .map(|t| self.type_as_good_as_possible(&t.text))
                .collect::<Vec<_>>(),
        );

        self.ctx
            .registry
            .add_type_parameters(&fqn, decl.type_parameters.clone());

        // partition the unit's imports; wildcard imports keep their `.*`
        let mut import_statements = Vec::new();
        let mut static_import_statements = Vec::new();
        for import in &self.unit.imports {
            let name = if import.is_wildcard {
                format!("{}.*", import.path)
            } else {
                import.path.clone()
            };
            if import.is_static {
                static_import_statements.push(name);
            } else {
                import_statements.push(name);
            }
        }

        let mut record = RecordNode {
            info,
            kind: if decl.is_interface {
                RecordKind::Interface
            } else {
                RecordKind::Class
            },
            super_types,
            implemented_interfaces,
            type_parameters: decl.type_parameters.clone(),
            import_statements,
            static_import_statements,
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            members: Vec::new(),
            statements: Vec::new(),
        };

        let anchor = ScopeAnchor {
            id,
            kind: ScopeKind::Record,
            simple_name: decl.name.clone(),
            qualified_name: fqn.clone(),
        };

        self.scoped(anchor.clone(), |this| {
            for member in &decl.members {
                match member {
                    ast::MemberDecl::Field(field) => {
                        if let Some(node) = this.translate_field(field) {
                            record.fields.push(node);
                        }
                    }
                    ast::MemberDecl::Method(method) => {
                        record.methods.push(this.translate_method(method)?);
                    }
                    ast::MemberDecl::Constructor(ctor) => {
                        record.constructors.push(this.translate_constructor(ctor)?);
                    }
                    ast::MemberDecl::Record(nested) => {
                        record
                            .members
                            .push(Declaration::Record(this.translate_record(nested)?));
                    }
                    ast::MemberDecl::Enum(nested) => {
                        record
                            .members
                            .push(Declaration::Enum(this.translate_enum(nested)));
                    }
                    ast::MemberDecl::Initializer(init) => {
                        let mut block = this.statements.translate_block(this.ctx, &init.body);
                        block.static_block = init.is_static;
                        record.statements.push(Statement::Block(block));
                    }
                    ast::MemberDecl::Annotation(decl) => {
                        record
                            .members
                            .push(Declaration::Problem(this.translate_annotation(decl)));
                    }
                }
            }

            // every record owns at least one constructor
            if record.constructors.is_empty() {
                let ctor = this.synthesize_default_constructor(&decl.name, &fqn);
                record.constructors.push(ctor);
            }
            Ok(())
        })?;

        // An inner class stores a reference to its outer class so methods
        // can use a qualified this (Outer.this.someField), the same way the
        // Java compiler does. The reference is an implicit field, inserted
        // with a transient re-entry into the inner record's scope.
        if let Some(outer) = self
            .ctx
            .scopes
            .current_anchor()
            .filter(|a| a.kind == ScopeKind::Record)
            .cloned()
        {
            let field = self.synthesize_outer_this_field(&outer, &fqn);
            self.ctx.scopes.enter(anchor);
            self.ctx.scopes.add_declaration(&field.info.name, field.info.id);
            self.ctx.scopes.leave(id)?;
            record.fields.push(field);
        }

        Ok(record)
    }

    fn synthesize_default_constructor(&mut self, name: &str, record_fqn: &str) -> ConstructorNode {
        let id = self.ctx.fresh_id();
        let info = NodeInfo::new(
            id,
            name,
            format!("{record_fqn}{NAMESPACE_DELIMITER}{name}"),
        )
        .implicit();
        self.ctx.scopes.add_declaration(name, id);

        let mut body = BlockStatement {
            info: NodeInfo::anonymous(self.ctx.fresh_id()).implicit(),
            statements: Vec::new(),
            static_block: false,
        };
        self.ensure_trailing_return(&mut body);

        ConstructorNode {
            info,
            receiver: None,
            parameters: OrderedEdges::new(),
            throw_types: OrderedEdges::new(),
            ty: Type::parse(record_fqn, TypeOrigin::Resolved),
            body: Statement::Block(body),
        }
    }

    fn synthesize_outer_this_field(&mut self, outer: &ScopeAnchor, inner_fqn: &str) -> FieldNode {
        let name = format!("{}.this", outer.simple_name);
        let id = self.ctx.fresh_id();
        let info = NodeInfo::new(id, &name, format!("{inner_fqn}{NAMESPACE_DELIMITER}{name}"))
            .implicit();
        FieldNode {
            info,
            ty: Type::parse(&outer.qualified_name, TypeOrigin::Resolved),
            initializer: None,
        }
    }

    // ── Methods and constructors ──────────────────────────────────────

    fn translate_method(&mut self, decl: &ast::MethodDecl) -> Result<MethodNode> {
        let resolved = self.resolver.resolve_method(decl);
        if let Err(failure) = &resolved {
            debug!(
                method = %decl.name,
                %failure,
                "method resolution failed; degrading to syntactic translation"
            );
        }
        let name = resolved
            .as_ref()
            .map_or_else(|_| decl.name.clone(), |r| r.name.clone());

        let enclosing_record = self.ctx.scopes.current_record().cloned();
        let id = self.ctx.fresh_id();
        let qualified = self.qualified(&name);
        let info = NodeInfo::new(id, &name, &qualified)
            .with_code(&decl.code)
            .with_location(decl.span)
            .with_modifiers(decl.modifiers.iter().cloned());
        self.ctx.scopes.add_declaration(&name, id);

        let anchor = ScopeAnchor {
            id,
            kind: ScopeKind::Function,
            simple_name: name,
            qualified_name: qualified,
        };
        self.scoped(anchor, |this| {
            let receiver = this.create_receiver(enclosing_record.as_ref());

            let throw_types = OrderedEdges::from_children(
                decl.throws
                    .iter()
                    .map(|t| this.type_as_good_as_possible(&t.text))
                    .collect::<Vec<_>>(),
            );

            let mut parameters = Vec::new();
            for param in &decl.parameters {
                parameters.push(this.translate_parameter(enclosing_record.as_ref(), param));
            }

            let return_types = vec![match &resolved {
                Ok(r) => Type::parse(&r.return_type.describe, TypeOrigin::Resolved),
                Err(_) => this.type_as_good_as_possible(&decl.return_type.text),
            }];

            let param_types: Vec<Type> = parameters.iter().map(|p| p.ty.clone()).collect();
            let function_type = Type::function(&param_types, &return_types);

            // bodiless (abstract/interface) methods get no implicit return
            let body = match &decl.body {
                None => None,
                Some(block) => {
                    let mut translated = this.statements.translate_block(this.ctx, block);
                    this.ensure_trailing_return(&mut translated);
                    Some(Statement::Block(translated))
                }
            };

            Ok(MethodNode {
                info,
                is_static: decl.is_static(),
                receiver: Some(receiver),
                parameters: OrderedEdges::from_children(parameters),
                throw_types,
                return_types,
                function_type,
                body,
            })
        })
    }

    fn translate_constructor(&mut self, decl: &ast::ConstructorDecl) -> Result<ConstructorNode> {
        let enclosing_record = self.ctx.scopes.current_record().cloned();
        let id = self.ctx.fresh_id();
        let qualified = self.qualified(&decl.name);
        let info = NodeInfo::new(id, &decl.name, &qualified)
            .with_code(&decl.code)
            .with_location(decl.span)
            .with_modifiers(decl.modifiers.iter().cloned());
        self.ctx.scopes.add_declaration(&decl.name, id);

        let anchor = ScopeAnchor {
            id,
            kind: ScopeKind::Function,
            simple_name: decl.name.clone(),
            qualified_name: qualified,
        };
        self.scoped(anchor, |this| {
            let receiver = this.create_receiver(enclosing_record.as_ref());

            let throw_types = OrderedEdges::from_children(
                decl.throws
                    .iter()
                    .map(|t| this.type_as_good_as_possible(&t.text))
                    .collect::<Vec<_>>(),
            );

            let mut parameters = Vec::new();
            for param in &decl.parameters {
                parameters.push(this.translate_parameter(enclosing_record.as_ref(), param));
            }

            // a constructor's own type is the nearest enclosing record's
            let ty = this
                .ctx
                .scopes
                .first_scope_matching(|a| a.kind == ScopeKind::Record)
                .map_or_else(Type::unknown, |r| {
                    Type::parse(&r.qualified_name, TypeOrigin::Resolved)
                });

            let mut body = this.statements.translate_block(this.ctx, &decl.body);
            // constructors always get a trailing return
            this.ensure_trailing_return(&mut body);

            Ok(ConstructorNode {
                info,
                receiver: Some(receiver),
                parameters: OrderedEdges::from_children(parameters),
                throw_types,
                ty,
                body: Statement::Block(body),
            })
        })
    }

    /// The `this` receiver, registered in the function scope. Always
    /// created; its type degrades to unknown outside a record.
    fn create_receiver(&mut self, record: Option<&ScopeAnchor>) -> ParameterNode {
        let ty = record.map_or_else(Type::unknown, |r| {
            Type::parse(&r.qualified_name, TypeOrigin::Resolved)
        });
        let id = self.ctx.fresh_id();
        let info = NodeInfo::new(id, "this", "this").with_code("this").implicit();
        self.ctx.scopes.add_declaration("this", id);
        ParameterNode {
            info,
            ty,
            is_variadic: false,
        }
    }

    /// A declared parameter. An explicit generic type parameter on the
    /// enclosing record wins over the general resolver.
    fn translate_parameter(
        &mut self,
        record: Option<&ScopeAnchor>,
        param: &ast::ParamDecl,
    ) -> ParameterNode {
        let ty = record
            .and_then(|r| {
                self.ctx
                    .registry
                    .type_parameter(&r.qualified_name, &param.type_ref.text)
            })
            .unwrap_or_else(|| self.type_as_good_as_possible(&param.type_ref.text));

        let id = self.ctx.fresh_id();
        let info = NodeInfo::new(id, &param.name, &param.name)
            .with_code(&param.code)
            .with_location(param.span);
        self.ctx.scopes.add_declaration(&param.name, id);

        ParameterNode {
            info,
            ty,
            is_variadic: param.is_variadic,
        }
    }

    /// Append an implicit `return` unless the block already ends with one,
    /// so every body has a single well-defined syntactic exit.
    fn ensure_trailing_return(&mut self, block: &mut BlockStatement) {
        if block.statements.last().is_some_and(Statement::is_return) {
            return;
        }
        block.statements.push(Statement::Return(ReturnStatement {
            info: NodeInfo::anonymous(self.ctx.fresh_id()).implicit(),
            value: None,
        }));
    }

    // ── Fields ────────────────────────────────────────────────────────

    fn translate_field(&mut self, decl: &ast::FieldDecl) -> Option<FieldNode> {
        // TODO: emit one field node per declarator, keyed by declarator
        // span, once downstream passes stop assuming one field per
        // declaration.
        let variable = decl.variables.first()?;
        if decl.variables.len() > 1 {
            debug!(
                field = %variable.name,
                dropped = decl.variables.len() - 1,
                "multi-variable field declaration: translating first declarator only"
            );
        }

        let mut joined_modifiers = decl.modifiers.join(" ");
        if !joined_modifiers.is_empty() {
            joined_modifiers.push(' ');
        }
        // modifiers are joined into the query; some resolvers disambiguate
        // on them (array and varargs markers)
        let query = format!("{joined_modifiers}{}", decl.type_ref.text);

        let record = self.ctx.scopes.current_record().cloned();
        let ty = match record.as_ref().and_then(|r| {
            self.ctx
                .registry
                .type_parameter(&r.qualified_name, &decl.type_ref.text)
        }) {
            Some(bound) => bound,
            None => match self.resolver.resolve_type(&query) {
                Ok(resolved) => Type::parse(&resolved.describe, TypeOrigin::Resolved),
                Err(failure) => match failure.salvaged_type_name() {
                    Some(salvaged) => {
                        debug!(
                            field = %variable.name,
                            %salvaged,
                            "recovered field type from resolver diagnostic"
                        );
                        Type::parse(
                            &format!("{joined_modifiers}{salvaged}"),
                            TypeOrigin::Guessed,
                        )
                    }
                    None => {
                        warn!(
                            field = %variable.name,
                            "could not resolve field type; falling back to source text"
                        );
                        Type::parse(&query, TypeOrigin::Guessed)
                    }
                },
            },
        };

        let id = self.ctx.fresh_id();
        let info = NodeInfo::new(id, &variable.name, self.qualified(&variable.name))
            .with_code(&variable.code)
            .with_location(decl.span)
            .with_modifiers(decl.modifiers.iter().cloned());
        self.ctx.scopes.add_declaration(&variable.name, id);

        Some(FieldNode {
            info,
            ty,
            initializer: variable.initializer.as_ref().map(|init| Expression {
                code: init.code.clone(),
                location: init.span,
            }),
        })
    }

    // ── Enums ─────────────────────────────────────────────────────────

    fn translate_enum(&mut self, decl: &ast::EnumDecl) -> EnumNode {
        let fqn = self.qualified(&decl.name);
        let id = self.ctx.fresh_id();
        let info = NodeInfo::new(id, &decl.name, &fqn)
            .with_code(&decl.code)
            .with_location(decl.span)
            .with_modifiers(decl.modifiers.iter().cloned());
        self.ctx.scopes.add_declaration(&decl.name, id);

        let mut entries: Vec<EnumConstantNode> = decl
            .constants
            .iter()
            .map(|constant| {
                let cid = self.ctx.fresh_id();
                EnumConstantNode {
                    info: NodeInfo::new(
                        cid,
                        &constant.name,
                        format!("{fqn}{NAMESPACE_DELIMITER}{}", constant.name),
                    )
                    .with_code(&constant.code)
                    .with_location(constant.span),
                    ty: Type::unknown(),
                }
            })
            .collect();

        // constants take the enum's own type, assigned after the fact
        let own_type = Type::parse(&fqn, TypeOrigin::Resolved);
        for entry in &mut entries {
            entry.ty = own_type.clone();
        }

        let implemented_interfaces = OrderedEdges::from_children(
            decl.implements
                .iter()
                .map(|t| self.type_as_good_as_possible(&t.text))
                .collect::<Vec<_>>(),
        );

        EnumNode {
            info,
            entries,
            implemented_interfaces,
        }
    }

    // ── Unsupported constructs ────────────────────────────────────────

    fn translate_annotation(&mut self, decl: &ast::AnnotationDecl) -> ProblemNode {
        debug!(name = %decl.name, "annotation declarations are not translated yet");
        let id = self.ctx.fresh_id();
        ProblemNode {
            info: NodeInfo::new(id, &decl.name, self.qualified(&decl.name))
                .with_code(&decl.code)
                .with_location(decl.span),
            message: format!("annotation declaration `{}` is not supported yet", decl.name),
            problem: ProblemKind::TranslationUnsupported,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_source;
    use crate::resolver::{NullResolver, UnitResolver};
    use crate::statements::DefaultStatements;
    use argus_core::graph::TypeKind;

    fn translate(source: &str) -> TranslationUnit {
        crate::translate_source(Path::new("Test.java"), source).unwrap()
    }

    fn first_record(unit: &TranslationUnit) -> &RecordNode {
        match unit.declarations.first() {
            Some(Declaration::Record(record)) => record,
            other => panic!("expected a record, got: {other:?}"),
        }
    }

    fn body_statements(body: &Statement) -> &[Statement] {
        match body {
            Statement::Block(block) => &block.statements,
            other => panic!("expected a block body, got: {other:?}"),
        }
    }

    #[test]
    fn scope_depth_returns_to_zero() {
        let source = "class Outer {\n    class Inner {\n        void run() {}\n    }\n    int f(int x) { return x; }\n}\n";
        let unit = parse_source(Path::new("Test.java"), source).unwrap();
        let resolver = UnitResolver::from_unit(&unit);
        let mut ctx = TranslationContext::new();
        translate_unit(
            &mut ctx,
            &resolver,
            &DefaultStatements,
            &unit,
            Path::new("Test.java"),
        )
        .unwrap();
        assert_eq!(ctx.scopes.depth(), 0);
    }

    #[test]
    fn default_constructor_is_synthesized() {
        let unit = translate("class A {}\n");
        let record = first_record(&unit);
        assert_eq!(record.constructors.len(), 1);
        let ctor = &record.constructors[0];
        assert!(ctor.info.implicit);
        assert!(ctor.parameters.is_empty());
        assert_eq!(ctor.ty.name, "A");
    }

    #[test]
    fn source_constructor_suppresses_synthesis() {
        let unit = translate("class A {\n    A(int x) {}\n}\n");
        let record = first_record(&unit);
        assert_eq!(record.constructors.len(), 1);
        let ctor = &record.constructors[0];
        assert!(!ctor.info.implicit);
        assert_eq!(ctor.parameters.len(), 1);
    }

    #[test]
    fn implicit_return_appended_when_missing() {
        let unit = translate("class A {\n    void f() {\n        g();\n    }\n}\n");
        let record = first_record(&unit);
        let body = record.methods[0].body.as_ref().unwrap();
        let statements = body_statements(body);
        assert_eq!(statements.len(), 2);
        let last = statements.last().unwrap();
        assert!(last.is_return());
        assert!(last.info().implicit);
    }

    #[test]
    fn existing_trailing_return_is_kept() {
        let unit = translate("class A {\n    int f() {\n        return 1;\n    }\n}\n");
        let record = first_record(&unit);
        let body = record.methods[0].body.as_ref().unwrap();
        let statements = body_statements(body);
        assert_eq!(statements.len(), 1);
        assert!(!statements[0].info().implicit);
    }

    #[test]
    fn bodiless_method_gets_no_return() {
        let unit = translate("interface R {\n    void run();\n}\n");
        let record = first_record(&unit);
        assert_eq!(record.kind, RecordKind::Interface);
        assert!(record.methods[0].body.is_none());
    }

    #[test]
    fn constructor_always_gets_trailing_return() {
        let unit = translate("class A {\n    A() {\n        init();\n    }\n}\n");
        let record = first_record(&unit);
        let statements = body_statements(&record.constructors[0].body);
        assert_eq!(statements.len(), 2);
        assert!(statements.last().unwrap().is_return());
    }

    #[test]
    fn receiver_is_always_created() {
        let unit = translate("class A {\n    static void f() {}\n    void g() {}\n}\n");
        let record = first_record(&unit);
        for method in &record.methods {
            let receiver = method.receiver.as_ref().unwrap();
            assert_eq!(receiver.info.name, "this");
            assert!(receiver.info.implicit);
            assert_eq!(receiver.ty.name, "A");
            assert_eq!(receiver.ty.origin, TypeOrigin::Resolved);
        }
        assert!(record.methods.iter().any(|m| m.is_static));
    }

    #[test]
    fn nested_class_gets_outer_this_field() {
        let unit = translate("class Outer {\n    class Inner {}\n}\n");
        let outer = first_record(&unit);
        assert!(outer.fields.is_empty(), "outer record must not get a this field");

        let Some(Declaration::Record(inner)) = outer.members.first() else {
            panic!("expected nested record, got: {:?}", outer.members);
        };
        assert_eq!(inner.fields.len(), 1);
        let field = &inner.fields[0];
        assert_eq!(field.info.name, "Outer.this");
        assert!(field.info.implicit);
        assert_eq!(field.ty.name, "Outer");
    }

    #[test]
    fn generic_end_to_end() {
        let unit =
            translate("class A<T> {\n    A() {}\n    int f(T x) {\n        return 1;\n    }\n}\n");
        let record = first_record(&unit);
        assert_eq!(record.type_parameters, vec!["T"]);

        // constructor: implicit trailing return appended to the empty body
        assert_eq!(record.constructors.len(), 1);
        let ctor_statements = body_statements(&record.constructors[0].body);
        assert_eq!(ctor_statements.len(), 1);
        assert!(ctor_statements[0].is_return());
        assert!(ctor_statements[0].info().implicit);

        // method: parameter bound to the type parameter, not resolver text
        let method = &record.methods[0];
        let params = method.parameters.ordered();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].info.name, "x");
        assert_eq!(params[0].ty.name, "T");
        assert_eq!(params[0].ty.kind, TypeKind::TypeParameter);
        assert_eq!(params[0].ty.origin, TypeOrigin::Resolved);

        assert_eq!(method.return_types[0].name, "int");
        assert_eq!(method.return_types[0].origin, TypeOrigin::Resolved);
        assert_eq!(method.function_type.name, "(T)int");

        let receiver = method.receiver.as_ref().unwrap();
        assert_eq!(receiver.ty.name, "A");
    }

    #[test]
    fn annotation_becomes_a_problem_node() {
        let unit = translate("@interface Marker {}\n");
        let Some(Declaration::Problem(problem)) = unit.declarations.first() else {
            panic!("expected a problem node, got: {:?}", unit.declarations);
        };
        assert!(!problem.message.is_empty());
        assert_eq!(problem.problem, ProblemKind::TranslationUnsupported);
    }

    #[test]
    fn imports_partitioned_with_wildcards_preserved() {
        let unit = translate(
            "import java.util.List;\nimport java.io.*;\nimport static java.lang.Math.max;\nimport static java.util.Collections.*;\nclass A {}\n",
        );
        let record = first_record(&unit);
        assert_eq!(
            record.import_statements,
            vec!["java.util.List".to_string(), "java.io.*".to_string()]
        );
        assert_eq!(
            record.static_import_statements,
            vec![
                "java.lang.Math.max".to_string(),
                "java.util.Collections.*".to_string()
            ]
        );
    }

    #[test]
    fn initializer_blocks_keep_static_flag() {
        let unit = translate("class A {\n    static { setup(); }\n    { init(); }\n}\n");
        let record = first_record(&unit);
        assert_eq!(record.statements.len(), 2);
        let Statement::Block(first) = &record.statements[0] else {
            panic!("expected a block");
        };
        assert!(first.static_block);
        let Statement::Block(second) = &record.statements[1] else {
            panic!("expected a block");
        };
        assert!(!second.static_block);
    }

    #[test]
    fn field_type_tiers() {
        // resolved: primitive; guessed via salvage: unknown type name
        let unit = translate("class A {\n    int known;\n    Widget guessed;\n}\n");
        let record = first_record(&unit);
        assert_eq!(record.fields[0].ty.origin, TypeOrigin::Resolved);
        assert_eq!(record.fields[0].ty.name, "int");
        assert_eq!(record.fields[1].ty.origin, TypeOrigin::Guessed);
        assert_eq!(record.fields[1].ty.name, "Widget");
    }

    #[test]
    fn generic_field_binds_type_parameter() {
        let unit = translate("class Box<T> {\n    T value;\n}\n");
        let record = first_record(&unit);
        assert_eq!(record.fields[0].ty.kind, TypeKind::TypeParameter);
        assert_eq!(record.fields[0].ty.name, "T");
    }

    #[test]
    fn null_resolver_still_produces_tagged_types() {
        let source = "class A {\n    int f(String s) {\n        return 1;\n    }\n    Widget w;\n}\n";
        let unit = parse_source(Path::new("Test.java"), source).unwrap();
        let mut ctx = TranslationContext::new();
        let translated = translate_unit(
            &mut ctx,
            &NullResolver,
            &DefaultStatements,
            &unit,
            Path::new("Test.java"),
        )
        .unwrap();
        let record = first_record(&translated);

        // nothing resolves, but every type still carries a provenance tag
        let method = &record.methods[0];
        assert_eq!(method.return_types[0].origin, TypeOrigin::Guessed);
        for param in method.parameters.ordered() {
            assert_eq!(param.ty.origin, TypeOrigin::Guessed);
        }
        assert_eq!(record.fields[0].ty.origin, TypeOrigin::Guessed);
        assert_eq!(record.fields[0].ty.name, "Widget");
    }

    #[test]
    fn multi_variable_field_translates_first_only() {
        let unit = translate("class A {\n    int a, b;\n}\n");
        let record = first_record(&unit);
        assert_eq!(record.fields.len(), 1);
        assert_eq!(record.fields[0].info.name, "a");
    }

    #[test]
    fn field_initializer_is_carried() {
        let unit = translate("class A {\n    int x = 41 + 1;\n}\n");
        let record = first_record(&unit);
        assert_eq!(
            record.fields[0].initializer.as_ref().map(|e| e.code.as_str()),
            Some("41 + 1")
        );
    }

    #[test]
    fn package_prefix_qualifies_names() {
        let unit = translate("package com.example;\nclass Foo {\n    int x;\n}\n");
        assert_eq!(unit.package.as_deref(), Some("com.example"));
        let record = first_record(&unit);
        assert_eq!(record.info.qualified_name, "com.example.Foo");
        assert_eq!(record.fields[0].info.qualified_name, "com.example.Foo.x");
    }

    #[test]
    fn enum_constants_take_enum_type() {
        let unit = translate("enum Color implements Paintable { RED, GREEN }\n");
        let Some(Declaration::Enum(decl)) = unit.declarations.first() else {
            panic!("expected an enum, got: {:?}", unit.declarations);
        };
        assert_eq!(decl.entries.len(), 2);
        for entry in &decl.entries {
            assert_eq!(entry.ty.name, "Color");
        }
        assert_eq!(decl.entries[0].info.qualified_name, "Color.RED");
        assert_eq!(decl.implemented_interfaces.len(), 1);
    }

    #[test]
    fn supertypes_and_interfaces_in_source_order() {
        let unit = translate("class A extends Base implements First, Second {}\n");
        let record = first_record(&unit);
        let supers: Vec<_> = record.super_types.ordered();
        assert_eq!(supers.len(), 1);
        assert_eq!(supers[0].name, "Base");
        let interfaces: Vec<_> = record
            .implemented_interfaces
            .ordered()
            .into_iter()
            .map(|t| t.name.clone())
            .collect();
        assert_eq!(interfaces, vec!["First", "Second"]);
    }

    #[test]
    fn throw_types_keep_declaration_order() {
        let unit = translate(
            "class A {\n    void f() throws Exception, RuntimeException {\n    }\n}\n",
        );
        let record = first_record(&unit);
        let throws: Vec<_> = record.methods[0]
            .throw_types
            .ordered()
            .into_iter()
            .map(|t| t.name.clone())
            .collect();
        assert_eq!(throws, vec!["Exception", "RuntimeException"]);
    }

    #[test]
    fn parameters_keep_declaration_order() {
        let unit = translate("class A {\n    void f(int first, String second, long third) {}\n}\n");
        let record = first_record(&unit);
        let names: Vec<_> = record.methods[0]
            .parameters
            .ordered()
            .into_iter()
            .map(|p| p.info.name.clone())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn declarations_registered_in_active_scope() {
        let source = "class A {\n    int field;\n    void f(int param) {}\n}\n";
        let unit = parse_source(Path::new("Test.java"), source).unwrap();
        let resolver = UnitResolver::from_unit(&unit);
        let mut ctx = TranslationContext::new();
        let translated = translate_unit(
            &mut ctx,
            &resolver,
            &DefaultStatements,
            &unit,
            Path::new("Test.java"),
        )
        .unwrap();

        let record = first_record(&translated);
        let record_symbols = ctx.scopes.symbols_of(record.info.id).unwrap();
        assert!(record_symbols.contains_key("field"));
        assert!(record_symbols.contains_key("f"));

        let method = &record.methods[0];
        let method_symbols = ctx.scopes.symbols_of(method.info.id).unwrap();
        assert!(method_symbols.contains_key("param"));
        assert!(method_symbols.contains_key("this"));
        assert!(!method_symbols.contains_key("field"));
    }
}
