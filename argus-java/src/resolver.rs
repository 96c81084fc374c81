// The symbol resolver boundary.
//
// Resolution is a best-effort oracle: it either returns a descriptor or a
// `ResolveFailure` whose diagnostic sometimes carries enough text to
// salvage a partial type name. The translator never propagates a failure —
// it degrades through salvage and syntactic fallbacks instead.

use std::collections::HashSet;

use thiserror::Error;

use crate::ast;

// ── Resolution results ────────────────────────────────────────────────

/// A type descriptor produced by a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Canonical textual form of the type.
    pub describe: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMethod {
    pub name: String,
    pub return_type: ResolvedType,
}

/// A recoverable "unresolved symbol" condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unresolved symbol: {diagnostic}")]
pub struct ResolveFailure {
    diagnostic: String,
}

impl ResolveFailure {
    pub fn new(diagnostic: impl Into<String>) -> Self {
        Self {
            diagnostic: diagnostic.into(),
        }
    }

    pub fn diagnostic(&self) -> &str {
        &self.diagnostic
    }

    /// Best-effort recovery of a partial type name from the diagnostic.
    ///
    /// Resolvers that know which symbol they failed on phrase the
    /// diagnostic as `... : <name>`; anything after the last colon that
    /// still looks like a type name is salvageable.
    pub fn salvaged_type_name(&self) -> Option<String> {
        let (_, tail) = self.diagnostic.rsplit_once(':')?;
        let tail = tail.trim();
        let looks_like_type = !tail.is_empty()
            && tail.chars().all(|c| {
                c.is_alphanumeric() || matches!(c, '.' | '_' | '$' | '<' | '>' | '[' | ']' | ',')
            });
        looks_like_type.then(|| tail.to_string())
    }
}

// ── Resolver trait ────────────────────────────────────────────────────

pub trait SymbolResolver {
    /// Resolve a method declaration to its canonical name and return type.
    fn resolve_method(&self, method: &ast::MethodDecl) -> Result<ResolvedMethod, ResolveFailure>;

    /// Resolve a type from its (possibly modifier-qualified) textual form.
    fn resolve_type(&self, text: &str) -> Result<ResolvedType, ResolveFailure>;
}

// ── Null resolver ─────────────────────────────────────────────────────

/// A resolver that always fails, with nothing salvageable. Every
/// translation falls through to the syntactic tier.
#[derive(Debug, Default)]
pub struct NullResolver;

impl SymbolResolver for NullResolver {
    fn resolve_method(&self, _method: &ast::MethodDecl) -> Result<ResolvedMethod, ResolveFailure> {
        Err(ResolveFailure::new("symbol resolution is unavailable"))
    }

    fn resolve_type(&self, _text: &str) -> Result<ResolvedType, ResolveFailure> {
        Err(ResolveFailure::new("symbol resolution is unavailable"))
    }
}

// ── Unit-local resolver ───────────────────────────────────────────────

const PRIMITIVES: &[&str] = &[
    "void", "boolean", "byte", "short", "int", "long", "char", "float", "double",
];

const JAVA_LANG: &[&str] = &[
    "Object",
    "String",
    "Integer",
    "Long",
    "Short",
    "Byte",
    "Character",
    "Boolean",
    "Float",
    "Double",
    "Number",
    "CharSequence",
    "StringBuilder",
    "Iterable",
    "Runnable",
    "Thread",
    "Throwable",
    "Exception",
    "RuntimeException",
    "Error",
];

/// Resolves primitives, `java.lang` staples, and types declared in the same
/// compilation unit. Anything else fails with a diagnostic that names the
/// offending symbol, so salvage can recover it.
#[derive(Debug)]
pub struct UnitResolver {
    known: HashSet<String>,
}

impl UnitResolver {
    pub fn from_unit(unit: &ast::CompilationUnit) -> Self {
        let mut known: HashSet<String> = PRIMITIVES
            .iter()
            .chain(JAVA_LANG)
            .map(|s| (*s).to_string())
            .collect();
        for decl in &unit.types {
            collect_declared(decl, &mut known);
        }
        Self { known }
    }

    /// Drop any modifier prefix and reduce the text to the declared type,
    /// e.g. `"private static List<String>"` → `"List<String>"`.
    fn base_type(text: &str) -> &str {
        argus_core::graph::types::strip_modifiers(text)
    }

    /// The erasure used for lookup: generics, array brackets, and variadic
    /// markers stripped.
    fn erasure(base: &str) -> &str {
        let base = base.split('<').next().unwrap_or(base);
        base.trim_end_matches("...").trim_end_matches("[]")
    }
}

fn collect_declared(decl: &ast::MemberDecl, known: &mut HashSet<String>) {
    match decl {
        ast::MemberDecl::Record(record) => {
            known.insert(record.name.clone());
            for member in &record.members {
                collect_declared(member, known);
            }
        }
        ast::MemberDecl::Enum(decl) => {
            known.insert(decl.name.clone());
        }
        _ => {}
    }
}

impl SymbolResolver for UnitResolver {
    fn resolve_method(&self, method: &ast::MethodDecl) -> Result<ResolvedMethod, ResolveFailure> {
        let return_type = self.resolve_type(&method.return_type.text)?;
        Ok(ResolvedMethod {
            name: method.name.clone(),
            return_type,
        })
    }

    fn resolve_type(&self, text: &str) -> Result<ResolvedType, ResolveFailure> {
        let base = Self::base_type(text);
        if self.known.contains(Self::erasure(base)) {
            Ok(ResolvedType {
                describe: base.to_string(),
            })
        } else {
            Err(ResolveFailure::new(format!("Unsolved symbol : {base}")))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
