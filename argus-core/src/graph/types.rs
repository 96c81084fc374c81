// Semantic type references with provenance.
//
// Every declaration that needs a type gets one — the translator degrades
// through resolver output, salvaged partial names, and raw source text, and
// the `origin` tag records which tier produced the result.

use serde::{Deserialize, Serialize};

// ── Provenance ────────────────────────────────────────────────────────

/// How confidently a type was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeOrigin {
    /// The symbol resolver produced a descriptor, or the name is a
    /// registered generic type parameter.
    Resolved,
    /// Recovered from partial information after a resolution failure.
    Guessed,
    /// No information was available at all.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// An ordinary object/primitive type reference.
    Object,
    /// A generic type parameter bound on an enclosing record.
    TypeParameter,
    /// A computed function signature type.
    Function,
    Unknown,
}

// ── Type ──────────────────────────────────────────────────────────────

/// A semantic type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Type {
    pub name: String,
    pub kind: TypeKind,
    pub origin: TypeOrigin,
}

/// Modifier keywords that may be joined into a type query for resolver
/// disambiguation; they are never part of the type name itself.
const MODIFIER_KEYWORDS: &[&str] = &[
    "public",
    "private",
    "protected",
    "static",
    "final",
    "abstract",
    "native",
    "synchronized",
    "transient",
    "volatile",
    "strictfp",
    "default",
];

/// Strip leading modifier keywords from a type query string, leaving the
/// declared type text (`"private static List<String>"` → `"List<String>"`).
pub fn strip_modifiers(text: &str) -> &str {
    let mut rest = text.trim();
    while let Some((first, tail)) = rest.split_once(char::is_whitespace) {
        if MODIFIER_KEYWORDS.contains(&first) {
            rest = tail.trim_start();
        } else {
            break;
        }
    }
    rest
}

impl Type {
    /// Build a type from textual or resolver-produced input, stripping any
    /// modifier keywords that were joined in for the resolver query.
    pub fn parse(text: &str, origin: TypeOrigin) -> Self {
        let name = text
            .split_whitespace()
            .filter(|token| !MODIFIER_KEYWORDS.contains(token))
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            return Self::unknown();
        }
        Self {
            name,
            kind: TypeKind::Object,
            origin,
        }
    }

    pub fn unknown() -> Self {
        Self {
            name: "UNKNOWN".to_string(),
            kind: TypeKind::Unknown,
            origin: TypeOrigin::Unknown,
        }
    }

    /// A generic type parameter binding (e.g. the `T` of `class A<T>`).
    pub fn type_parameter(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::TypeParameter,
            origin: TypeOrigin::Resolved,
        }
    }

    /// Compute a function signature type from ordered parameter types and
    /// return types. Deterministic: the same inputs always produce the same
    /// name, which downstream passes use for overload distinction.
    pub fn function(parameters: &[Type], returns: &[Type]) -> Self {
        let params = parameters
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let rets = returns
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(",");
        Self {
            name: format!("({params}){rets}"),
            kind: TypeKind::Function,
            origin: TypeOrigin::Resolved,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.kind == TypeKind::Unknown
    }
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_modifiers_keeps_generic_arguments() {
        assert_eq!(
            strip_modifiers("private static Map<String, Integer>"),
            "Map<String, Integer>"
        );
        assert_eq!(strip_modifiers("int"), "int");
        assert_eq!(strip_modifiers("  final  Widget "), "Widget");
    }

    #[test]
    fn parse_strips_modifiers() {
        let ty = Type::parse("private static final int", TypeOrigin::Resolved);
        assert_eq!(ty.name, "int");
        assert_eq!(ty.origin, TypeOrigin::Resolved);
    }

    #[test]
    fn parse_keeps_generic_arguments() {
        let ty = Type::parse("public List<String>", TypeOrigin::Guessed);
        assert_eq!(ty.name, "List<String>");
        assert_eq!(ty.origin, TypeOrigin::Guessed);
    }

    #[test]
    fn parse_all_modifiers_is_unknown() {
        let ty = Type::parse("public static", TypeOrigin::Resolved);
        assert!(ty.is_unknown());
        assert_eq!(ty.origin, TypeOrigin::Unknown);
    }

    #[test]
    fn function_type_is_deterministic() {
        let params = vec![
            Type::parse("int", TypeOrigin::Resolved),
            Type::type_parameter("T"),
        ];
        let returns = vec![Type::parse("int", TypeOrigin::Resolved)];
        let a = Type::function(&params, &returns);
        let b = Type::function(&params, &returns);
        assert_eq!(a, b);
        assert_eq!(a.name, "(int,T)int");
        assert_eq!(a.kind, TypeKind::Function);
    }

    #[test]
    fn zero_parameter_function_type() {
        let returns = vec![Type::parse("void", TypeOrigin::Resolved)];
        assert_eq!(Type::function(&[], &returns).name, "()void");
    }
}
