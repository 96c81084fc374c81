pub mod ast;
pub mod declarations;
pub mod parse;
pub mod resolver;
pub mod statements;

use std::path::Path;

use argus_core::TranslationContext;
use argus_core::graph::TranslationUnit;

pub use declarations::translate_unit;
pub use resolver::{NullResolver, SymbolResolver, UnitResolver};
pub use statements::{DefaultStatements, StatementTranslator};

/// Error type for the Java front end.
#[derive(thiserror::Error, Debug)]
pub enum TranslateError {
    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Scope error: {0}")]
    Scope(#[from] argus_core::ScopeError),

    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),
}

pub type Result<T> = std::result::Result<T, TranslateError>;

/// Parse and translate one Java source file with the default pipeline: the
/// unit-local resolver, the default statement translator, and a fresh
/// per-unit context.
pub fn translate_source(path: &Path, source: &str) -> Result<TranslationUnit> {
    let unit = parse::parse_source(path, source)?;
    let resolver = UnitResolver::from_unit(&unit);
    let statements = DefaultStatements;
    let mut ctx = TranslationContext::new();
    translate_unit(&mut ctx, &resolver, &statements, &unit, path)
}
