//! Core library for the Vypr compiler.
//!
//! The pipeline runs in fixed stages, each consuming the previous stage's
//! product by value: `lexer` turns source text into tokens, `ast` parses
//! them into a `Program`, `analyzers::semantic` checks scopes and uses,
//! `ir` lowers the tree into labeled linear instructions, and `emit` renders
//! runnable Python. Every stage reports failures as `Box<dyn VyprErrorExt>`
//! and the first error aborts the pipeline.

pub mod analyzers;
pub mod ast;
pub mod emit;
pub mod error;
pub mod ir;
pub mod lexer;
pub mod script;

pub use error::{Level, Location, Span, VyprErrorExt};
pub use script::Script;

/// Compile source text all the way to Python. Convenience entry for callers
/// that do not need per-stage access; the CLI drives the stages itself so it
/// can dump intermediate results.
pub fn compile_to_python(script: &Script) -> Result<String, Box<dyn VyprErrorExt>> {
    let program = ast::generate_ast_from_source(script)?;
    analyzers::analyze_semantic_rules(&program)?;
    let functions = ir::lower_program(&program);
    emit::emit_python(&functions)
}
