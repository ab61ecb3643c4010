//! file: cli/src/output.rs
//! description: rendering helpers for CLI diagnostics.
//!
//! Verbose mode prints each pipeline stage under a styled banner; the same
//! renderers back the `--dump` flag, which writes the listing to a file
//! instead of the terminal.

use console::style;
use vypr_core::ast::Program;
use vypr_core::ir::IrFunction;
use vypr_core::lexer::token::Token;

/// Print a stage banner, e.g. `=== Lexical Analysis ===`.
pub fn stage(title: &str) {
    println!("\n=== {} ===", style(title).cyan().bold());
}

/// Indexed token listing, one token per line.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = format!("Tokens found ({}):\n", tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        out.push_str(&format!("  {}: {}\n", i, token));
    }
    out
}

/// The indented AST tree.
pub fn render_ast(program: &Program) -> String {
    format!("Abstract Syntax Tree:\n{}", program)
}

/// Per-function IR listing with instruction indices.
pub fn render_ir(functions: &[IrFunction]) -> String {
    let mut out = format!("IR Functions ({}):\n", functions.len());
    for function in functions {
        out.push_str(&format!("{}", function));
    }
    out
}

pub fn success(message: &str) {
    println!("{}", style(message).green());
}

pub fn program_output_start() {
    println!("\n{}\n", style("==================== Program Output Start ====================").dim());
}

pub fn program_output_end() {
    println!("\n{}\n", style("==================== Program Output End ======================").dim());
}
