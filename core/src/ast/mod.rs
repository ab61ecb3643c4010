//! Abstract syntax tree: node definitions and the parser entrypoints.

pub mod err;
pub mod expr;
pub mod parser;
pub mod stmt;

pub use expr::{Expr, LiteralValue};
pub use stmt::{Program, Stmt};

use crate::error::VyprErrorExt;
use crate::lexer::token::Token;
use crate::lexer::Lexer;
use crate::script::Script;

/// Lex and parse a script in one step.
pub fn generate_ast_from_source(script: &Script) -> Result<Program, Box<dyn VyprErrorExt>> {
    let tokens = Lexer::new(script).tokenize()?;
    parse_tokens(tokens, script)
}

/// Parse an already-tokenized script.
pub fn parse_tokens(tokens: Vec<Token>, script: &Script) -> Result<Program, Box<dyn VyprErrorExt>> {
    parser::Parser::new(tokens, &script.name).parse()
}
