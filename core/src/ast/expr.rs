use std::fmt;

use crate::lexer::token::TokenKind;

/// A literal constant as scanned from the source.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Int(value) => write!(f, "{}", value),
            LiteralValue::Float(value) => write!(f, "{}", value),
            LiteralValue::Bool(value) => write!(f, "{}", value),
            LiteralValue::Str(value) => write!(f, "\"{}\"", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal { value: LiteralValue },
    Variable { name: String },
    Binary { left: Box<Expr>, op: TokenKind, right: Box<Expr> },
    Unary { op: TokenKind, operand: Box<Expr> },
    /// Calls name a bare callee; calling anything else is rejected by the
    /// parser when the argument list closes.
    Call { callee: String, args: Vec<Expr> },
    Array { elements: Vec<Expr> },
    ArrayAccess { array: Box<Expr>, index: Box<Expr> },
    /// Member access is read-only; only `.length` is given meaning by the
    /// emitter, other members pass through verbatim.
    MemberAccess { object: Box<Expr>, member: String },
}

impl Expr {
    pub(crate) fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = " ".repeat(indent);
        match self {
            Expr::Literal { value } => writeln!(f, "{}Literal {}", pad, value),
            Expr::Variable { name } => writeln!(f, "{}Variable {}", pad, name),
            Expr::Binary { left, op, right } => {
                writeln!(f, "{}Binary {}", pad, op)?;
                left.write_tree(f, indent + 2)?;
                right.write_tree(f, indent + 2)
            }
            Expr::Unary { op, operand } => {
                writeln!(f, "{}Unary {}", pad, op)?;
                operand.write_tree(f, indent + 2)
            }
            Expr::Call { callee, args } => {
                writeln!(f, "{}Call {}", pad, callee)?;
                for arg in args {
                    arg.write_tree(f, indent + 2)?;
                }
                Ok(())
            }
            Expr::Array { elements } => {
                writeln!(f, "{}Array", pad)?;
                for element in elements {
                    element.write_tree(f, indent + 2)?;
                }
                Ok(())
            }
            Expr::ArrayAccess { array, index } => {
                writeln!(f, "{}ArrayAccess", pad)?;
                array.write_tree(f, indent + 2)?;
                index.write_tree(f, indent + 2)
            }
            Expr::MemberAccess { object, member } => {
                writeln!(f, "{}MemberAccess .{}", pad, member)?;
                object.write_tree(f, indent + 2)
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}
