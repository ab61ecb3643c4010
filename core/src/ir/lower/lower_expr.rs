//! Expression lowering. Every expression evaluates to a string operand: the
//! temporary holding its value, or (for assignment) the stored right-hand
//! operand.

use super::IrGenerator;
use crate::analyzers::semantic::expr::is_builtin_conversion;
use crate::ast::{Expr, LiteralValue};
use crate::ir::instr::{IrInstruction, IrOpCode};
use crate::lexer::token::TokenKind;

/// The literal operator glyph carried in `BINARY_OP` / `UNARY_OP` operands.
fn op_string(op: TokenKind) -> &'static str {
    match op {
        TokenKind::Plus => "+",
        TokenKind::Minus => "-",
        TokenKind::Multiply => "*",
        TokenKind::Divide => "/",
        TokenKind::Concat => "^",
        TokenKind::Equal => "==",
        TokenKind::NotEqual => "!=",
        TokenKind::Less => "<",
        TokenKind::LessEqual => "<=",
        TokenKind::Greater => ">",
        TokenKind::GreaterEqual => ">=",
        TokenKind::And => "&&",
        TokenKind::Or => "||",
        TokenKind::Not => "!",
        _ => "?",
    }
}

/// Render a literal the way the emitter expects to see it: integers and
/// floats in decimal, booleans as bare keywords, strings wrapped in one pair
/// of double quotes. Inner quotes are not escaped.
fn render_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Int(n) => n.to_string(),
        LiteralValue::Float(x) => {
            if x.fract() == 0.0 && x.is_finite() {
                format!("{:.1}", x)
            } else {
                x.to_string()
            }
        }
        LiteralValue::Bool(b) => {
            if *b {
                "true".to_string()
            } else {
                "false".to_string()
            }
        }
        LiteralValue::Str(s) => format!("\"{}\"", s),
    }
}

impl IrGenerator {
    pub(crate) fn lower_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Literal { value } => {
                let temp = self.generate_temp();
                self.emit(IrInstruction::new(
                    IrOpCode::LoadConst,
                    vec![temp.clone(), render_literal(value)],
                ));
                temp
            }

            Expr::Variable { name } => {
                let temp = self.generate_temp();
                self.emit(IrInstruction::new(
                    IrOpCode::LoadVar,
                    vec![temp.clone(), name.clone()],
                ));
                temp
            }

            Expr::Binary { left, op, right } if *op == TokenKind::Assign => {
                match left.as_ref() {
                    Expr::Variable { name } => {
                        let value = self.lower_expr(right);
                        self.emit(IrInstruction::new(
                            IrOpCode::StoreVar,
                            vec![name.clone(), value.clone()],
                        ));
                        value
                    }
                    Expr::ArrayAccess { array, index } => {
                        let array = self.lower_expr(array);
                        let index = self.lower_expr(index);
                        let value = self.lower_expr(right);
                        self.emit(IrInstruction::new(
                            IrOpCode::ArraySet,
                            vec![array, index, value.clone()],
                        ));
                        value
                    }
                    // Any other target was rejected upstream; lower as a
                    // plain binary op so the walk stays total.
                    _ => self.lower_binary(left, *op, right),
                }
            }

            Expr::Binary { left, op, right } => self.lower_binary(left, *op, right),

            Expr::Unary { op, operand } => {
                let operand = self.lower_expr(operand);
                let temp = self.generate_temp();
                self.emit(IrInstruction::new(
                    IrOpCode::UnaryOp,
                    vec![temp.clone(), op_string(*op).to_string(), operand],
                ));
                temp
            }

            Expr::Call { callee, args } => {
                let arg_values: Vec<String> =
                    args.iter().map(|arg| self.lower_expr(arg)).collect();

                if is_builtin_conversion(callee) && arg_values.len() == 1 {
                    let temp = self.generate_temp();
                    self.emit(IrInstruction::new(
                        IrOpCode::Convert,
                        vec![temp.clone(), callee.clone(), arg_values[0].clone()],
                    ));
                    return temp;
                }

                let temp = self.generate_temp();
                self.emit(IrInstruction::new(
                    IrOpCode::Call,
                    vec![temp.clone(), callee.clone(), arg_values.join(", ")],
                ));
                temp
            }

            Expr::Array { elements } => {
                let values: Vec<String> = elements
                    .iter()
                    .map(|element| self.lower_expr(element))
                    .collect();
                let temp = self.generate_temp();
                self.emit(IrInstruction::new(
                    IrOpCode::ArrayNew,
                    vec![temp.clone(), values.join(", ")],
                ));
                temp
            }

            Expr::ArrayAccess { array, index } => {
                let array = self.lower_expr(array);
                let index = self.lower_expr(index);
                let temp = self.generate_temp();
                self.emit(IrInstruction::new(
                    IrOpCode::ArrayGet,
                    vec![temp.clone(), array, index],
                ));
                temp
            }

            Expr::MemberAccess { object, member } => {
                let object = self.lower_expr(object);
                let temp = self.generate_temp();
                self.emit(IrInstruction::new(
                    IrOpCode::MemberGet,
                    vec![temp.clone(), object, member.clone()],
                ));
                temp
            }
        }
    }

    fn lower_binary(&mut self, left: &Expr, op: TokenKind, right: &Expr) -> String {
        let left = self.lower_expr(left);
        let right = self.lower_expr(right);
        let temp = self.generate_temp();
        self.emit(IrInstruction::new(
            IrOpCode::BinaryOp,
            vec![temp.clone(), left, op_string(op).to_string(), right],
        ));
        temp
    }
}
