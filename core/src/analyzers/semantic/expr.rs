//! Expression-level semantic rules: name resolution, initialized-read
//! enforcement, assignment targets, and call arity.

use crate::analyzers::semantic::analyzer::Analyzer;
use crate::ast::Expr;
use crate::error::VyprErrorExt;
use crate::lexer::token::TokenKind;

/// Built-in conversion functions; each takes exactly one argument.
pub(crate) const BUILTIN_CONVERSIONS: [&str; 4] = ["int", "float", "str", "bool"];

pub(crate) fn is_builtin_conversion(name: &str) -> bool {
    BUILTIN_CONVERSIONS.contains(&name)
}

impl Analyzer {
    pub(crate) fn analyze_expr(&mut self, expr: &Expr) -> Result<(), Box<dyn VyprErrorExt>> {
        match expr {
            Expr::Literal { .. } => Ok(()),

            Expr::Variable { name } => match self.tbl.resolve(name) {
                None => Err(self.error(
                    format!("Variable '{}' is not defined", name),
                    "vypr.analyzers.semantic.expr",
                )),
                Some(symbol) if !symbol.is_initialized() => Err(self.error(
                    format!("Variable '{}' is not initialized", name),
                    "vypr.analyzers.semantic.expr",
                )),
                Some(_) => Ok(()),
            },

            Expr::Binary { left, op, right } => {
                self.analyze_expr(left)?;
                self.analyze_expr(right)?;

                if *op == TokenKind::Assign {
                    match left.as_ref() {
                        Expr::Variable { name } => match self.tbl.resolve_mut(name) {
                            Some(symbol) => symbol.mark_initialized(),
                            None => {
                                return Err(self.error(
                                    format!("Variable '{}' is not defined", name),
                                    "vypr.analyzers.semantic.expr",
                                ));
                            }
                        },
                        // Base and index were already validated above.
                        Expr::ArrayAccess { .. } => {}
                        _ => {
                            return Err(self.error(
                                "Invalid assignment target".to_string(),
                                "vypr.analyzers.semantic.expr",
                            ));
                        }
                    }
                }

                Ok(())
            }

            Expr::Unary { operand, .. } => self.analyze_expr(operand),

            Expr::Call { callee, args } => {
                if is_builtin_conversion(callee) {
                    if args.len() != 1 {
                        return Err(self.error(
                            format!(
                                "Built-in function '{}' expects 1 argument, but got {}",
                                callee,
                                args.len()
                            ),
                            "vypr.analyzers.semantic.expr",
                        ));
                    }
                } else {
                    let symbol = match self.tbl.resolve(callee) {
                        Some(symbol) => symbol,
                        None => {
                            return Err(self.error(
                                format!("Function '{}' is not defined", callee),
                                "vypr.analyzers.semantic.expr",
                            ));
                        }
                    };

                    if !symbol.is_function() {
                        return Err(self.error(
                            format!("'{}' is not a function", callee),
                            "vypr.analyzers.semantic.expr",
                        ));
                    }

                    if symbol.param_count() != Some(args.len()) {
                        return Err(self.error(
                            format!(
                                "Function '{}' expects {} arguments, but got {}",
                                callee,
                                symbol.param_count().unwrap_or(0),
                                args.len()
                            ),
                            "vypr.analyzers.semantic.expr",
                        ));
                    }
                }

                for arg in args {
                    self.analyze_expr(arg)?;
                }
                Ok(())
            }

            Expr::Array { elements } => {
                for element in elements {
                    self.analyze_expr(element)?;
                }
                Ok(())
            }

            Expr::ArrayAccess { array, index } => {
                self.analyze_expr(array)?;
                self.analyze_expr(index)
            }

            // Member existence cannot be checked without type information;
            // the emitter gives `.length` its meaning.
            Expr::MemberAccess { object, .. } => self.analyze_expr(object),
        }
    }
}
