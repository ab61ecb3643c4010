//! Statement-level semantic rules: declaration, scoping, and the
//! return-inside-function restriction.

use crate::analyzers::semantic::analyzer::Analyzer;
use crate::analyzers::semantic::symbol::Symbol;
use crate::ast::Stmt;
use crate::error::VyprErrorExt;

impl Analyzer {
    pub(crate) fn analyze_stmt(&mut self, stmt: &Stmt) -> Result<(), Box<dyn VyprErrorExt>> {
        match stmt {
            Stmt::VarDecl { name, initializer } => {
                if self.tbl.exists_in_current_scope(name) {
                    return Err(self.error(
                        format!("Variable '{}' is already defined in this scope", name),
                        "vypr.analyzers.semantic.stmt",
                    ));
                }

                // The initializer is checked before the name is bound, so it
                // cannot see the new binding.
                if let Some(init) = initializer {
                    self.analyze_expr(init)?;
                }

                self.tbl
                    .define(Symbol::new_variable(name.clone(), initializer.is_some()));
                Ok(())
            }

            Stmt::FunctionDecl { name, params, body } => {
                if self.tbl.exists_in_current_scope(name) {
                    return Err(self.error(
                        format!("Function '{}' is already defined in this scope", name),
                        "vypr.analyzers.semantic.stmt",
                    ));
                }

                self.tbl
                    .define(Symbol::new_function(name.clone(), params.len()));

                let func_name = name.clone();
                let params = params.clone();
                self.with_scope(|analyzer| {
                    let enclosing = std::mem::replace(&mut analyzer.in_function, true);

                    let result = (|| {
                        for param in &params {
                            if analyzer.tbl.exists_in_current_scope(param) {
                                return Err(analyzer.error(
                                    format!(
                                        "Parameter '{}' is already defined in function '{}'",
                                        param, func_name
                                    ),
                                    "vypr.analyzers.semantic.stmt",
                                ));
                            }
                            analyzer.tbl.define(Symbol::new_variable(param.clone(), true));
                        }
                        analyzer.analyze_stmt(body)
                    })();

                    analyzer.in_function = enclosing;
                    result
                })
            }

            Stmt::Expression { expr } => self.analyze_expr(expr),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.analyze_expr(condition)?;
                self.with_scope(|analyzer| analyzer.analyze_stmt(then_branch))?;
                if let Some(else_branch) = else_branch {
                    self.with_scope(|analyzer| analyzer.analyze_stmt(else_branch))?;
                }
                Ok(())
            }

            Stmt::While { condition, body } => {
                self.analyze_expr(condition)?;
                self.with_scope(|analyzer| analyzer.analyze_stmt(body))
            }

            Stmt::LoopIn {
                variable,
                iterable,
                body,
            } => {
                self.analyze_expr(iterable)?;
                let variable = variable.clone();
                self.with_scope(|analyzer| {
                    analyzer.tbl.define(Symbol::new_variable(variable, true));
                    analyzer.analyze_stmt(body)
                })
            }

            Stmt::LoopTimes { count, body } => {
                self.analyze_expr(count)?;
                self.with_scope(|analyzer| analyzer.analyze_stmt(body))
            }

            Stmt::Return { value } => {
                if !self.in_function {
                    return Err(self.error(
                        "Cannot return from outside a function".to_string(),
                        "vypr.analyzers.semantic.stmt",
                    ));
                }
                if let Some(value) = value {
                    self.analyze_expr(value)?;
                }
                Ok(())
            }

            Stmt::Block { statements } => {
                for statement in statements {
                    self.analyze_stmt(statement)?;
                }
                Ok(())
            }

            Stmt::Print { expr } => self.analyze_expr(expr),

            Stmt::Input { variable } => match self.tbl.resolve_mut(variable) {
                Some(symbol) => {
                    symbol.mark_initialized();
                    Ok(())
                }
                None => Err(self.error(
                    format!("Variable '{}' is not defined", variable),
                    "vypr.analyzers.semantic.stmt",
                )),
            },
        }
    }
}
