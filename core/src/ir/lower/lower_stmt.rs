//! Statement lowering: structured control flow becomes labeled linear IR.

use super::IrGenerator;
use crate::ast::Stmt;
use crate::ir::instr::{IrInstruction, IrOpCode};

impl IrGenerator {
    pub(crate) fn lower_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { name, initializer } => {
                // A declaration without an initializer emits nothing; the
                // analyzer already rejects reads of the unbound name.
                if let Some(init) = initializer {
                    let value = self.lower_expr(init);
                    self.emit(IrInstruction::new(
                        IrOpCode::StoreVar,
                        vec![name.clone(), value],
                    ));
                }
                self.track_local(name);
            }

            Stmt::FunctionDecl { name, params, body } => {
                let previous = self.enter_function(name, params.clone());
                for param in params {
                    self.track_local(param);
                }

                self.lower_stmt(body);

                // Implicit return for bodies that do not end with one.
                let needs_return = match self.current_function().instructions.last() {
                    Some(last) => last.opcode != IrOpCode::Return,
                    None => true,
                };
                if needs_return {
                    self.emit(IrInstruction::bare(IrOpCode::Return));
                }

                self.exit_function(previous);
            }

            Stmt::Expression { expr } => {
                self.lower_expr(expr);
            }

            Stmt::Block { statements } => {
                for statement in statements {
                    self.lower_stmt(statement);
                }
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let cond = self.lower_expr(condition);
                let else_label = self.generate_label();
                let end_label = self.generate_label();

                self.emit(IrInstruction::new(
                    IrOpCode::JumpIfFalse,
                    vec![cond, else_label.clone()],
                ));

                self.lower_stmt(then_branch);
                self.emit(IrInstruction::new(IrOpCode::Jump, vec![end_label.clone()]));

                self.emit(IrInstruction::new(IrOpCode::Label, vec![else_label]));
                if let Some(else_branch) = else_branch {
                    self.lower_stmt(else_branch);
                }

                self.emit(IrInstruction::new(IrOpCode::Label, vec![end_label]));
            }

            Stmt::While { condition, body } => {
                let loop_label = self.generate_label();
                let end_label = self.generate_label();

                self.emit(IrInstruction::new(
                    IrOpCode::Label,
                    vec![loop_label.clone()],
                ));

                let cond = self.lower_expr(condition);
                self.emit(IrInstruction::new(
                    IrOpCode::JumpIfFalse,
                    vec![cond, end_label.clone()],
                ));

                self.lower_stmt(body);
                self.emit(IrInstruction::new(IrOpCode::Jump, vec![loop_label]));

                self.emit(IrInstruction::new(IrOpCode::Label, vec![end_label]));
            }

            Stmt::LoopIn {
                variable,
                iterable,
                body,
            } => {
                let iterable = self.lower_expr(iterable);

                let index = self.generate_temp();
                let loop_label = self.generate_label();
                let end_label = self.generate_label();

                self.emit(IrInstruction::new(
                    IrOpCode::LoadConst,
                    vec![index.clone(), "0".to_string()],
                ));
                self.emit(IrInstruction::new(
                    IrOpCode::Label,
                    vec![loop_label.clone()],
                ));

                let length = self.generate_temp();
                let cond = self.generate_temp();
                self.emit(IrInstruction::new(
                    IrOpCode::MemberGet,
                    vec![length.clone(), iterable.clone(), "length".to_string()],
                ));
                self.emit(IrInstruction::new(
                    IrOpCode::BinaryOp,
                    vec![cond.clone(), index.clone(), "<".to_string(), length],
                ));
                self.emit(IrInstruction::new(
                    IrOpCode::JumpIfFalse,
                    vec![cond, end_label.clone()],
                ));

                let item = self.generate_temp();
                self.emit(IrInstruction::new(
                    IrOpCode::ArrayGet,
                    vec![item.clone(), iterable, index.clone()],
                ));
                self.emit(IrInstruction::new(
                    IrOpCode::StoreVar,
                    vec![variable.clone(), item],
                ));

                self.lower_stmt(body);

                let next = self.generate_temp();
                self.emit(IrInstruction::new(
                    IrOpCode::BinaryOp,
                    vec![next.clone(), index.clone(), "+".to_string(), "1".to_string()],
                ));
                self.emit(IrInstruction::new(IrOpCode::StoreVar, vec![index, next]));

                self.emit(IrInstruction::new(IrOpCode::Jump, vec![loop_label]));
                self.emit(IrInstruction::new(IrOpCode::Label, vec![end_label]));
            }

            Stmt::LoopTimes { count, body } => {
                let count = self.lower_expr(count);

                let index = self.generate_temp();
                let loop_label = self.generate_label();
                let end_label = self.generate_label();

                self.emit(IrInstruction::new(
                    IrOpCode::LoadConst,
                    vec![index.clone(), "0".to_string()],
                ));
                self.emit(IrInstruction::new(
                    IrOpCode::Label,
                    vec![loop_label.clone()],
                ));

                let cond = self.generate_temp();
                self.emit(IrInstruction::new(
                    IrOpCode::BinaryOp,
                    vec![cond.clone(), index.clone(), "<".to_string(), count],
                ));
                self.emit(IrInstruction::new(
                    IrOpCode::JumpIfFalse,
                    vec![cond, end_label.clone()],
                ));

                self.lower_stmt(body);

                let next = self.generate_temp();
                self.emit(IrInstruction::new(
                    IrOpCode::BinaryOp,
                    vec![next.clone(), index.clone(), "+".to_string(), "1".to_string()],
                ));
                self.emit(IrInstruction::new(IrOpCode::StoreVar, vec![index, next]));

                self.emit(IrInstruction::new(IrOpCode::Jump, vec![loop_label]));
                self.emit(IrInstruction::new(IrOpCode::Label, vec![end_label]));
            }

            Stmt::Return { value } => match value {
                Some(value) => {
                    let result = self.lower_expr(value);
                    self.emit(IrInstruction::new(IrOpCode::Return, vec![result]));
                }
                None => {
                    self.emit(IrInstruction::bare(IrOpCode::Return));
                }
            },

            Stmt::Print { expr } => {
                let value = self.lower_expr(expr);
                self.emit(IrInstruction::new(IrOpCode::Print, vec![value]));
            }

            Stmt::Input { variable } => {
                self.emit(IrInstruction::new(IrOpCode::Input, vec![variable.clone()]));
                self.track_local(variable);
            }
        }
    }
}
