//! file: core/src/ir/lower/mod.rs
//! description: AST -> IR lowering context.
//!
//! `IrGenerator` owns the growing list of IR functions and the per-function
//! temporary counter. Lowering always starts inside the synthetic `__main__`
//! function; user function declarations push a new function, lower their
//! body into it, and restore the enclosing function as current.

mod lower_expr;
mod lower_stmt;

use std::collections::HashSet;

use log::debug;

use crate::ast::Program;
use crate::ir::function::IrFunction;
use crate::ir::instr::IrInstruction;

pub const MAIN_FUNCTION: &str = "__main__";

pub struct IrGenerator {
    functions: Vec<IrFunction>,
    current: usize,
    temp_counter: usize,
    locals: HashSet<String>,
}

impl IrGenerator {
    pub fn new() -> Self {
        IrGenerator {
            functions: vec![IrFunction::new(MAIN_FUNCTION, Vec::new())],
            current: 0,
            temp_counter: 0,
            locals: HashSet::new(),
        }
    }

    pub fn generate(mut self, program: &Program) -> Vec<IrFunction> {
        for statement in &program.statements {
            self.lower_stmt(statement);
        }
        debug!(
            "lowered {} function(s) from {} top-level statement(s)",
            self.functions.len(),
            program.statements.len()
        );
        self.functions
    }

    /// Push a new function and make it current. Returns the index of the
    /// enclosing function so the caller can restore it.
    pub(crate) fn enter_function(&mut self, name: &str, parameters: Vec<String>) -> usize {
        let previous = self.current;
        self.functions.push(IrFunction::new(name, parameters));
        self.current = self.functions.len() - 1;
        self.temp_counter = 0;
        self.locals.clear();
        previous
    }

    pub(crate) fn exit_function(&mut self, previous: usize) {
        debug!(
            "function '{}' lowered with {} tracked local(s)",
            self.functions[self.current].name,
            self.locals.len()
        );
        self.current = previous;
    }

    pub(crate) fn generate_temp(&mut self) -> String {
        let temp = format!("t{}", self.temp_counter);
        self.temp_counter += 1;
        temp
    }

    pub(crate) fn generate_label(&mut self) -> String {
        self.functions[self.current].generate_label()
    }

    pub(crate) fn emit(&mut self, instruction: IrInstruction) {
        self.functions[self.current].push(instruction);
    }

    pub(crate) fn track_local(&mut self, name: &str) {
        self.locals.insert(name.to_string());
    }

    pub(crate) fn current_function(&self) -> &IrFunction {
        &self.functions[self.current]
    }
}

impl Default for IrGenerator {
    fn default() -> Self {
        IrGenerator::new()
    }
}
