use crate::analyzers::semantic::err::SemanticError;
use crate::analyzers::semantic::table::SymbolTable;
use crate::ast::Program;
use crate::error::{Level, VyprErrorExt};

/// Depth-first scope-and-use checker. One instance analyzes one program; the
/// global scope is open for the whole walk and inner scopes are closed on
/// every exit path, including error propagation.
pub struct Analyzer {
    pub(crate) tbl: SymbolTable,
    pub(crate) in_function: bool,
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer {
            tbl: SymbolTable::new(),
            in_function: false,
        }
    }

    pub fn analyze(&mut self, program: &Program) -> Result<(), Box<dyn VyprErrorExt>> {
        for statement in &program.statements {
            self.analyze_stmt(statement)?;
        }
        Ok(())
    }

    /// Render the symbol table for verbose diagnostics.
    pub fn symbol_table_dump(&self) -> String {
        self.tbl.dump()
    }

    /// Run `f` inside a fresh scope. The scope is popped whether `f`
    /// succeeds or fails.
    pub(crate) fn with_scope<F>(&mut self, f: F) -> Result<(), Box<dyn VyprErrorExt>>
    where
        F: FnOnce(&mut Self) -> Result<(), Box<dyn VyprErrorExt>>,
    {
        self.tbl.enter_scope();
        let result = f(self);
        self.tbl.exit_scope();
        result
    }

    pub(crate) fn error(&self, message: String, issuer: &str) -> Box<dyn VyprErrorExt> {
        Box::new(SemanticError::with(
            Level::Error,
            message,
            issuer.to_string(),
            None,
            None,
        ))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::new()
    }
}
