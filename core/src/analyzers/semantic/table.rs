use std::collections::HashMap;

use super::symbol::Symbol;

// A single scope: name -> symbol
type Scope = HashMap<String, Symbol>;

/// A stack of lexical scopes. The bottom scope is the global scope and lives
/// for the whole analysis; inner scopes are pushed on entry to a function or
/// block construct and popped on exit, in strict LIFO order.
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![HashMap::new()],
        }
    }

    // ------- Scope helpers -------

    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn exit_scope(&mut self) {
        // The global scope is never popped.
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn is_global_scope(&self) -> bool {
        self.scopes.len() == 1
    }

    // ------- Symbol helpers -------

    /// Define a symbol in the innermost scope. Returns false if the name is
    /// already bound in that scope.
    pub fn define(&mut self, symbol: Symbol) -> bool {
        if let Some(scope) = self.scopes.last_mut() {
            if scope.contains_key(&symbol.name) {
                return false;
            }
            scope.insert(symbol.name.clone(), symbol);
            return true;
        }
        false
    }

    pub fn exists_in_current_scope(&self, name: &str) -> bool {
        self.scopes
            .last()
            .map_or(false, |scope| scope.contains_key(name))
    }

    /// Walk the scope chain innermost-first.
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        for scope in self.scopes.iter().rev() {
            if let Some(symbol) = scope.get(name) {
                return Some(symbol);
            }
        }
        None
    }

    pub fn resolve_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(symbol) = scope.get_mut(name) {
                return Some(symbol);
            }
        }
        None
    }

    // ------- Diagnostics -------

    /// Render the global scope, sorted by name, for verbose output.
    pub fn dump(&self) -> String {
        let mut out = String::from("Symbol Table:\n");
        if let Some(global) = self.scopes.first() {
            let mut names: Vec<&String> = global.keys().collect();
            names.sort();
            for name in names {
                out.push_str(&format!("  {}\n", global[name]));
            }
        }
        out
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}
