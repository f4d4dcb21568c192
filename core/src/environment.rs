//! Environment for variable bindings
//!
//! An Environment is one lexical scope. Scopes form a chain through a
//! single parent link; lookup walks outward until a scope binds the symbol
//! or the global scope (which has no parent) has been searched.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::interner::InternedSymbol;
use crate::language::Value;

// ============================================================================
// Environment
// ============================================================================

struct Scope {
    bindings: FxHashMap<InternedSymbol, Value>,
    parent: Option<Environment>,
}

/// A lexical scope.
///
/// Cloning is cheap (an `Rc` increment) and yields a handle to the same
/// scope, so a closure's captured environment sees later `define`s made in
/// it. That is what lets a closure refer to its own name recursively.
#[derive(Clone)]
pub struct Environment {
    scope: Rc<RefCell<Scope>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create a new, empty global environment
    pub fn new() -> Self {
        Self::make(None)
    }

    /// Create an empty scope chained to `parent`
    pub fn with_parent(parent: &Environment) -> Self {
        Self::make(Some(parent.clone()))
    }

    fn make(parent: Option<Environment>) -> Self {
        Environment {
            scope: Rc::new(RefCell::new(Scope {
                bindings: FxHashMap::default(),
                parent,
            })),
        }
    }

    /// Create a child scope binding `params` to `args` positionally
    pub fn extend(&self, params: &[InternedSymbol], args: &[Value]) -> Self {
        let child = Self::with_parent(self);
        for (param, arg) in params.iter().zip(args) {
            child.define(*param, arg.clone());
        }
        child
    }

    /// Bind `name` in THIS scope, replacing any previous binding here.
    /// Enclosing scopes are never touched.
    pub fn define(&self, name: InternedSymbol, value: Value) {
        self.scope.borrow_mut().bindings.insert(name, value);
    }

    /// Look up `name` in this scope, then each enclosing scope in turn
    pub fn lookup(&self, name: InternedSymbol) -> Result<Value> {
        let mut current = Some(self.clone());
        while let Some(env) = current {
            let scope = env.scope.borrow();
            if let Some(value) = scope.bindings.get(&name) {
                return Ok(value.clone());
            }
            current = scope.parent.clone();
        }
        Err(Error::UndefinedSymbol(name.resolve()))
    }
}

#[cfg(test)]
impl Environment {
    fn is_global(&self) -> bool {
        self.scope.borrow().parent.is_none()
    }

    fn is_bound_locally(&self, name: InternedSymbol) -> bool {
        self.scope.borrow().bindings.contains_key(&name)
    }
}
