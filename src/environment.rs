//! Runtime scopes. Environments form a singly linked chain that ends at the
//! globals. They are shared (`Rc<RefCell<_>>`) because a closure keeps its
//! defining environment alive after the block or call that created it has
//! returned.
//!
//! Reference cycles (an instance field holding a bound method whose closure
//! holds the instance) are never collected. A run is a bounded‑lifetime
//! process, so this is accepted.

use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type EnvRef = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enclosing(enclosing: EnvRef) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Wrap `self` in the shared handle the interpreter passes around.
    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    pub fn enclosing(&self) -> Option<EnvRef> {
        self.enclosing.clone()
    }

    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Look `name` up here, then outward through the chain.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    /// Overwrite the nearest existing binding of `name`.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }
}

/// Walk exactly `distance` links outward from `env`.
pub fn ancestor(env: &EnvRef, distance: usize, line: usize) -> Result<EnvRef> {
    let mut current = Rc::clone(env);

    for _ in 0..distance {
        let next = current.borrow().enclosing().ok_or_else(|| {
            LoxError::runtime(line, "Scope chain is shorter than the resolved distance.")
        })?;
        current = next;
    }

    Ok(current)
}

/// Read `name` from the scope exactly `distance` hops away.
pub fn get_at(env: &EnvRef, distance: usize, name: &str, line: usize) -> Result<Value> {
    let target = ancestor(env, distance, line)?;
    let value = target.borrow().values.get(name).cloned();

    value.ok_or_else(|| LoxError::runtime(line, format!("Undefined variable '{}'.", name)))
}

/// Overwrite `name` in the scope exactly `distance` hops away.
pub fn assign_at(env: &EnvRef, distance: usize, name: &Token, value: Value) -> Result<()> {
    let target = ancestor(env, distance, name.line)?;
    target.borrow_mut().define(&name.lexeme, value);
    Ok(())
}

fn undefined(name: &Token) -> LoxError {
    LoxError::runtime(name.line, format!("Undefined variable '{}'.", name.lexeme))
}
