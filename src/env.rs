// ABOUTME: Environment module for managing variable bindings and scopes

use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A single frame of bindings with an optional link to its enclosing frame.
/// Frames form a DAG: multiple closures may share one captured frame, and
/// every chain bottoms out at the global frame holding the builtins.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no parent
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child environment with a parent
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Defines or updates a binding in THIS frame (never searches upward).
    /// The stored value is independent of the caller's copy.
    pub fn put(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Looks up a symbol in this frame, then enclosing frames recursively.
    /// A hit yields an independent copy of the stored value.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }

        if let Some(ref parent) = self.parent {
            return parent.get(name);
        }

        None
    }

    /// Walks the parent chain to the global frame.
    pub fn global(self: &Rc<Self>) -> Rc<Environment> {
        match self.parent {
            Some(ref parent) => parent.global(),
            None => self.clone(),
        }
    }
}
