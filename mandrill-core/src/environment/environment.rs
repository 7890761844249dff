use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::prelude::Value;

/// A single binding frame. Closures and live call frames share their
/// enclosing frames, so frames are handed around as
/// `Rc<RefCell<Environment>>` rather than owned by the call stack.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    pub store: HashMap<String, Value>,
    pub outer: Option<Rc<RefCell<Environment>>>
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            outer: None
        }
    }

    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Self {
        Self {
            store: HashMap::new(),
            outer: Some(outer)
        }
    }

    /// Resolves a name against this frame, then each enclosing frame
    /// outward. The innermost binding wins.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => match &self.outer {
                Some(outer) => outer.borrow().get(name),
                None => None
            }
        }
    }

    // Writes the local frame only; enclosing bindings are shadowed,
    // never mutated.
    pub fn set(&mut self, name: String, value: Value) {
        let _ = self.store.insert(name, value);
    }
}
