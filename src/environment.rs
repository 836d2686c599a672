use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;

/// Shared handle to a scope frame.  Closures keep their defining frame alive
/// through this handle after the block that created it has exited.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One lexical scope: its own bindings plus a link to the enclosing scope.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: EnvRef) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    pub fn into_shared(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Fresh frame parented at `enclosing`, ready to share.
    pub fn child_of(enclosing: &EnvRef) -> EnvRef {
        Environment::with_enclosing(Rc::clone(enclosing)).into_shared()
    }

    /// Bind `name` in this frame, replacing any previous binding.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Binding in this frame only.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    /// Names bound in this frame only.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Dynamic lookup walking the whole chain; used for globals.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    /// Dynamic assignment walking the whole chain; never creates a binding.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }

    /// The frame exactly `distance` parent links above `env`.
    pub fn ancestor(env: &EnvRef, distance: usize) -> Option<EnvRef> {
        let mut current: EnvRef = Rc::clone(env);

        for _ in 0..distance {
            let parent: EnvRef = Rc::clone(current.borrow().enclosing.as_ref()?);
            current = parent;
        }

        Some(current)
    }

    /// Read `name` from the frame `distance` hops up, as computed by the
    /// resolver.
    pub fn get_at(env: &EnvRef, distance: usize, name: &Token) -> Result<Value, RuntimeError> {
        debug!("get_at '{}' distance {}", name.lexeme, distance);

        Self::ancestor(env, distance)
            .and_then(|frame| frame.borrow().values.get(&name.lexeme).cloned())
            .ok_or_else(|| undefined(name))
    }

    pub fn assign_at(
        env: &EnvRef,
        distance: usize,
        name: &Token,
        value: Value,
    ) -> Result<(), RuntimeError> {
        debug!("assign_at '{}' distance {}", name.lexeme, distance);

        let frame: EnvRef = Self::ancestor(env, distance).ok_or_else(|| undefined(name))?;
        frame.borrow_mut().define(&name.lexeme, value);
        Ok(())
    }
}

fn undefined(name: &Token) -> RuntimeError {
    RuntimeError::new(name, format!("Undefined variable '{}'.", name.lexeme))
}
