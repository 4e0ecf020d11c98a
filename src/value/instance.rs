use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::class::Class;
use crate::value::object::Object;
use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;

/// The runtime representation of an instance of a Lox class. The field map
/// lives behind the instance's shared cell, so a write through any alias is
/// seen through every other one.
#[derive(Debug)]
pub struct Instance {
    pub klass: Rc<Class>,
    fields: HashMap<String, Object>,
}

impl Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} instance", self.klass.name)
    }
}

impl Instance {
    pub fn new(klass: Rc<Class>) -> Self {
        Self { klass, fields: HashMap::new() }
    }

    pub fn get(&self, token: &Token) -> Result<Object, RuntimeError> {
        if let Some(value) = self.fields.get(&token.lexeme) {
            return Ok(value.clone());
        }

        // We could silently return some dummy value like nil, but that
        // behavior masks bugs more often than it does anything useful.
        Err(RuntimeError::UndefinedProperty { token: token.clone() })
    }

    /// Writes always succeed, creating the field if it wasn't there.
    pub fn set(&mut self, token: &Token, value: Object) {
        self.fields.insert(token.lexeme.clone(), value);
    }
}
