use crate::error::Unwind;
use crate::interpreter::Interpreter;
use crate::token::Token;
use crate::value::callable::Callable;
use crate::value::instance::Instance;
use crate::value::object::Object;
use std::cell::RefCell;
use std::rc::Rc;

/// The runtime representation of a class declaration. Methods are parsed
/// and resolved with the rest of the program, but the class value itself is
/// just a named constructor for field-bag instances; there is no method
/// table to consult yet.
#[derive(Debug)]
pub struct Class {
    pub name: String,
}

impl Class {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

impl Callable for Rc<Class> {
    /// No user-defined initializers, so constructing takes no arguments.
    fn arity(&self) -> usize {
        0
    }

    /// "Calling" a class instantiates a fresh, empty instance of it.
    fn call(
        &self,
        _interpreter: &mut Interpreter,
        _args: Vec<Object>,
        _paren: &Token,
    ) -> Result<Object, Unwind> {
        let instance = Instance::new(Rc::clone(self));
        Ok(Object::Instance(Rc::new(RefCell::new(instance))))
    }
}
