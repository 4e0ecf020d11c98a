use crate::error::Unwind;
use crate::interpreter::Interpreter;
use crate::token::Token;
use crate::value::object::Object;

/// The contract shared by everything invokable: user functions, the native
/// functions, and classes. `paren` is the call's closing parenthesis, used
/// to locate errors raised inside natives that have no token of their own.
pub trait Callable {
    fn arity(&self) -> usize;
    fn call(
        &self,
        interpreter: &mut Interpreter,
        args: Vec<Object>,
        paren: &Token,
    ) -> Result<Object, Unwind>;
}
