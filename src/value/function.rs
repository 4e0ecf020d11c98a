use crate::environment::{Environment, MutableEnvironment};
use crate::error::{RuntimeError, Unwind};
use crate::interpreter::Interpreter;
use crate::stmt::FunctionDeclaration;
use crate::token::Token;
use crate::value::callable::Callable;
use crate::value::object::Object;
use crate::value::object::Object::Nil;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::Instant;

/// The clock native reports seconds relative to a monotonic epoch anchored
/// the first time it is read. The epoch is arbitrary; only differences
/// between readings mean anything.
static CLOCK_EPOCH: Lazy<Instant> = Lazy::new(Instant::now);

/// The runtime representation of a function: the two natives that are
/// registered in globals before any user code runs, and functions the user
/// declared.
#[derive(Clone, Debug)]
pub enum Function {
    Clock,
    TestAdd,
    UserDefined {
        /// The function statement's compile-time shape: name, params, body.
        declaration: Rc<FunctionDeclaration>,

        /// This holds the surrounding variables where the function is
        /// declared — the environment active at declaration time, not call
        /// time. It is the lexical scope surrounding the function, and it
        /// stays live (and mutable) for as long as this value does.
        closure: MutableEnvironment,
    },
}

impl Function {
    pub fn name(&self) -> String {
        match self {
            Function::Clock => "clock".to_string(),
            Function::TestAdd => "_ci_test_add".to_string(),
            Function::UserDefined { declaration, .. } => declaration.name.lexeme.clone(),
        }
    }

    /// Equality for function values: natives are singletons, user functions
    /// compare by the identity of their shared declaration.
    pub fn is_same(&self, other: &Function) -> bool {
        match (self, other) {
            (Function::Clock, Function::Clock) => true,
            (Function::TestAdd, Function::TestAdd) => true,
            (
                Function::UserDefined { declaration: left, .. },
                Function::UserDefined { declaration: right, .. },
            ) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl Callable for Function {
    fn arity(&self) -> usize {
        match self {
            Function::Clock => 0,
            Function::TestAdd => 2,
            Function::UserDefined { declaration, .. } => declaration.params.len(),
        }
    }

    fn call(
        &self,
        interpreter: &mut Interpreter,
        args: Vec<Object>,
        paren: &Token,
    ) -> Result<Object, Unwind> {
        match self {
            Function::Clock => Ok(Object::Number(CLOCK_EPOCH.elapsed().as_secs_f64())),
            Function::TestAdd => match (&args[0], &args[1]) {
                (Object::Number(left), Object::Number(right)) => Ok(Object::Number(left + right)),
                (Object::String(left), Object::String(right)) => {
                    Ok(Object::String(format!("{left}{right}")))
                }
                _ => Err(RuntimeError::TypeError {
                    token: paren.clone(),
                    message: "Invalid arguments to _ci_test_add: Must be two numbers or strings."
                        .to_string(),
                }
                .into()),
            },
            Function::UserDefined { declaration, closure } => {
                // Each call gets a fresh environment chained onto the
                // closure — not onto the caller's environment — with the
                // parameters bound in it. Up until now the current
                // environment was wherever the call happened; executing the
                // body teleports into the function's own lexical world.
                let scope = Environment::new_enclosing(closure);
                for (param, arg) in declaration.params.iter().zip(args) {
                    scope.borrow_mut().define(param.lexeme.clone(), arg);
                }

                // A return statement anywhere in the body, however deeply
                // nested, unwinds to exactly this frame. Falling off the end
                // of the body yields nil.
                match interpreter.execute_block(&declaration.body, scope) {
                    Err(Unwind::Return(value)) => Ok(value),
                    Err(unwind) => Err(unwind),
                    Ok(()) => Ok(Nil),
                }
            }
        }
    }
}

/// Builds the outermost environment, with the native bindings already in
/// place so they are visible to all user code.
pub fn globals() -> MutableEnvironment {
    let env = Environment::global();
    env.borrow_mut().define("clock".to_string(), Object::Function(Function::Clock));
    env.borrow_mut().define("_ci_test_add".to_string(), Object::Function(Function::TestAdd));
    env
}
