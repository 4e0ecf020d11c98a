use crate::environment::{Environment, MutableEnvironment};
use crate::error;
use crate::error::RuntimeError;
use crate::error::Unwind;
use crate::expr::Expr;
use crate::stmt::Stmt;
use crate::token::Token;
use crate::token::TokenType::*;
use crate::value::class::Class;
use crate::value::function;
use crate::value::function::Function;
use crate::value::object::Object;
use crate::value::object::Object::{Boolean, Instance, Nil, Number, String};
use std::collections::HashMap;
use std::rc::Rc;

/// The interpreter is the last step. It takes the AST produced by the
/// parser, annotated by the resolver, and recursively traverses it in a
/// post-order walk: each node evaluates its children before doing its own
/// work. Statements are executed in `execute`, expressions evaluated in
/// `evaluate`.
pub struct Interpreter {
    /// Fixed reference to the outermost environment, where the natives and
    /// all top-level declarations live.
    globals: MutableEnvironment,

    /// The environment the next statement runs in. It changes as execution
    /// enters and exits blocks and call frames, and every such change is
    /// undone on the way out, whatever way out that is.
    environment: MutableEnvironment,

    /// The resolver's output: node identity → how many environments out the
    /// binding lives. References without an entry are global.
    locals: HashMap<usize, usize>,
}

impl Interpreter {
    pub fn new() -> Interpreter {
        let globals = function::globals();
        Self {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
        }
    }

    /// Folds in the resolution map for a newly-resolved program. The REPL
    /// resolves each line separately against the same interpreter, so maps
    /// accumulate; node ids are process-unique and never collide.
    pub fn resolve(&mut self, locals: HashMap<usize, usize>) {
        self.locals.extend(locals);
    }

    /// Takes in a list of statements — in other words, a program.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => continue,
                Err(Unwind::Error(error)) => {
                    error::runtime_error(&error);
                    break;
                }
                // The resolver rejects top-level returns, so a Return can
                // only surface here if that guarantee was broken.
                Err(Unwind::Return(_)) => {
                    unreachable!("return outside any function survived resolution")
                }
            }
        }
    }

    /// Runs a statement list in the given environment, then restores the
    /// previous one. The restore happens on every exit path — normal
    /// completion, a runtime error, or a return unwinding through — which
    /// is what keeps the scope chain balanced around any statement.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        scope: MutableEnvironment,
    ) -> Result<(), Unwind> {
        let previous = std::mem::replace(&mut self.environment, scope);
        let result = statements
            .iter()
            .try_for_each(|statement| self.execute(statement));
        self.environment = previous;
        result
    }

    /// This is the statement analogue to the evaluate() method we have for
    /// expressions. Statements produce no values, so the Ok type is unit.
    fn execute(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        match stmt {
            Stmt::Expression { expression } => {
                self.evaluate(expression)?;
                Ok(())
            }
            Stmt::Print { expression } => {
                let evaluated = self.evaluate(expression)?;
                println!("{evaluated}");
                Ok(())
            }
            Stmt::Var { name, initializer } => {
                let mut value = Nil;
                if let Some(expr) = initializer {
                    value = self.evaluate(expr)?;
                }
                self.environment.borrow_mut().define(name.lexeme.clone(), value);
                Ok(())
            }
            Stmt::Block { statements } => {
                let block_scope = Environment::new_enclosing(&self.environment);
                self.execute_block(statements, block_scope)
            }
            Stmt::If { condition, then_branch, else_branch } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)?;
                }
                Ok(())
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    self.execute(body)?;
                }
                Ok(())
            }
            Stmt::Function { declaration } => {
                // Like interpreting a literal: the compile-time function
                // shape becomes its runtime representation. The new value
                // closes over the environment where the declaration ran —
                // bindings added to that scope later are still visible
                // through it.
                let function = Function::UserDefined {
                    declaration: Rc::clone(declaration),
                    closure: Rc::clone(&self.environment),
                };
                self.environment
                    .borrow_mut()
                    .define(declaration.name.lexeme.clone(), Object::Function(function));
                Ok(())
            }
            Stmt::Return { value, .. } => {
                // A return can sit arbitrarily deep inside the function it
                // exits. Raising the dedicated Unwind variant jumps past
                // every containing statement back to the call frame.
                let mut return_value = Nil;
                if let Some(value) = value {
                    return_value = self.evaluate(value)?;
                }
                Err(Unwind::Return(return_value))
            }
            Stmt::Class { name, .. } => {
                // Two-step binding: the name exists (as nil) while the class
                // value is built, then the finished value is assigned over it.
                self.environment.borrow_mut().define(name.lexeme.clone(), Nil);
                let class = Object::Class(Rc::new(Class::new(name.lexeme.clone())));
                self.environment.borrow_mut().assign(name, class)?;
                Ok(())
            }
        }
    }

    /// Evaluates an Expr tree node and produces a value. For each kind of
    /// Expr — literal, operator, etc. — there is a corresponding chunk of
    /// code that knows how to reduce it to an Object.
    pub fn evaluate(&mut self, expression: &Expr) -> Result<Object, Unwind> {
        match expression {
            Expr::Literal { value } => Ok(value.clone()),
            Expr::Grouping { expression } => self.evaluate(expression),
            Expr::Unary { operator, right } => {
                let value = self.evaluate(right)?;
                match (operator.token_type, value) {
                    (MINUS, Number(n)) => Ok(Number(-n)),
                    (BANG, value) => Ok(Boolean(!value.is_truthy())),
                    _ => Err(RuntimeError::TypeError {
                        token: operator.clone(),
                        message: "Operand must be a number.".to_string(),
                    }
                    .into()),
                }
            }
            Expr::Binary { operator, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                match (operator.token_type, left, right) {
                    (STAR, Number(left), Number(right)) => Ok(Number(left * right)),
                    (SLASH, Number(left), Number(right)) => {
                        if right == 0.0 {
                            return Err(RuntimeError::DivisionByZero {
                                token: operator.clone(),
                            }
                            .into());
                        }
                        Ok(Number(left / right))
                    }
                    (PLUS, Number(left), Number(right)) => Ok(Number(left + right)),
                    (PLUS, String(left), String(right)) => Ok(String(left + right.as_str())),
                    // A number meeting a string is coerced through the
                    // canonical print rendering and concatenated.
                    (PLUS, String(left), Number(right)) => Ok(String(format!("{left}{right}"))),
                    (PLUS, Number(left), String(right)) => Ok(String(format!("{left}{right}"))),
                    (MINUS, Number(left), Number(right)) => Ok(Number(left - right)),
                    (GREATER, Number(left), Number(right)) => Ok(Boolean(left > right)),
                    (GREATER_EQUAL, Number(left), Number(right)) => Ok(Boolean(left >= right)),
                    (LESS, Number(left), Number(right)) => Ok(Boolean(left < right)),
                    (LESS_EQUAL, Number(left), Number(right)) => Ok(Boolean(left <= right)),
                    (BANG_EQUAL, left, right) => Ok(Boolean(!left.is_equal(&right))),
                    (EQUAL_EQUAL, left, right) => Ok(Boolean(left.is_equal(&right))),
                    (PLUS, _, _) => Err(RuntimeError::TypeError {
                        token: operator.clone(),
                        message: "Operands must be two numbers or two strings.".to_string(),
                    }
                    .into()),
                    _ => Err(RuntimeError::TypeError {
                        token: operator.clone(),
                        message: "Operands must be numbers.".to_string(),
                    }
                    .into()),
                }
            }
            Expr::Variable { id, name } => self.lookup_variable(*id, name),
            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;
                match self.locals.get(id) {
                    Some(distance) => {
                        self.environment
                            .borrow_mut()
                            .assign_at(*distance, name, value.clone());
                    }
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }
                // Assignment can be nested inside other expressions, so the
                // assigned value is also the expression's result.
                Ok(value)
            }
            Expr::Logical { operator, left, right } => {
                let left = self.evaluate(left)?;

                // Look at the left value to see if we can short-circuit.
                // Only if we can't does the right operand get evaluated.
                if operator.token_type == OR {
                    if left.is_truthy() {
                        return Ok(left);
                    }
                } else if !left.is_truthy() {
                    return Ok(left);
                }

                // A logic operator yields an operand with the appropriate
                // truthiness rather than a bare true/false:
                //   print "hi" or 2;    // "hi"
                //   print nil or "yes"; // "yes"
                self.evaluate(right)
            }
            Expr::Call { callee, arguments, paren } => {
                let callee = self.evaluate(callee)?;
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.evaluate(argument)?);
                }

                callee.call(self, args, paren)
            }
            Expr::Get { object, name } => {
                let object = self.evaluate(object)?;
                match object {
                    Instance(instance) => Ok(instance.borrow().get(name)?),
                    _ => Err(RuntimeError::NotAnInstance {
                        token: name.clone(),
                        message: "Only instances have properties.".to_string(),
                    }
                    .into()),
                }
            }
            Expr::Set { object, name, value } => {
                let object = self.evaluate(object)?;
                match object {
                    Instance(instance) => {
                        let value = self.evaluate(value)?;
                        instance.borrow_mut().set(name, value.clone());
                        Ok(value)
                    }
                    _ => Err(RuntimeError::NotAnInstance {
                        token: name.clone(),
                        message: "Only instances have fields.".to_string(),
                    }
                    .into()),
                }
            }
        }
    }

    /// Variable reads go through the resolved depth when the resolver found
    /// the binding in a local scope, and fall back to globals otherwise.
    fn lookup_variable(&self, id: usize, name: &Token) -> Result<Object, Unwind> {
        match self.locals.get(&id) {
            Some(distance) => Ok(self.environment.borrow().get_at(*distance, &name.lexeme)),
            None => Ok(self.globals.borrow().get(name)?),
        }
    }
}
