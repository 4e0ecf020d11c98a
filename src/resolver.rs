use crate::error;
use crate::error::ResolveError;
use crate::expr::Expr;
use crate::stmt::{FunctionDeclaration, Stmt};
use crate::token::Token;
use std::collections::HashMap;

/// What the resolver knows about one local binding while its scope is open.
/// `defined` flips once the initializer has been resolved; `read` records
/// whether anything ever referenced the binding; `order` is the declaration
/// order inside the scope so diagnostics come out in a stable order.
struct VariableState {
    token: Token,
    defined: bool,
    read: bool,
    order: usize,
}

/// Tracks whether we are currently inside a function body, so `return` at
/// the top level can be rejected before anything runs.
#[derive(Clone, Copy, PartialEq)]
enum FunctionType {
    None,
    Function,
    Method,
}

/// The resolution pass sits between the parser and the interpreter: a
/// single walk over the tree that computes, for every variable reference,
/// how many environments out its binding lives. It works like a
/// mini-interpreter with no control flow — both branches of an `if` are
/// resolved, loop bodies exactly once.
///
/// The scope stack only models local block scopes. Top-level names are not
/// tracked; a reference that escapes every scope on the stack is global and
/// simply gets no entry in the output map.
pub struct Resolver {
    scopes: Vec<HashMap<String, VariableState>>,
    resolved: HashMap<usize, usize>,
    current_function: FunctionType,
}

impl Resolver {
    pub fn new() -> Resolver {
        Self {
            scopes: Vec::new(),
            resolved: HashMap::new(),
            current_function: FunctionType::None,
        }
    }

    /// Resolves a whole program and hands back the node-id → depth map the
    /// interpreter evaluates against. Static errors are reported along the
    /// way (as many as can be found); the caller checks the error flag
    /// before letting the program run.
    pub fn resolve(mut self, statements: &[Stmt]) -> HashMap<usize, usize> {
        self.resolve_block(statements);
        self.resolved
    }

    fn resolve_block(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_statement(statement);
        }
    }

    fn resolve_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block { statements } => {
                // A block introduces a new scope for the statements it
                // contains. Desugared `for` loops arrive here too, giving
                // the loop head its own scope.
                self.begin_scope();
                self.resolve_block(statements);
                self.end_scope();
            }
            Stmt::Var { name, initializer } => {
                // Binding is split into two steps, declaring then defining,
                // so an initializer that mentions the name being introduced
                // can be caught in between.
                self.declare(name);
                if let Some(expr) = initializer {
                    self.resolve_expression(expr);
                }
                self.define(name);
            }
            Stmt::Function { declaration } => {
                // Declared and defined eagerly, before resolving the body,
                // which lets the function recursively refer to itself.
                self.declare(&declaration.name);
                self.define(&declaration.name);
                self.resolve_function(declaration, FunctionType::Function);
            }
            Stmt::Class { name, methods } => {
                self.declare(name);
                self.define(name);
                for method in methods {
                    self.resolve_function(method, FunctionType::Method);
                }
            }
            Stmt::Expression { expression } => {
                self.resolve_expression(expression);
            }
            Stmt::Print { expression } => {
                self.resolve_expression(expression);
            }
            Stmt::If { condition, then_branch, else_branch } => {
                // Resolution is different from interpretation here: there is
                // no control flow, so we resolve the condition and any branch
                // that *could* run.
                self.resolve_expression(condition);
                self.resolve_statement(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_statement(else_branch);
                }
            }
            Stmt::While { condition, body } => {
                self.resolve_expression(condition);
                self.resolve_statement(body);
            }
            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionType::None {
                    error::resolve_error(&ResolveError::ReturnAtTopLevel {
                        token: keyword.clone(),
                    });
                }
                if let Some(expr) = value {
                    self.resolve_expression(expr);
                }
            }
        }
    }

    fn resolve_expression(&mut self, expression: &Expr) {
        match expression {
            Expr::Variable { id, name } => {
                // A variable whose innermost-scope entry is declared but not
                // yet defined is being read inside its own initializer.
                if let Some(state) = self.scopes.last().and_then(|scope| scope.get(&name.lexeme)) {
                    if !state.defined {
                        error::resolve_error(&ResolveError::SelfReferentialInit {
                            token: name.clone(),
                        });
                    }
                }
                self.resolve_local(*id, name);
            }
            Expr::Assign { id, name, value } => {
                self.resolve_expression(value);
                self.resolve_local(*id, name);
            }
            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expression(left);
                self.resolve_expression(right);
            }
            Expr::Call { callee, arguments, .. } => {
                self.resolve_expression(callee);
                for argument in arguments {
                    self.resolve_expression(argument);
                }
            }
            Expr::Get { object, .. } => {
                // Properties are looked up dynamically, so only the
                // expression left of the dot resolves statically.
                self.resolve_expression(object);
            }
            Expr::Set { object, value, .. } => {
                self.resolve_expression(value);
                self.resolve_expression(object);
            }
            Expr::Grouping { expression } => {
                self.resolve_expression(expression);
            }
            Expr::Unary { right, .. } => {
                self.resolve_expression(right);
            }
            Expr::Literal { .. } => {
                // A literal mentions no variables and has no subexpressions.
            }
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Popping a scope is the last chance to notice bindings nothing ever
    /// read; they are worth a warning but never an error.
    fn end_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            let mut states: Vec<VariableState> = scope.into_values().collect();
            states.sort_by_key(|state| state.order);
            for state in states {
                if !state.read {
                    error::warn_token(&state.token, "Local variable is never read.");
                }
            }
        }
    }

    /// Adds the name to the innermost scope, marked "not ready yet". Two
    /// declarations of the same name in one scope is a static error —
    /// shadowing is for enclosing scopes, not for the scope you are in.
    fn declare(&mut self, name: &Token) {
        if let Some(innermost_scope) = self.scopes.last_mut() {
            if innermost_scope.contains_key(&name.lexeme) {
                error::resolve_error(&ResolveError::AlreadyDeclared { token: name.clone() });
            }
            let order = innermost_scope.len();
            innermost_scope.insert(
                name.lexeme.clone(),
                VariableState {
                    token: name.clone(),
                    defined: false,
                    read: false,
                    order,
                },
            );
        }
    }

    /// Marks the binding as fully initialized and available for use.
    fn define(&mut self, name: &Token) {
        if let Some(innermost_scope) = self.scopes.last_mut() {
            if let Some(state) = innermost_scope.get_mut(&name.lexeme) {
                state.defined = true;
            }
        }
    }

    /// Walks the scope stack from innermost outward. The first scope holding
    /// the name fixes the reference's depth for all time; that depth goes in
    /// the output map keyed by the referencing node's identity. No hit means
    /// the reference is global and gets no entry.
    fn resolve_local(&mut self, id: usize, name: &Token) {
        for (distance, scope) in self.scopes.iter_mut().rev().enumerate() {
            if let Some(state) = scope.get_mut(&name.lexeme) {
                state.read = true;
                self.resolved.insert(id, distance);
                return;
            }
        }
    }

    /// Unlike the interpreter — which doesn't touch a body until the
    /// function is called — static analysis dives into the body right here,
    /// with the parameters bound in a fresh scope. A nested function keeps
    /// the enclosing function's scopes on the stack below it, which is
    /// exactly how free variables end up resolving into the closure.
    fn resolve_function(&mut self, declaration: &FunctionDeclaration, function_type: FunctionType) {
        let enclosing_function = std::mem::replace(&mut self.current_function, function_type);

        self.begin_scope();
        for param in &declaration.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve_block(&declaration.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }
}
