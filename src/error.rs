use crate::token::{Token, TokenType};
use crate::value::object::Object;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

static HAD_ERROR: AtomicBool = AtomicBool::new(false);
static HAD_RUNTIME_ERROR: AtomicBool = AtomicBool::new(false);

/// Marker returned by the parser when it has already reported a syntax error
/// and wants to unwind to a statement boundary for synchronization.
#[derive(Debug)]
pub struct ParseError;

/// A static error found by the resolver. These are collected — resolution
/// keeps going so the user sees as many as possible — but any one of them
/// stops the program from being evaluated.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("A variable with this name already exists in current scope.")]
    AlreadyDeclared { token: Token },

    #[error("Can't read local variable in its own initializer.")]
    SelfReferentialInit { token: Token },

    #[error("Can't return in top-level code.")]
    ReturnAtTopLevel { token: Token },
}

impl ResolveError {
    pub fn token(&self) -> &Token {
        match self {
            ResolveError::AlreadyDeclared { token }
            | ResolveError::SelfReferentialInit { token }
            | ResolveError::ReturnAtTopLevel { token } => token,
        }
    }
}

/// An error raised while evaluating. Every variant carries the token it was
/// raised at so the diagnostic can point into the source.
#[derive(Debug, Clone, Error)]
pub enum RuntimeError {
    #[error("Undefined variable '{}'.", .token.lexeme)]
    UndefinedVariable { token: Token },

    #[error("Undefined property '{}'.", .token.lexeme)]
    UndefinedProperty { token: Token },

    #[error("{message}")]
    TypeError { token: Token, message: String },

    #[error("Division by zero.")]
    DivisionByZero { token: Token },

    #[error("Expected {expected} arguments but got {got}.")]
    ArityError { token: Token, expected: usize, got: usize },

    #[error("Can only call functions and classes.")]
    NotCallable { token: Token },

    #[error("{message}")]
    NotAnInstance { token: Token, message: String },
}

impl RuntimeError {
    pub fn token(&self) -> &Token {
        match self {
            RuntimeError::UndefinedVariable { token }
            | RuntimeError::UndefinedProperty { token }
            | RuntimeError::TypeError { token, .. }
            | RuntimeError::DivisionByZero { token }
            | RuntimeError::ArityError { token, .. }
            | RuntimeError::NotCallable { token }
            | RuntimeError::NotAnInstance { token, .. } => token,
        }
    }
}

/// What propagates out of statement execution. `Return` is not an error: it
/// unwinds through any nesting of blocks and loops until the enclosing call
/// frame absorbs it. Keeping it a separate variant (rather than a catchable
/// exception) makes the control path visible in every signature it crosses.
#[derive(Debug)]
pub enum Unwind {
    Error(RuntimeError),
    Return(Object),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

pub fn error(line: usize, message: &str) {
    report(line, "", message);
}

pub fn error_token(token: &Token, message: &str) {
    if token.token_type == TokenType::EOF {
        report(token.line, " at end", message);
    } else {
        report(token.line, &format!(" at '{}'", token.lexeme), message);
    }
}

pub fn resolve_error(error: &ResolveError) {
    error_token(error.token(), &error.to_string());
}

pub fn runtime_error(error: &RuntimeError) {
    let token = error.token();
    eprintln!("[line {}] Error at '{}': {}", token.line, token.lexeme, error);
    HAD_RUNTIME_ERROR.store(true, Ordering::Relaxed);
}

/// Non-fatal diagnostics, currently only the resolver's unused-local notes.
pub fn warn_token(token: &Token, message: &str) {
    eprintln!("[line {}] Warning at '{}': {}", token.line, token.lexeme, message);
}

fn report(line: usize, location: &str, message: &str) {
    eprintln!("[line {line}] Error{location}: {message}");
    HAD_ERROR.store(true, Ordering::Relaxed);
}

pub fn had_error() -> bool {
    HAD_ERROR.load(Ordering::Relaxed)
}

pub fn had_runtime_error() -> bool {
    HAD_RUNTIME_ERROR.load(Ordering::Relaxed)
}

/// The REPL clears both flags after each line so one bad entry
/// doesn't poison the rest of the session.
pub fn reset() {
    HAD_ERROR.store(false, Ordering::Relaxed);
    HAD_RUNTIME_ERROR.store(false, Ordering::Relaxed);
}
