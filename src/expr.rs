use crate::token::Token;
use crate::value::object::Object;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Hands out the identity for a new Variable or Assign node. The resolver's
/// output map is keyed on these ids, so they must stay unique for the life
/// of the process — a REPL parses many programs against one interpreter.
pub fn next_id() -> usize {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Expr is one of the two node families in the Abstract Syntax Tree. The
/// parser produces the tree; the resolver and interpreter only ever read it.
#[derive(Clone, Debug)]
pub enum Expr {
    Literal { value: Object },
    Unary { operator: Token, right: Box<Expr> },
    Binary {
        operator: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Kept separate from Binary because 'and'/'or' must short-circuit:
    /// the right operand is only evaluated when the left doesn't decide.
    Logical {
        operator: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Grouping { expression: Box<Expr> },
    Variable { id: usize, name: Token },
    Assign {
        id: usize,
        name: Token,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        /// The closing parenthesis, kept for error reporting.
        paren: Token,
        arguments: Vec<Expr>,
    },
    Get { object: Box<Expr>, name: Token },
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },
}
