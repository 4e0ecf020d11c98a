use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Environments are shared: a block holds one while it runs, and any closure
/// declared inside it keeps the same cell alive afterwards. Bindings added
/// to a scope after a closure captured it are visible through the closure.
pub type MutableEnvironment = Rc<RefCell<Environment>>;

/// A single lexical scope: the bindings it owns plus a parent link. The
/// chain of parent links ends at the globals environment, which has none.
/// The parent link is never reassigned after construction; only the local
/// map mutates.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Object>,
    enclosing: Option<MutableEnvironment>,
}

impl Environment {
    /// Constructor for the global scope’s environment
    pub fn global() -> MutableEnvironment {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// This constructor creates a new local scope nested inside the given outer one.
    pub fn new_enclosing(enclosing: &MutableEnvironment) -> MutableEnvironment {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            enclosing: Some(Rc::clone(enclosing)),
        }))
    }

    /// A new variable is always declared in the current innermost scope,
    /// shadowing any binding of the same name further out. Redefining a
    /// name that already exists here silently overwrites it; for local
    /// scopes the resolver has already rejected that at resolution time.
    pub fn define(&mut self, name: String, value: Object) {
        self.values.insert(name, value);
    }

    /// The key difference between assign and define is that assign is not
    /// allowed to create a new binding. It walks the chain from innermost
    /// outward and mutates the first occurrence, so it's a runtime error if
    /// the name doesn't exist anywhere on the chain.
    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        match &self.enclosing {
            Some(outer) => outer.borrow_mut().assign(name, value),
            None => Err(RuntimeError::UndefinedVariable { token: name.clone() }),
        }
    }

    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            return Ok(value.clone());
        }

        match &self.enclosing {
            Some(outer) => outer.borrow().get(name),
            None => Err(RuntimeError::UndefinedVariable { token: name.clone() }),
        }
    }

    /// Reads a binding at an exact distance up the chain. The resolver has
    /// already proven the binding is there, so a miss is not a user error —
    /// it means the static and runtime scope structures disagree.
    pub fn get_at(&self, distance: usize, name: &str) -> Object {
        if distance == 0 {
            match self.values.get(name) {
                Some(value) => value.clone(),
                None => panic!("resolved variable '{name}' is missing from its scope"),
            }
        } else {
            match &self.enclosing {
                Some(outer) => outer.borrow().get_at(distance - 1, name),
                None => panic!("environment chain is shorter than the resolved depth for '{name}'"),
            }
        }
    }

    /// Symmetric to get_at: mutates the binding at an exact distance.
    pub fn assign_at(&mut self, distance: usize, name: &Token, value: Object) {
        if distance == 0 {
            if !self.values.contains_key(&name.lexeme) {
                panic!("resolved variable '{}' is missing from its scope", name.lexeme);
            }
            self.values.insert(name.lexeme.clone(), value);
        } else {
            match &self.enclosing {
                Some(outer) => outer.borrow_mut().assign_at(distance - 1, name, value),
                None => panic!(
                    "environment chain is shorter than the resolved depth for '{}'",
                    name.lexeme
                ),
            }
        }
    }
}
