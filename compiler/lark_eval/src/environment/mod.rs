//! Scoped environments for builtin dispatch.
//!
//! An `Environment` is a handle to one scope: a name-to-value map plus an
//! optional parent that lookups fall through to on a miss. Writes only ever
//! touch the scope the handle points at. Every callable invocation and every
//! module instantiation gets a fresh child scope.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::errors::{undefined_name, EvalError};
use crate::value::Value;

/// A single scope containing bindings.
struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<Environment>,
}

/// Handle to a scope.
///
/// Cloning the handle shares the scope; it does not copy bindings. The type
/// is single-threaded (`Rc`), matching the ownership model of module
/// instances.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Scope>>);

/// Non-owning handle held by callables for their defining scope.
///
/// Module namespaces contain routines whose defining scope is that same
/// namespace; holding it weakly keeps the namespace collectable.
#[derive(Clone)]
pub struct WeakEnvironment(Weak<RefCell<Scope>>);

impl Environment {
    /// Create a new empty root scope.
    pub fn new() -> Self {
        Environment(Rc::new(RefCell::new(Scope {
            bindings: FxHashMap::default(),
            parent: None,
        })))
    }

    /// Create an empty scope whose lookups chain to `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Environment(Rc::new(RefCell::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        })))
    }

    /// Parent scope, if any.
    pub fn parent(&self) -> Option<Environment> {
        self.0.borrow().parent.clone()
    }

    /// Look up a name in this scope or any ancestor.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let scope = self.0.borrow();
        if let Some(value) = scope.bindings.get(name) {
            return Some(value.clone());
        }
        scope.parent.as_ref().and_then(|parent| parent.lookup(name))
    }

    /// Look up a name, failing with a `NameError` when it is unbound.
    pub fn get(&self, name: &str) -> Result<Value, EvalError> {
        self.lookup(name)
            .ok_or_else(|| undefined_name(name).with_env(self.clone()))
    }

    /// Look up a name in this scope only.
    pub fn lookup_local(&self, name: &str) -> Option<Value> {
        self.0.borrow().bindings.get(name).cloned()
    }

    /// Whether this scope itself binds `name`.
    pub fn contains_local(&self, name: &str) -> bool {
        self.0.borrow().bindings.contains_key(name)
    }

    /// Bind `name` in this scope, shadowing any ancestor binding.
    ///
    /// Ancestors are never modified.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Names bound in this scope, sorted.
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.borrow().bindings.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Bindings of this scope, sorted by name.
    pub fn local_bindings(&self) -> Vec<(String, Value)> {
        let mut bindings: Vec<(String, Value)> = self
            .0
            .borrow()
            .bindings
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        bindings.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        bindings
    }

    /// Number of bindings in this scope.
    pub fn len(&self) -> usize {
        self.0.borrow().bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().bindings.is_empty()
    }

    /// Whether both handles point at the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Non-owning handle to this scope.
    pub fn downgrade(&self) -> WeakEnvironment {
        WeakEnvironment(Rc::downgrade(&self.0))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl WeakEnvironment {
    /// The scope, if something still owns it.
    pub fn upgrade(&self) -> Option<Environment> {
        self.0.upgrade().map(Environment)
    }
}

// Scopes can contain callables that point back at them, so Debug prints
// names and depth instead of recursing into values.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0usize;
        let mut current = self.parent();
        while let Some(env) = current {
            depth = depth.saturating_add(1);
            current = env.parent();
        }
        f.debug_struct("Environment")
            .field("names", &self.local_names())
            .field("depth", &depth)
            .finish()
    }
}

impl fmt::Debug for WeakEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(env) => f.debug_tuple("WeakEnvironment").field(&env).finish(),
            None => write!(f, "WeakEnvironment(<dropped>)"),
        }
    }
}
