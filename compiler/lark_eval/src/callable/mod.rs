//! Callable values: native routines and modules.
//!
//! A native routine is a display name, an ordered list of parameter names
//! (exact arity), and a body that receives a `CallContext`. A module is a
//! zero-argument callable whose builder populates a fresh namespace with
//! routines and constants.
//!
//! Both variants remember the scope they were defined in (weakly, see
//! `WeakEnvironment`). The binder makes each invocation's scope a child of
//! that defining scope, never of the caller's.

use std::fmt;
use std::rc::Rc;

use lark_ir::Span;

use crate::context::CallContext;
use crate::environment::{Environment, WeakEnvironment};
use crate::errors::{EvalError, EvalResult};
use crate::value::{Heap, ModuleInstance, Value};

/// Body of a native routine.
pub type NativeFn = Rc<dyn Fn(&CallContext) -> EvalResult>;

/// Builder of a module namespace.
pub type ModuleFn = Rc<dyn Fn(&mut ModuleBuilder) -> Result<(), EvalError>>;

/// A host routine exposed as a guest callable.
#[derive(Clone)]
pub struct NativeFunction {
    name: Heap<str>,
    params: Rc<[&'static str]>,
    body: NativeFn,
    closure: WeakEnvironment,
}

impl NativeFunction {
    /// Create a routine defined in `closure`.
    pub fn new(
        name: &str,
        params: &[&'static str],
        closure: &Environment,
        body: impl Fn(&CallContext) -> EvalResult + 'static,
    ) -> Self {
        NativeFunction {
            name: Heap::name(name),
            params: Rc::from(params),
            body: Rc::new(body),
            closure: closure.downgrade(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter names, in binding order.
    pub fn params(&self) -> &[&'static str] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub(crate) fn name_handle(&self) -> &Heap<str> {
        &self.name
    }

    pub(crate) fn body(&self) -> &NativeFn {
        &self.body
    }

    pub(crate) fn closure(&self) -> &WeakEnvironment {
        &self.closure
    }
}

/// A zero-argument callable that builds a namespace.
#[derive(Clone)]
pub struct ModuleValue {
    name: Heap<str>,
    builder: ModuleFn,
    closure: WeakEnvironment,
}

impl ModuleValue {
    /// Create a module defined in `closure`.
    pub fn new(
        name: &str,
        closure: &Environment,
        builder: impl Fn(&mut ModuleBuilder) -> Result<(), EvalError> + 'static,
    ) -> Self {
        ModuleValue {
            name: Heap::name(name),
            builder: Rc::new(builder),
            closure: closure.downgrade(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_handle(&self) -> &Heap<str> {
        &self.name
    }

    pub(crate) fn builder(&self) -> &ModuleFn {
        &self.builder
    }

    pub(crate) fn closure(&self) -> &WeakEnvironment {
        &self.closure
    }
}

/// A guest callable.
#[derive(Clone)]
pub enum Callable {
    Native(NativeFunction),
    Module(ModuleValue),
}

impl Callable {
    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            Callable::Native(f) => f.name(),
            Callable::Module(m) => m.name(),
        }
    }

    /// Number of arguments the callable requires.
    pub fn arity(&self) -> usize {
        match self {
            Callable::Native(f) => f.arity(),
            Callable::Module(_) => 0,
        }
    }

    /// Declared parameter names; empty for modules.
    pub fn parameters(&self) -> &[&'static str] {
        match self {
            Callable::Native(f) => f.params(),
            Callable::Module(_) => &[],
        }
    }

    /// Invoke with positional arguments at a call site.
    pub fn call(&self, args: &[Value], span: Span) -> EvalResult {
        crate::call::call(self, args, span)
    }
}

/// Structural identity: same variant, same declared name.
impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callable::Native(a), Callable::Native(b)) => a.name() == b.name(),
            (Callable::Module(a), Callable::Module(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Native(func) => write!(f, "Native({}({}))", func.name(), func.params().join(", ")),
            Callable::Module(m) => write!(f, "Module({})", m.name()),
        }
    }
}

impl From<NativeFunction> for Callable {
    fn from(f: NativeFunction) -> Self {
        Callable::Native(f)
    }
}

impl From<ModuleValue> for Callable {
    fn from(m: ModuleValue) -> Self {
        Callable::Module(m)
    }
}

/// Populates one module instance.
///
/// Handed to a module's builder with a fresh scope; routines registered here
/// are qualified with the module name (`file.exists`) and defined in that
/// scope.
pub struct ModuleBuilder {
    name: Heap<str>,
    env: Environment,
    span: Span,
}

impl ModuleBuilder {
    pub(crate) fn new(name: Heap<str>, env: Environment, span: Span) -> Self {
        ModuleBuilder { name, env, span }
    }

    /// Name of the module being built.
    pub fn module_name(&self) -> &str {
        &self.name
    }

    /// Call site of the module invocation.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Register a native routine under `name`.
    pub fn function(
        &mut self,
        name: &str,
        params: &[&'static str],
        body: impl Fn(&CallContext) -> EvalResult + 'static,
    ) -> &mut Self {
        let qualified = format!("{}.{name}", &*self.name);
        let func = NativeFunction::new(&qualified, params, &self.env, body);
        self.env.set(name, Value::Callable(Callable::Native(func)));
        self
    }

    /// Register a constant under `name`.
    pub fn constant(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.env.set(name, value.into());
        self
    }

    pub(crate) fn finish(self) -> ModuleInstance {
        ModuleInstance::new(self.name, self.env)
    }
}
