//! The argument binder and dispatcher.
//!
//! Invoking a native routine:
//! 1. Arity check: the number of supplied arguments must equal the number of
//!    declared parameters, otherwise `TypeError` at the call site. No
//!    argument is inspected before this check.
//! 2. A fresh scope is created as a child of the routine's defining scope, so
//!    parameter bindings never leak into or read from the caller's scope.
//! 3. Parameters are bound positionally, in declared order.
//! 4. The body runs with that scope and the call-site span.
//! 5. Its result is returned unchanged.
//!
//! Invoking a module follows the same arity rule (zero arguments) and then
//! hands a fresh child scope to the module's builder.

use lark_ir::Span;
use tracing::{debug, trace};

use crate::callable::{Callable, ModuleBuilder, ModuleValue, NativeFunction};
use crate::context::CallContext;
use crate::environment::{Environment, WeakEnvironment};
use crate::errors::{not_callable, wrong_arg_count, EvalError, EvalResult};
use crate::value::Value;

/// Invoke a callable with positional arguments at a call site.
pub fn call(callable: &Callable, args: &[Value], span: Span) -> EvalResult {
    match callable {
        Callable::Native(func) => call_native(func, args, span),
        Callable::Module(module) => instantiate_module(module, args, span),
    }
}

/// Invoke a value, failing with a `TypeError` when it is not callable.
pub fn call_value(value: &Value, args: &[Value], span: Span) -> EvalResult {
    match value {
        Value::Callable(callable) => call(callable, args, span),
        other => Err(not_callable(other.type_name()).with_span(span)),
    }
}

fn call_native(func: &NativeFunction, args: &[Value], span: Span) -> EvalResult {
    trace!(routine = func.name(), args = args.len(), %span, "dispatch native routine");
    check_arity(func.name(), func.arity(), args.len(), span)?;

    let env = invocation_scope(func.closure());
    for (param, arg) in func.params().iter().zip(args) {
        env.set(*param, arg.clone());
    }

    let ctx = CallContext::new(func.name_handle().clone(), env, span);
    let result = (func.body())(&ctx);
    if let Err(err) = &result {
        debug!(routine = func.name(), category = %err.category(), %span, "native routine failed");
    }
    result
}

fn instantiate_module(module: &ModuleValue, args: &[Value], span: Span) -> EvalResult {
    trace!(module = module.name(), %span, "instantiate module");
    check_arity(module.name(), 0, args.len(), span)?;

    let env = invocation_scope(module.closure());
    let mut builder = ModuleBuilder::new(module.name_handle().clone(), env, span);
    (module.builder())(&mut builder).inspect_err(|err| {
        debug!(module = module.name(), error = %err, "module construction failed");
    })?;

    let instance = builder.finish();
    debug!(
        module = instance.name(),
        members = instance.environment().len(),
        "module instantiated"
    );
    Ok(Value::Module(instance))
}

fn check_arity(name: &str, expected: usize, got: usize, span: Span) -> Result<(), EvalError> {
    if expected == got {
        Ok(())
    } else {
        Err(wrong_arg_count(name, expected, got).with_span(span))
    }
}

/// Child of the defining scope, or a fresh root once that scope is gone.
fn invocation_scope(closure: &WeakEnvironment) -> Environment {
    closure
        .upgrade()
        .map_or_else(Environment::new, |defining| defining.child())
}
