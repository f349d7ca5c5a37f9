//! What a native routine body sees.
//!
//! `CallContext` holds the invocation scope (parameters already bound), the
//! call-site span and the routine's display name. Its accessors are the only
//! place argument kinds are checked: each reads one parameter, normalizes
//! it, and on mismatch returns a `TypeError` naming the routine, the
//! parameter, the expected kind and the received kind, positioned at the
//! call site. Bodies read parameters in declared order with `?`, so the first
//! invalid parameter is the one reported and nothing after it runs.

use std::io;

use lark_ir::Span;
use tracing::debug;

use crate::environment::Environment;
use crate::errors::{
    host_fault, invalid_literal, not_found, wrong_arg_type, wrong_element_type, EvalError,
    EvalResult,
};
use crate::fault::catch_fault;
use crate::value::{Heap, Value};

const TEXT: &str = "text (string or character_list)";
const COLLECTION: &str = "collection (array or list)";
const INTEGER: &str = "integer";

/// Invocation state passed to a native routine body.
pub struct CallContext {
    routine: Heap<str>,
    env: Environment,
    span: Span,
}

impl CallContext {
    pub(crate) fn new(routine: Heap<str>, env: Environment, span: Span) -> Self {
        CallContext { routine, env, span }
    }

    /// Display name of the running routine.
    pub fn routine(&self) -> &str {
        &self.routine
    }

    /// The invocation scope.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Call-site position pair.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Position an error at this call and record this scope as its origin.
    #[must_use]
    pub fn locate(&self, err: EvalError) -> EvalError {
        err.with_span(self.span).with_env(self.env.clone())
    }

    // Argument access

    /// Raw value bound to `param`.
    pub fn value(&self, param: &str) -> EvalResult {
        self.env.get(param).map_err(|e| self.locate(e))
    }

    /// Text parameter, normalized from either text kind.
    pub fn text(&self, param: &str) -> Result<String, EvalError> {
        let value = self.value(param)?;
        match value.as_text() {
            Some(text) => Ok(text.into_owned()),
            None => Err(self.type_error(param, TEXT, &value)),
        }
    }

    /// Collection parameter, normalized from either sequence kind.
    pub fn sequence(&self, param: &str) -> Result<Vec<Value>, EvalError> {
        let value = self.value(param)?;
        value
            .as_sequence()
            .ok_or_else(|| self.type_error(param, COLLECTION, &value))
    }

    /// Collection parameter whose every element must be text.
    ///
    /// Elements are checked in order; the first non-text element is reported.
    pub fn texts(&self, param: &str) -> Result<Vec<String>, EvalError> {
        self.sequence(param)?
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_text().map(|t| t.into_owned()).ok_or_else(|| {
                    self.locate(wrong_element_type(
                        &self.routine,
                        param,
                        index,
                        TEXT,
                        item.type_name(),
                    ))
                })
            })
            .collect()
    }

    /// Integer parameter.
    pub fn int(&self, param: &str) -> Result<i64, EvalError> {
        match self.value(param)? {
            Value::Int(n) => Ok(n),
            other => Err(self.type_error(param, INTEGER, &other)),
        }
    }

    /// Text parameter restricted to a closed set, compared ignoring ASCII case.
    ///
    /// Returns the matching entry of `allowed` in its canonical spelling.
    pub fn one_of(&self, param: &str, allowed: &[&'static str]) -> Result<&'static str, EvalError> {
        let text = self.text(param)?;
        allowed
            .iter()
            .copied()
            .find(|choice| choice.eq_ignore_ascii_case(&text))
            .ok_or_else(|| self.locate(invalid_literal(&self.routine, param, &text, allowed)))
    }

    // Error construction

    /// `TypeError` for a parameter bound to the wrong kind.
    #[cold]
    pub fn type_error(&self, param: &str, expected: &str, got: &Value) -> EvalError {
        self.locate(wrong_arg_type(&self.routine, param, expected, got.type_name()))
    }

    /// `IOError` for a missing precondition path.
    #[cold]
    pub fn not_found(&self, action: &str, path: &str) -> EvalError {
        self.locate(not_found(&self.routine, action, path))
    }

    // Delegation

    /// Run one external operation behind the fault boundary.
    ///
    /// `action` names the attempted operation and its operands
    /// (e.g. "copy file `a` to `b`"); it becomes part of the `IOError`
    /// message when the operation fails.
    pub fn guard<T>(
        &self,
        action: &str,
        op: impl FnOnce() -> io::Result<T>,
    ) -> Result<T, EvalError> {
        catch_fault(op).map_err(|fault| {
            debug!(routine = self.routine(), action, %fault, "native operation failed");
            self.locate(host_fault(&self.routine, action, fault.message()))
        })
    }
}
