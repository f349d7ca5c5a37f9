#![allow(
    clippy::result_large_err,
    reason = "EvalError is fundamental; boxing would add complexity across the crate"
)]
//! Lark Eval - builtin binding and dispatch core for the Lark runtime.
//!
//! This crate turns host routines into guest-callable values and defines the
//! single calling convention every builtin shares.
//!
//! # Architecture
//!
//! - `Value`: closed tagged union of guest values, with `as_text` /
//!   `as_sequence` normalizing the two text kinds and the two sequence kinds
//! - `Environment`: name-to-value scopes with parent-chained lookup
//! - `Callable`: native routines (name + parameters + body) and modules
//!   (name + builder producing a namespace)
//! - `call`: the binder (arity check, fresh child scope, positional binding)
//! - `CallContext`: what a routine body sees; centralizes argument
//!   extraction and error construction
//! - `catch_fault`: the boundary that turns host I/O failures and panics into
//!   values instead of unwinding into the guest
//! - `EvalError` / `EvalResult`: the one failure channel

mod call;
mod callable;
mod context;
pub mod errors;
mod environment;
mod fault;
mod value;

pub use call::{call, call_value};
pub use callable::{Callable, ModuleBuilder, ModuleFn, ModuleValue, NativeFn, NativeFunction};
pub use context::CallContext;
pub use environment::{Environment, WeakEnvironment};
pub use errors::{ErrorCategory, EvalError, EvalErrorKind, EvalResult};
pub use fault::{catch_fault, HostFault};
pub use value::{Heap, ModuleInstance, Shared, Value};

pub use lark_ir::Span;
