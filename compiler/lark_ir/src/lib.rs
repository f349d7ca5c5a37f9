//! Lark IR - shared source-position types.
//!
//! The runtime crates thread call-site positions through every builtin
//! invocation so that failures can be reported against guest source. This
//! crate owns that position pair so the evaluator and the standard library
//! agree on one representation.

mod span;

pub use span::{Span, SpanError};
