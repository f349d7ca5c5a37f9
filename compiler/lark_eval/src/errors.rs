//! Error types for builtin dispatch.
//!
//! `EvalErrorKind` carries structured data for every failure the binding
//! layer can report. Factory functions (e.g. `wrong_arg_count()`) are the
//! public API: they populate both `kind` and `message`. The binder and the
//! argument helpers on `CallContext` attach the call-site span and the
//! originating environment.

use std::fmt;

use lark_ir::Span;

use crate::environment::Environment;
use crate::value::Value;

/// Result of a builtin invocation.
pub type EvalResult = Result<Value, EvalError>;

/// Coarse error category visible to guest code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A value's dynamic kind, the call arity, or a closed-set literal did
    /// not satisfy the routine's requirements.
    TypeError,
    /// The external operation could not complete.
    IOError,
    /// A name was not bound in the scope chain.
    NameError,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::TypeError => "TypeError",
            ErrorCategory::IOError => "IOError",
            ErrorCategory::NameError => "NameError",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed error category for structured diagnostics.
///
/// The `Display` impl produces the human-readable message stored on
/// `EvalError::message`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Calling convention
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    NotCallable {
        type_name: String,
    },

    // Argument validation
    TypeMismatch {
        routine: String,
        parameter: String,
        expected: String,
        got: String,
    },
    ElementTypeMismatch {
        routine: String,
        parameter: String,
        index: usize,
        expected: String,
        got: String,
    },
    InvalidLiteral {
        routine: String,
        parameter: String,
        value: String,
        allowed: Vec<String>,
    },
    InvalidBounds {
        routine: String,
        minimum: i64,
        maximum: i64,
    },

    // Name resolution
    UndefinedName {
        name: String,
    },
    NoSuchMember {
        module: String,
        member: String,
    },

    // Host operations
    NotFound {
        routine: String,
        action: String,
        path: String,
    },
    HostFault {
        routine: String,
        action: String,
        message: String,
    },
}

impl EvalErrorKind {
    /// The guest-visible category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ArityMismatch { .. }
            | Self::NotCallable { .. }
            | Self::TypeMismatch { .. }
            | Self::ElementTypeMismatch { .. }
            | Self::InvalidLiteral { .. }
            | Self::InvalidBounds { .. } => ErrorCategory::TypeError,
            Self::UndefinedName { .. } | Self::NoSuchMember { .. } => ErrorCategory::NameError,
            Self::NotFound { .. } | Self::HostFault { .. } => ErrorCategory::IOError,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),

            Self::TypeMismatch {
                routine,
                parameter,
                expected,
                got,
            } => write!(
                f,
                "{routine}: parameter `{parameter}` expects {expected}, got {got}"
            ),
            Self::ElementTypeMismatch {
                routine,
                parameter,
                index,
                expected,
                got,
            } => write!(
                f,
                "{routine}: element {index} of `{parameter}` expects {expected}, got {got}"
            ),
            Self::InvalidLiteral {
                routine,
                parameter,
                value,
                allowed,
            } => {
                let choices = allowed
                    .iter()
                    .map(|a| format!("\"{a}\""))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "{routine}: parameter `{parameter}` must be one of {choices} \
                     (case-insensitive), got \"{value}\""
                )
            }
            Self::InvalidBounds {
                routine,
                minimum,
                maximum,
            } => write!(
                f,
                "{routine}: minimum {minimum} must not exceed maximum {maximum}"
            ),

            Self::UndefinedName { name } => write!(f, "undefined name: {name}"),
            Self::NoSuchMember { module, member } => {
                write!(f, "module {module} has no member `{member}`")
            }

            Self::NotFound {
                routine,
                action,
                path,
            } => write!(f, "{routine}: cannot {action} `{path}`: it does not exist"),
            Self::HostFault {
                routine,
                action,
                message,
            } => write!(f, "{routine}: failed to {action}: {message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable error message; equals `kind.to_string()`.
    pub message: String,
    /// Call-site position pair.
    ///
    /// `Span::DUMMY` until the binder or `CallContext` locates the error.
    pub span: Span,
    /// Environment the failing call was evaluating in.
    pub env: Option<Environment>,
}

impl EvalError {
    /// Create an error from a structured kind.
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: Span::DUMMY,
            env: None,
        }
    }

    /// Guest-visible category.
    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Attach the call-site span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Attach the originating environment.
    #[must_use]
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Render the error as a guest string value.
    pub fn to_value(&self) -> Value {
        Value::string(self.to_string())
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.category(), self.span, self.message)
    }
}

impl std::error::Error for EvalError {}

// Calling convention errors

/// Wrong number of arguments supplied to a callable.
#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// Attempt to call a value that is not callable.
#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

// Argument validation errors

/// A parameter was bound to a value of the wrong kind.
#[cold]
pub fn wrong_arg_type(routine: &str, parameter: &str, expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        routine: routine.to_string(),
        parameter: parameter.to_string(),
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

/// An element of a collection parameter has the wrong kind.
#[cold]
pub fn wrong_element_type(
    routine: &str,
    parameter: &str,
    index: usize,
    expected: &str,
    got: &str,
) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ElementTypeMismatch {
        routine: routine.to_string(),
        parameter: parameter.to_string(),
        index,
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

/// A closed-set text parameter received a value outside the set.
#[cold]
pub fn invalid_literal(routine: &str, parameter: &str, value: &str, allowed: &[&str]) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidLiteral {
        routine: routine.to_string(),
        parameter: parameter.to_string(),
        value: value.to_string(),
        allowed: allowed.iter().map(ToString::to_string).collect(),
    })
}

/// A lower bound exceeds its upper bound.
#[cold]
pub fn invalid_bounds(routine: &str, minimum: i64, maximum: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBounds {
        routine: routine.to_string(),
        minimum,
        maximum,
    })
}

// Name resolution errors

/// Name not bound in any enclosing scope.
#[cold]
pub fn undefined_name(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedName {
        name: name.to_string(),
    })
}

/// Module namespace lookup miss.
#[cold]
pub fn no_such_member(module: &str, member: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuchMember {
        module: module.to_string(),
        member: member.to_string(),
    })
}

// Host operation errors

/// A path the operation requires does not exist.
#[cold]
pub fn not_found(routine: &str, action: &str, path: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotFound {
        routine: routine.to_string(),
        action: action.to_string(),
        path: path.to_string(),
    })
}

/// The external operation faulted.
#[cold]
pub fn host_fault(routine: &str, action: &str, message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::HostFault {
        routine: routine.to_string(),
        action: action.to_string(),
        message: message.to_string(),
    })
}
