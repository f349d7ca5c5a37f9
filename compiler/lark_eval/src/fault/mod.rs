//! Fault boundary around native operations.
//!
//! Every external call a builtin makes runs inside `catch_fault`. An
//! `io::Error` becomes a `HostFault` carrying its message; a panic raised by
//! the host code is caught and its payload message becomes a `HostFault`
//! too. Neither reaches the guest as anything but an `IOError` value.

use std::any::Any;
use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

/// A failed native operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostFault {
    message: String,
}

impl HostFault {
    pub fn new(message: impl Into<String>) -> Self {
        HostFault {
            message: message.into(),
        }
    }

    /// Build from a caught panic payload.
    pub fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "native operation panicked".to_string()
        };
        HostFault { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<io::Error> for HostFault {
    fn from(err: io::Error) -> Self {
        HostFault::new(err.to_string())
    }
}

impl fmt::Display for HostFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HostFault {}

/// Run `op`, converting an I/O error or a panic into a `HostFault`.
pub fn catch_fault<T>(op: impl FnOnce() -> io::Result<T>) -> Result<T, HostFault> {
    match panic::catch_unwind(AssertUnwindSafe(op)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(HostFault::from(err)),
        Err(payload) => {
            let fault = HostFault::from_payload(payload.as_ref());
            warn!(message = fault.message(), "native operation panicked");
            Err(fault)
        }
    }
}
