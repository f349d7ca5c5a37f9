//! Shared fixtures for module tests.

use std::path::PathBuf;

use lark_eval::{
    call_value, Environment, EvalResult, ModuleInstance, ModuleValue, Span, Value,
};
use tempfile::TempDir;

use crate::host::{FixedWorkingDirectory, Host, HostConfig};

/// Call-site span used by every fixture call.
pub(crate) const SPAN: Span = Span::new(100, 140);

/// A temporary directory used as the working directory of a seeded host.
pub(crate) struct Fixture {
    pub dir: TempDir,
    pub host: Host,
    pub env: Environment,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let host = HostConfig::new()
            .working_directory(FixedWorkingDirectory::new(dir.path()))
            .random_seed(7)
            .build();
        Fixture {
            dir,
            host,
            env: Environment::new(),
        }
    }

    /// Instantiate the module returned by `make`.
    pub fn module(&self, make: fn(&Host, &Environment) -> ModuleValue) -> ModuleInstance {
        let module = Value::Callable(make(&self.host, &self.env).into());
        match call_value(&module, &[], SPAN).unwrap() {
            Value::Module(instance) => instance,
            other => panic!("expected a module instance, got {other:?}"),
        }
    }

    /// Absolute path of `name` inside the fixture directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// The fixture directory as a guest string.
    pub fn root_str(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Absolute path of `name` as a guest string.
    pub fn path_str(&self, name: &str) -> String {
        self.path(name).to_string_lossy().into_owned()
    }
}

/// Invoke `routine` on a module instance at the fixture span.
pub(crate) fn invoke(instance: &ModuleInstance, routine: &str, args: &[Value]) -> EvalResult {
    call_value(&instance.member(routine)?, args, SPAN)
}
