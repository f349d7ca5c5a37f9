#![allow(
    clippy::result_large_err,
    reason = "EvalError is the shared failure type of lark_eval; boxing it here alone buys nothing"
)]
//! Lark Stdlib - builtin modules for the Lark runtime.
//!
//! Every builtin is a module callable built on `lark_eval`: invoking it with
//! no arguments yields a namespace of native routines and constants.
//!
//! # Modules
//!
//! - `file`: single-file operations
//! - `folder`: directories and the working directory
//! - `path`: lexical path manipulation and temp paths
//! - `random`: a generator per module instance
//! - `std/integer`, `std/float`, `std/string`, `std/character_list`
//!
//! Host services (working directory, random seed) come from a `Host` built
//! with `HostConfig`.

pub mod file;
pub mod folder;
pub mod host;
pub mod path;
pub mod random;
pub mod standard;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Test fixtures use unwrap for brevity")]
mod test_helpers;

use std::env;
use std::sync::Once;

use lark_eval::{Environment, ModuleValue, Value};
use tracing::debug;

pub use host::{
    ConfigError, FixedWorkingDirectory, Host, HostConfig, ProcessWorkingDirectory,
    WorkingDirectory,
};

/// Builds one builtin module defined in a given scope.
pub type ModuleConstructor = fn(&Host, &Environment) -> ModuleValue;

/// Every builtin, in registration order.
const BUILTINS: [ModuleConstructor; 8] = [
    file::module,
    folder::module,
    path::module,
    random::module,
    standard::integer,
    standard::float,
    standard::string,
    standard::character_list,
];

/// Environment variable holding the tracing filter.
pub const LOG_VAR: &str = "LARK_LOG";

/// Set to `1` for indented, span-nested log output.
pub const LOG_TREE_VAR: &str = "LARK_LOG_TREE";

static TRACING_INIT: Once = Once::new();

/// The builtin module callables, defined in `env`.
pub fn builtin_modules(host: &Host, env: &Environment) -> Vec<ModuleValue> {
    BUILTINS.iter().map(|make| make(host, env)).collect()
}

/// Bind every builtin module into `env` under its guest name.
pub fn register_builtin_modules(env: &Environment, host: &Host) {
    for module in builtin_modules(host, env) {
        let name = module.name().to_string();
        env.set(name, Value::Callable(module.into()));
    }
    debug!(count = BUILTINS.len(), "registered builtin modules");
}

/// Initialize tracing for Lark binaries.
///
/// Reads the filter from `LARK_LOG`, falling back to `RUST_LOG`, and does
/// nothing when neither is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(directives) = env::var(LOG_VAR).or_else(|_| env::var("RUST_LOG")) else {
            return;
        };
        let filter = EnvFilter::new(directives);

        // A host that installed its own subscriber keeps it.
        let _ = if env::var(LOG_TREE_VAR).is_ok_and(|v| v == "1") {
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init()
        };
    });
}
