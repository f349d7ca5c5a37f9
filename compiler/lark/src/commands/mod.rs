//! Command handlers for the Lark CLI.
//!
//! Each submodule implements one command. Shared setup lives here: every
//! command works against a fresh root scope with the builtins registered.

use lark_eval::Environment;
use lark_stdlib::{register_builtin_modules, Host};

mod args;
mod call;
mod list;

pub use args::parse_value;
pub use call::{call_routine, invoke_routine};
pub use list::{list_modules, render_listing};

/// A root scope holding every builtin module.
fn builtin_scope(host: &Host) -> Environment {
    let env = Environment::new();
    register_builtin_modules(&env, host);
    env
}
