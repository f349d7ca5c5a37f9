//! The `list` command: show builtin namespaces.

use std::fmt::Write;

use lark_eval::{call_value, EvalError, Span, Value};
use lark_stdlib::Host;

use super::builtin_scope;

/// Describe every builtin module, or only `only` when given.
///
/// One header line per module, then one indented line per member: routines
/// as `name(params)`, constants as `name: kind`.
pub fn render_listing(host: &Host, only: Option<&str>) -> Result<String, EvalError> {
    let env = builtin_scope(host);
    let names = match only {
        Some(name) => {
            env.get(name)?;
            vec![name.to_string()]
        }
        None => env.local_names(),
    };

    let mut out = String::new();
    for name in names {
        let instance = call_value(&env.get(&name)?, &[], Span::DUMMY)?;
        let _ = writeln!(out, "{name}");
        let Some(module) = instance.as_module() else {
            continue;
        };
        for (member, value) in module.members() {
            let _ = match &value {
                Value::Callable(c) => writeln!(out, "  {member}({})", c.parameters().join(", ")),
                other => writeln!(out, "  {member}: {}", other.type_name()),
            };
        }
    }
    Ok(out)
}

/// Run `lark list`, exiting with status 1 on an unknown module.
pub fn list_modules(host: &Host, only: Option<&str>) {
    match render_listing(host, only) {
        Ok(listing) => print!("{listing}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
