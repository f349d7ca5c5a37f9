//! The `call` command: invoke one builtin routine from the shell.

use lark_eval::errors::no_such_member;
use lark_eval::{call_value, EvalResult, Span};
use lark_stdlib::Host;
use tracing::debug;

use super::{builtin_scope, parse_value};

/// Instantiate `module`, call its `routine` with converted `args` and
/// return the routine's result.
pub fn invoke_routine(host: &Host, module: &str, routine: &str, args: &[String]) -> EvalResult {
    let env = builtin_scope(host);
    let instance = call_value(&env.get(module)?, &[], Span::DUMMY)?;
    let member = instance
        .as_module()
        .ok_or_else(|| no_such_member(module, routine))?
        .member(routine)?;

    let args: Vec<_> = args.iter().map(|arg| parse_value(arg)).collect();
    debug!(module, routine, args = args.len(), "calling builtin from the shell");
    call_value(&member, &args, Span::DUMMY)
}

/// Run `lark call`, printing the result or exiting with status 1.
pub fn call_routine(host: &Host, module: &str, routine: &str, args: &[String]) {
    match invoke_routine(host, module, routine, args) {
        Ok(value) => println!("{value}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
