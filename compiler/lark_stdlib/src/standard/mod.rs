//! The `std/*` modules: numeric limits and text helpers.
//!
//! None of them touch the host; they take it only to share the builtin
//! constructor signature.

use lark_eval::{CallContext, Environment, EvalResult, ModuleValue, Value};

use crate::host::Host;

/// `std/integer`: limits of the integer kind.
pub fn integer(_host: &Host, env: &Environment) -> ModuleValue {
    ModuleValue::new("std/integer", env, |m| {
        m.constant("maximum", i64::MAX).constant("minimum", i64::MIN);
        Ok(())
    })
}

/// `std/float`: limits and special values of the float kind.
pub fn float(_host: &Host, env: &Environment) -> ModuleValue {
    ModuleValue::new("std/float", env, |m| {
        m.constant("maximum", f64::MAX)
            .constant("minimum", f64::MIN)
            .constant("epsilon", f64::EPSILON)
            .constant("not_a_number", f64::NAN)
            .constant("positive_infinity", f64::INFINITY)
            .constant("negative_infinity", f64::NEG_INFINITY);
        Ok(())
    })
}

/// `std/string`: the empty string and concatenation into a string.
pub fn string(_host: &Host, env: &Environment) -> ModuleValue {
    ModuleValue::new("std/string", env, |m| {
        m.constant("empty", Value::string(""))
            .function("concatenate", &["values"], concatenate_string);
        Ok(())
    })
}

/// `std/character_list`: the empty list and concatenation into a list.
pub fn character_list(_host: &Host, env: &Environment) -> ModuleValue {
    ModuleValue::new("std/character_list", env, |m| {
        m.constant("empty", Value::char_list(Vec::new()))
            .function("concatenate", &["values"], concatenate_chars);
        Ok(())
    })
}

fn concatenate_string(ctx: &CallContext) -> EvalResult {
    Ok(Value::string(ctx.texts("values")?.concat()))
}

fn concatenate_chars(ctx: &CallContext) -> EvalResult {
    let chars = ctx
        .texts("values")?
        .iter()
        .flat_map(|text| text.chars())
        .collect();
    Ok(Value::char_list(chars))
}
