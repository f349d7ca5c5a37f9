//! The `random` module.
//!
//! Each module instance owns one generator, seeded from the host seed when
//! one is configured and from OS entropy otherwise.

use std::cell::RefCell;
use std::rc::Rc;

use lark_eval::errors::invalid_bounds;
use lark_eval::{Environment, ModuleValue, Value};
use rand::rngs::StdRng;
use rand::Rng;

use crate::host::Host;

/// Build the `random` module callable.
pub fn module(host: &Host, env: &Environment) -> ModuleValue {
    let host = host.clone();
    ModuleValue::new("random", env, move |m| {
        let rng = Rc::new(RefCell::new(host.rng()));

        let state = Rc::clone(&rng);
        m.function("get", &[], move |_| {
            Ok(Value::Int(state.borrow_mut().gen_range(0..i64::MAX)))
        });

        let state = Rc::clone(&rng);
        m.function("get_limited", &["minimum", "maximum"], move |ctx| {
            let minimum = ctx.int("minimum")?;
            let maximum = ctx.int("maximum")?;
            limited(&mut state.borrow_mut(), minimum, maximum)
                .ok_or_else(|| ctx.locate(invalid_bounds(ctx.routine(), minimum, maximum)))
                .map(Value::Int)
        });

        let state = rng;
        m.function("get_float", &[], move |_| {
            Ok(Value::Float(state.borrow_mut().gen::<f64>()))
        });
        Ok(())
    })
}

/// Uniform in `[minimum, maximum)`; `minimum` itself when the range is
/// empty, `None` when it is inverted.
fn limited(rng: &mut StdRng, minimum: i64, maximum: i64) -> Option<i64> {
    match minimum.cmp(&maximum) {
        std::cmp::Ordering::Less => Some(rng.gen_range(minimum..maximum)),
        std::cmp::Ordering::Equal => Some(minimum),
        std::cmp::Ordering::Greater => None,
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
