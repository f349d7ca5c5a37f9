use lark_eval::{ErrorCategory, ModuleInstance};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::host::HostConfig;
use crate::test_helpers::{invoke, Fixture, SPAN};

fn int(value: Value) -> i64 {
    match value {
        Value::Int(n) => n,
        other => panic!("expected an integer, got {other:?}"),
    }
}

fn draws(instance: &ModuleInstance, count: usize) -> Vec<i64> {
    (0..count)
        .map(|_| int(invoke(instance, "get", &[]).unwrap()))
        .collect()
}

#[test]
fn test_namespace_surface() {
    let fx = Fixture::new();
    let random = fx.module(module);
    let surface: Vec<(String, usize)> = random
        .members()
        .into_iter()
        .map(|(name, value)| (name, value.as_callable().unwrap().arity()))
        .collect();
    assert_eq!(
        surface,
        vec![
            ("get".to_string(), 0),
            ("get_float".to_string(), 0),
            ("get_limited".to_string(), 2),
        ]
    );
}

#[test]
fn test_get_is_non_negative() {
    let fx = Fixture::new();
    let random = fx.module(module);
    assert!(draws(&random, 64).into_iter().all(|n| n >= 0));
}

#[test]
fn test_get_limited_equal_bounds() {
    let fx = Fixture::new();
    let random = fx.module(module);
    assert_eq!(
        invoke(&random, "get_limited", &[Value::Int(5), Value::Int(5)]).unwrap(),
        Value::Int(5)
    );
}

#[test]
fn test_get_limited_inverted_bounds_is_type_error() {
    let fx = Fixture::new();
    let random = fx.module(module);
    let err = invoke(&random, "get_limited", &[Value::Int(9), Value::Int(2)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
    assert_eq!(err.span, SPAN);
    assert_eq!(
        err.message,
        "random.get_limited: minimum 9 must not exceed maximum 2"
    );
}

#[test]
fn test_get_limited_rejects_non_integers() {
    let fx = Fixture::new();
    let random = fx.module(module);
    let err = invoke(&random, "get_limited", &[Value::string("1"), Value::Int(2)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
    assert_eq!(
        err.message,
        "random.get_limited: parameter `minimum` expects integer, got string"
    );
}

#[test]
fn test_get_float_is_unit_interval() {
    let fx = Fixture::new();
    let random = fx.module(module);
    for _ in 0..64 {
        match invoke(&random, "get_float", &[]).unwrap() {
            Value::Float(f) => assert!((0.0..1.0).contains(&f), "{f}"),
            other => panic!("expected a float, got {other:?}"),
        }
    }
}

#[test]
fn test_seeded_instances_repeat() {
    let fx = Fixture::new();
    let first = fx.module(module);
    let second = fx.module(module);
    assert_eq!(draws(&first, 8), draws(&second, 8));
}

#[test]
fn test_instance_state_advances() {
    let fx = Fixture::new();
    let random = fx.module(module);
    let draws = draws(&random, 8);
    assert!(draws.windows(2).any(|pair| pair[0] != pair[1]));
}

#[test]
fn test_different_seeds_differ() {
    let env = Environment::new();
    let instance = |seed| {
        let host = HostConfig::new().random_seed(seed).build();
        let module = Value::Callable(module(&host, &env).into());
        match lark_eval::call_value(&module, &[], SPAN).unwrap() {
            Value::Module(instance) => instance,
            other => panic!("expected a module instance, got {other:?}"),
        }
    };
    assert_ne!(draws(&instance(1), 8), draws(&instance(2), 8));
}

proptest! {
    #[test]
    fn get_limited_stays_in_range(minimum in -1_000_i64..1_000, span in 1_i64..1_000) {
        let fx = Fixture::new();
        let random = fx.module(module);
        let maximum = minimum + span;
        let n = int(
            invoke(&random, "get_limited", &[Value::Int(minimum), Value::Int(maximum)]).unwrap(),
        );
        prop_assert!(n >= minimum && n < maximum);
    }
}
