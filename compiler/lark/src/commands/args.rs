//! Shell argument conversion for `lark call`.

use lark_eval::Value;

/// Convert one shell argument into a guest value.
///
/// `true` / `false` become booleans, integer and float literals become
/// numbers, `absent` is the absent marker, `[a,b,c]` is an array of
/// converted elements, and anything else is a string.
pub fn parse_value(arg: &str) -> Value {
    match arg {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "absent" => return Value::Absent,
        _ => {}
    }

    if let Some(inner) = arg.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        let items = if inner.trim().is_empty() {
            Vec::new()
        } else {
            inner.split(',').map(|item| parse_value(item.trim())).collect()
        };
        return Value::array(items);
    }

    if let Ok(n) = arg.parse::<i64>() {
        return Value::Int(n);
    }
    // `f64::from_str` also takes "inf" and "NaN"; only numerals count here.
    if arg.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(x) = arg.parse::<f64>() {
            return Value::Float(x);
        }
    }
    Value::string(arg)
}
