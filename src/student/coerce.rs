//! Loose type coercion for student input fields.
//!
//! Clients may send `"age": "20"` or `"grade": 5`. Scalars are cast to the
//! field's type; values that cannot be cast fail with a message naming the
//! field, e.g. `Cast to Number failed for value "abc" (type string) at path "age"`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Cast a JSON value to an optional string.
pub fn to_string(value: Value, path: &str) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(normalize_number(n).to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(cast_error("string", &other, path)),
    }
}

/// Cast a JSON value to an optional number.
///
/// Whole values become integers so `"20"`, `20.0` and `20` store identically.
pub fn to_number(value: Value, path: &str) -> Result<Option<Number>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(Some(normalize_number(n))),
        Value::Bool(b) => Ok(Some(Number::from(u8::from(b)))),
        Value::String(ref s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if let Ok(int) = trimmed.parse::<i64>() {
                return Ok(Some(Number::from(int)));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(number_from_f64)
                .map(Some)
                .ok_or_else(|| cast_error("Number", &value, path))
        }
        other => Err(cast_error("Number", &other, path)),
    }
}

/// Hold whole floats as integers; leave everything else untouched.
pub fn normalize_number(number: Number) -> Number {
    if !number.is_f64() {
        return number;
    }
    number.as_f64().and_then(whole_number).unwrap_or(number)
}

/// Finite float to number, whole values as integers.
pub fn number_from_f64(value: f64) -> Option<Number> {
    whole_number(value).or_else(|| Number::from_f64(value))
}

// 2^63; `i64::MAX as f64` rounds up to this.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn whole_number(value: f64) -> Option<Number> {
    let whole = value.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&value);
    whole.then(|| Number::from(value as i64))
}

fn cast_error(kind: &str, value: &Value, path: &str) -> String {
    let type_name = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    };
    format!("Cast to {kind} failed for value {value} (type {type_name}) at path \"{path}\"")
}

fn optional_value<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null))
}

/// `deserialize_with` adapter for the `name` field.
pub fn name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    to_string(optional_value(deserializer)?, "name").map_err(D::Error::custom)
}

/// `deserialize_with` adapter for the `grade` field.
pub fn grade<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    to_string(optional_value(deserializer)?, "grade").map_err(D::Error::custom)
}

/// `deserialize_with` adapter for the `age` field.
pub fn age<'de, D>(deserializer: D) -> Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    to_number(optional_value(deserializer)?, "age").map_err(D::Error::custom)
}
