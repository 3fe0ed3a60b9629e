use hs_core::{EvalError, HostValue};
use indexmap::IndexMap;
use rhai::{Array, Dynamic, ImmutableString, Map, FLOAT, INT};
use rust_decimal::Decimal;

use crate::contract::RESULT_BINDING;

/// Converts the value of a script's `result` binding and wraps it in
/// [`HostValue::Dynamic`], so callers need not declare a return type.
pub fn decode_result(value: Dynamic) -> Result<HostValue, EvalError> {
    decode_at(value, RESULT_BINDING).map(HostValue::dynamic)
}

/// Converts a script value into a host value.
///
/// Arrays become tuples and maps become objects: the types of their members
/// are taken from the decoded members, never unified into one element type.
///
/// Script integers never exceed 64 bits: arithmetic that overflows fails
/// inside the script as an execution error, so integers always decode to
/// `Int64`. `BigNumber` results come only from script `Decimal` values.
pub fn decode_value(value: Dynamic) -> Result<HostValue, EvalError> {
    decode_at(value, "value")
}

fn decode_at(value: Dynamic, path: &str) -> Result<HostValue, EvalError> {
    let value = value.flatten();

    if value.is_unit() {
        return Ok(HostValue::Null);
    }
    if value.is::<bool>() {
        return Ok(HostValue::Bool(value.cast::<bool>()));
    }
    // Script integers are 64-bit and overflow is a runtime error, so every
    // integer reaching this point fits.
    if value.is::<INT>() {
        return Ok(HostValue::Int64(value.cast::<INT>() as i64));
    }
    if value.is::<FLOAT>() {
        return Ok(HostValue::Float64(value.cast::<FLOAT>() as f64));
    }
    if value.is::<Decimal>() {
        return Ok(HostValue::BigNumber(value.cast::<Decimal>()));
    }
    if value.is::<ImmutableString>() {
        return Ok(HostValue::String(
            value.cast::<ImmutableString>().to_string(),
        ));
    }
    if value.is::<char>() {
        return Ok(HostValue::String(value.cast::<char>().to_string()));
    }
    if value.is::<Array>() {
        let array = value.cast::<Array>();
        let mut elements = Vec::with_capacity(array.len());
        for (index, element) in array.into_iter().enumerate() {
            elements.push(decode_at(element, &format!("{}[{}]", path, index))?);
        }
        return Ok(HostValue::Tuple(elements));
    }
    if value.is::<Map>() {
        let map = value.cast::<Map>();
        let mut attributes = IndexMap::with_capacity(map.len());
        for (key, entry) in map {
            let key = key.to_string();
            let decoded = decode_at(entry, &format!("{}.{}", path, key))?;
            attributes.insert(key, decoded);
        }
        return Ok(HostValue::Object(attributes));
    }

    Err(EvalError::result(format!(
        "unsupported script value type '{}' at {}",
        value.type_name(),
        path
    )))
}
