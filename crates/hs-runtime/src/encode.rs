use hs_core::{EvalError, HostValue};
use indexmap::IndexMap;
use rhai::{Array, Dynamic, Map, Scope, FLOAT, INT};
use rust_decimal::prelude::ToPrimitive;

/// Converts a host value into a script value.
///
/// Unknown values become `()`, exactly like null ones. Big numbers go through
/// `f64`, so digits beyond the float mantissa (about 2^53) are lost.
pub fn encode_value(value: &HostValue) -> Result<Dynamic, EvalError> {
    encode_at(value, "inputs")
}

/// Builds the global bindings for one execution from the `inputs` argument.
///
/// A missing, null or unknown argument yields no bindings. Otherwise the
/// argument must be keyed (a map or an object); its entries are bound in
/// ascending key order.
pub fn encode_inputs(inputs: Option<&HostValue>) -> Result<Scope<'static>, EvalError> {
    let mut scope = Scope::new();
    let Some(inputs) = inputs.map(HostValue::underlying) else {
        return Ok(scope);
    };

    let entries = match inputs {
        HostValue::Null | HostValue::Unknown => return Ok(scope),
        HostValue::Map(map) => map.entries(),
        HostValue::Object(attributes) => attributes,
        other => {
            return Err(EvalError::input(format!(
                "inputs must be a map or object, got {}",
                other.kind()
            )))
        }
    };

    for (name, value) in sorted_entries(entries) {
        let encoded = encode_at(value, name)?;
        scope.push_dynamic(name.as_str(), encoded);
    }
    Ok(scope)
}

fn encode_at(value: &HostValue, path: &str) -> Result<Dynamic, EvalError> {
    match value {
        HostValue::Null | HostValue::Unknown => Ok(Dynamic::UNIT),
        HostValue::Bool(value) => Ok(Dynamic::from_bool(*value)),
        HostValue::Int64(value) => Ok(Dynamic::from_int(*value as INT)),
        HostValue::Float64(value) => Ok(Dynamic::from_float(*value as FLOAT)),
        HostValue::BigNumber(value) => value
            .to_f64()
            .map(|float| Dynamic::from_float(float as FLOAT))
            .ok_or_else(|| {
                EvalError::input(format!(
                    "{}: number {} has no float representation",
                    path, value
                ))
            }),
        HostValue::String(value) => Ok(Dynamic::from(value.clone())),
        HostValue::List(list) => encode_elements(list.elements(), path),
        HostValue::Tuple(elements) => encode_elements(elements, path),
        HostValue::Map(map) => encode_entries(map.entries(), path),
        HostValue::Object(attributes) => encode_entries(attributes, path),
        HostValue::Dynamic(inner) => encode_at(inner, path),
    }
}

fn encode_elements(elements: &[HostValue], path: &str) -> Result<Dynamic, EvalError> {
    let mut array = Array::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        array.push(encode_at(element, &format!("{}[{}]", path, index))?);
    }
    Ok(Dynamic::from_array(array))
}

fn encode_entries(entries: &IndexMap<String, HostValue>, path: &str) -> Result<Dynamic, EvalError> {
    let mut map = Map::new();
    for (key, value) in sorted_entries(entries) {
        map.insert(
            key.as_str().into(),
            encode_at(value, &format!("{}.{}", path, key))?,
        );
    }
    Ok(Dynamic::from_map(map))
}

fn sorted_entries(entries: &IndexMap<String, HostValue>) -> Vec<(&String, &HostValue)> {
    let mut sorted = entries.iter().collect::<Vec<_>>();
    sorted.sort_by(|(left, _), (right, _)| left.cmp(right));
    sorted
}
