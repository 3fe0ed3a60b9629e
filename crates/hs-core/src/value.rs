use std::collections::BTreeMap;

use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::error::EvalError;
use crate::types::{HostKind, HostType};

/// A value in the host's structural type system.
///
/// Map and object entries keep the order they were inserted in; nothing in
/// the host model promises sorted keys.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Null,
    /// A value the host has not resolved yet.
    Unknown,
    Bool(bool),
    Int64(i64),
    Float64(f64),
    BigNumber(Decimal),
    String(String),
    List(HostList),
    Tuple(Vec<HostValue>),
    Map(HostMap),
    Object(IndexMap<String, HostValue>),
    Dynamic(Box<HostValue>),
}

/// Homogeneous ordered sequence with one declared element type.
#[derive(Debug, Clone, PartialEq)]
pub struct HostList {
    element_type: HostType,
    elements: Vec<HostValue>,
}

impl HostList {
    pub fn new(element_type: HostType, elements: Vec<HostValue>) -> Result<Self, EvalError> {
        if let Some((index, element)) = elements
            .iter()
            .enumerate()
            .find(|(_, element)| !element_type.accepts(element))
        {
            return Err(EvalError::argument(format!(
                "list element {} has type {}, expected {}",
                index,
                element.host_type(),
                element_type
            )));
        }
        Ok(Self {
            element_type,
            elements,
        })
    }

    pub fn element_type(&self) -> &HostType {
        &self.element_type
    }

    pub fn elements(&self) -> &[HostValue] {
        &self.elements
    }
}

/// String-keyed collection with one declared value type.
#[derive(Debug, Clone, PartialEq)]
pub struct HostMap {
    element_type: HostType,
    entries: IndexMap<String, HostValue>,
}

impl HostMap {
    pub fn new(
        element_type: HostType,
        entries: IndexMap<String, HostValue>,
    ) -> Result<Self, EvalError> {
        if let Some((key, value)) = entries.iter().find(|(_, value)| !element_type.accepts(value)) {
            return Err(EvalError::argument(format!(
                "map entry \"{}\" has type {}, expected {}",
                key,
                value.host_type(),
                element_type
            )));
        }
        Ok(Self {
            element_type,
            entries,
        })
    }

    pub fn element_type(&self) -> &HostType {
        &self.element_type
    }

    pub fn entries(&self) -> &IndexMap<String, HostValue> {
        &self.entries
    }
}

impl HostValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn dynamic(value: HostValue) -> Self {
        Self::Dynamic(Box::new(value))
    }

    pub fn list(element_type: HostType, elements: Vec<HostValue>) -> Result<Self, EvalError> {
        HostList::new(element_type, elements).map(Self::List)
    }

    pub fn map(
        element_type: HostType,
        entries: IndexMap<String, HostValue>,
    ) -> Result<Self, EvalError> {
        HostMap::new(element_type, entries).map(Self::Map)
    }

    pub fn object<K, I>(attributes: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, HostValue)>,
    {
        Self::Object(
            attributes
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    pub fn kind(&self) -> HostKind {
        match self {
            Self::Null => HostKind::Null,
            Self::Unknown => HostKind::Unknown,
            Self::Bool(_) => HostKind::Bool,
            Self::Int64(_) => HostKind::Int64,
            Self::Float64(_) => HostKind::Float64,
            Self::BigNumber(_) => HostKind::BigNumber,
            Self::String(_) => HostKind::String,
            Self::List(_) => HostKind::List,
            Self::Tuple(_) => HostKind::Tuple,
            Self::Map(_) => HostKind::Map,
            Self::Object(_) => HostKind::Object,
            Self::Dynamic(_) => HostKind::Dynamic,
        }
    }

    /// Type of this value. Tuple and object types are derived from their
    /// members, so a decoded value describes its own schema.
    pub fn host_type(&self) -> HostType {
        match self {
            Self::Null | Self::Unknown | Self::Dynamic(_) => HostType::Dynamic,
            Self::Bool(_) => HostType::Bool,
            Self::Int64(_) => HostType::Int64,
            Self::Float64(_) => HostType::Float64,
            Self::BigNumber(_) => HostType::Number,
            Self::String(_) => HostType::String,
            Self::List(list) => HostType::list(list.element_type.clone()),
            Self::Map(map) => HostType::map(map.element_type.clone()),
            Self::Tuple(elements) => HostType::Tuple {
                element_types: elements.iter().map(HostValue::host_type).collect(),
            },
            Self::Object(attributes) => HostType::Object {
                attribute_types: attributes
                    .iter()
                    .map(|(name, value)| (name.clone(), value.host_type()))
                    .collect::<BTreeMap<_, _>>(),
            },
        }
    }

    /// The value behind any number of dynamic wrappers.
    pub fn underlying(&self) -> &HostValue {
        let mut value = self;
        while let Self::Dynamic(inner) = value {
            value = inner;
        }
        value
    }

    pub fn into_underlying(self) -> HostValue {
        let mut value = self;
        while let Self::Dynamic(inner) = value {
            value = *inner;
        }
        value
    }

    pub fn is_null(&self) -> bool {
        matches!(self.underlying(), Self::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.underlying(), Self::Unknown)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.underlying() {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.underlying() {
            Self::Int64(value) => Some(*value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod value_tests {
    use super::*;

    #[test]
    fn list_rejects_elements_of_another_type() {
        let error = HostValue::list(
            HostType::String,
            vec![HostValue::string("a"), HostValue::Int64(2)],
        )
        .expect_err("mixed list");
        assert_eq!(error.code(), "EVAL_INVALID_ARGUMENT");
        assert!(error.message().contains("list element 1"));

        let list = HostValue::list(HostType::String, vec![HostValue::string("a"), HostValue::Null])
            .expect("typed null is accepted");
        assert_eq!(list.host_type(), HostType::list(HostType::String));
    }

    #[test]
    fn map_rejects_entries_of_another_type() {
        let entries = IndexMap::from([
            ("a".to_string(), HostValue::Int64(1)),
            ("b".to_string(), HostValue::Bool(true)),
        ]);
        let error = HostValue::map(HostType::Int64, entries).expect_err("mixed map");
        assert!(error.message().contains("\"b\""));
    }

    #[test]
    fn object_type_is_synthesized_from_attributes() {
        let object = HostValue::object([
            ("name", HostValue::string("web")),
            ("ports", HostValue::Tuple(vec![HostValue::Int64(80)])),
        ]);
        assert_eq!(
            object.host_type(),
            HostType::Object {
                attribute_types: BTreeMap::from([
                    ("name".to_string(), HostType::String),
                    (
                        "ports".to_string(),
                        HostType::Tuple {
                            element_types: vec![HostType::Int64]
                        }
                    ),
                ]),
            }
        );
    }

    #[test]
    fn dynamic_wrappers_are_transparent_to_accessors() {
        let value = HostValue::dynamic(HostValue::dynamic(HostValue::string("x")));
        assert_eq!(value.kind(), HostKind::Dynamic);
        assert_eq!(value.underlying().kind(), HostKind::String);
        assert_eq!(value.as_str(), Some("x"));
        assert!(HostValue::dynamic(HostValue::Null).is_null());
        assert!(HostValue::dynamic(HostValue::Unknown).is_unknown());
        assert_eq!(
            HostValue::dynamic(HostValue::Int64(7)).into_underlying(),
            HostValue::Int64(7)
        );
    }

    #[test]
    fn object_equality_ignores_insertion_order() {
        let left = HostValue::object([("a", HostValue::Int64(1)), ("b", HostValue::Int64(2))]);
        let right = HostValue::object([("b", HostValue::Int64(2)), ("a", HostValue::Int64(1))]);
        assert_eq!(left, right);
    }
}
