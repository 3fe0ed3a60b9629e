use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::HostValue;

/// Declared type of a host value. Collections carry their element types, so a
/// tuple or object type fully describes the shape of its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HostType {
    Dynamic,
    Bool,
    Int64,
    Float64,
    Number,
    String,
    #[serde(rename_all = "camelCase")]
    List {
        element_type: Box<HostType>,
    },
    #[serde(rename_all = "camelCase")]
    Map {
        element_type: Box<HostType>,
    },
    #[serde(rename_all = "camelCase")]
    Tuple {
        element_types: Vec<HostType>,
    },
    #[serde(rename_all = "camelCase")]
    Object {
        attribute_types: BTreeMap<String, HostType>,
    },
}

impl HostType {
    pub fn list(element_type: HostType) -> Self {
        Self::List {
            element_type: Box::new(element_type),
        }
    }

    pub fn map(element_type: HostType) -> Self {
        Self::Map {
            element_type: Box::new(element_type),
        }
    }

    /// Whether `value` conforms to this type. Null and unknown values conform
    /// to every type; dynamic wrappers are looked through.
    pub fn accepts(&self, value: &HostValue) -> bool {
        let value = value.underlying();
        if matches!(value, HostValue::Null | HostValue::Unknown) {
            return true;
        }
        match self {
            Self::Dynamic => true,
            Self::Bool => matches!(value, HostValue::Bool(_)),
            Self::Int64 => matches!(value, HostValue::Int64(_)),
            Self::Float64 => matches!(value, HostValue::Float64(_)),
            Self::Number => matches!(value, HostValue::BigNumber(_)),
            Self::String => matches!(value, HostValue::String(_)),
            Self::List { element_type } => match value {
                HostValue::List(list) => list.element_type() == element_type.as_ref(),
                _ => false,
            },
            Self::Map { element_type } => match value {
                HostValue::Map(map) => map.element_type() == element_type.as_ref(),
                _ => false,
            },
            Self::Tuple { element_types } => match value {
                HostValue::Tuple(elements) => {
                    elements.len() == element_types.len()
                        && element_types
                            .iter()
                            .zip(elements)
                            .all(|(ty, element)| ty.accepts(element))
                }
                _ => false,
            },
            Self::Object { attribute_types } => match value {
                HostValue::Object(attributes) => {
                    attributes.len() == attribute_types.len()
                        && attribute_types.iter().all(|(name, ty)| {
                            attributes
                                .get(name)
                                .is_some_and(|attribute| ty.accepts(attribute))
                        })
                }
                _ => false,
            },
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dynamic => f.write_str("dynamic"),
            Self::Bool => f.write_str("bool"),
            Self::Int64 => f.write_str("int64"),
            Self::Float64 => f.write_str("float64"),
            Self::Number => f.write_str("number"),
            Self::String => f.write_str("string"),
            Self::List { element_type } => write!(f, "list({})", element_type),
            Self::Map { element_type } => write!(f, "map({})", element_type),
            Self::Tuple { element_types } => {
                f.write_str("tuple([")?;
                for (index, ty) in element_types.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", ty)?;
                }
                f.write_str("])")
            }
            Self::Object { attribute_types } => {
                f.write_str("object({")?;
                for (index, (name, ty)) in attribute_types.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", name, ty)?;
                }
                f.write_str("})")
            }
        }
    }
}

/// Runtime kind of a host value, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
    Null,
    Unknown,
    Bool,
    Int64,
    Float64,
    BigNumber,
    String,
    List,
    Tuple,
    Map,
    Object,
    Dynamic,
}

impl HostKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Unknown => "unknown",
            Self::Bool => "bool",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::BigNumber => "number",
            Self::String => "string",
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::Map => "map",
            Self::Object => "object",
            Self::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
