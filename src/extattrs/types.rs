// Standard library
use std::collections::BTreeMap;

// 3rd party crates
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single extensible attribute as exchanged with WAPI.
///
/// Only `value` is ever sent. The inheritance fields are populated by the
/// server for attributes contributed by a parent object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtAttr {
    pub value: Value,
    #[serde(default, skip_serializing)]
    pub inheritance_source: Option<Value>,
    #[serde(default, skip_serializing)]
    pub inheritance_operation: Option<String>,
}

impl ExtAttr {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Value::String(value.into()),
            inheritance_source: None,
            inheritance_operation: None,
        }
    }
}

/// Extensible attributes in their WAPI form.
pub type ExtAttrs = BTreeMap<String, ExtAttr>;

/// Extensible attributes as kept in state: name to string-or-null.
pub type ExtAttrMap = BTreeMap<String, Option<String>>;
