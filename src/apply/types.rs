// Standard library
use std::collections::BTreeMap;

// 3rd party crates
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Project imports
use crate::extattrs::ExtAttrMap;
use crate::resources::{Diagnostic, PrivateState};

// Current module imports
use super::constants::STATE_VERSION;

/// Record types that can be declared in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    A,
    AIpaddress,
    Aaaa,
    AaaaIpaddress,
    Cname,
    CnameIpaddress,
    CnameIpaddressdn,
    CnameClientipaddress,
    CnameClientipaddressdn,
    Mx,
    Naptr,
    Ptr,
    Srv,
    Txt,
}

/// One `[[resource]]` entry of the configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceConfig {
    /// Unique key of the resource in the state file.
    pub address: String,
    pub kind: RecordKind,
    /// Reference of an existing object to adopt instead of creating one.
    #[serde(default)]
    pub import: Option<String>,
    /// Record fields as named by WAPI.
    #[serde(default)]
    pub fields: Value,
    #[serde(default)]
    pub extattrs: Option<ExtAttrMap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEntry {
    pub kind: RecordKind,
    /// The resource model as last read from the grid.
    pub model: Value,
    #[serde(default)]
    pub private: PrivateState,
}

/// Contents of the state file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateFile {
    pub version: u32,
    #[serde(default)]
    pub resources: BTreeMap<String, StateEntry>,
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            resources: BTreeMap::new(),
        }
    }
}

/// What one pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplySummary {
    pub created: usize,
    pub imported: usize,
    pub updated: usize,
    pub replaced: usize,
    pub deleted: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of reconciling one declared resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Change {
    Created,
    Imported,
    Updated,
    Replaced,
    Unchanged,
}
