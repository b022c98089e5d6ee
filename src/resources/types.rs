// Standard library
use std::fmt;
use std::marker::PhantomData;

// 3rd party crates
use serde::{Deserialize, Serialize};

// Project imports
use crate::extattrs::{ExtAttrMap, ExtAttrs};

/// Managed state of one record object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceModel<R> {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(flatten)]
    pub record: R,
    /// Attributes the user manages.
    #[serde(default)]
    pub extattrs: Option<ExtAttrMap>,
    /// Every attribute last seen on the server, inherited ones included.
    #[serde(default)]
    pub extattrs_all: Option<ExtAttrMap>,
}

/// A record object as exchanged with WAPI.
#[derive(Debug, Serialize, Deserialize)]
pub struct WireObject<R> {
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(flatten)]
    pub record: R,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extattrs: Option<ExtAttrs>,
}

/// Per-resource state that is not part of the record itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateState {
    /// Set by import; the next update stamps an internal ID.
    #[serde(default)]
    pub associate_internal_id: bool,
}

/// Result of reading a resource.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<R> {
    Found(ResourceModel<R>),
    /// The object no longer exists and should be dropped from state.
    Gone,
}

/// CRUD controller for one record type.
pub struct RecordResource<'a, C, R> {
    pub(super) client: &'a C,
    pub(super) record: PhantomData<R>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A user-facing problem report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        };
        write!(f, "{}: {}: {}", severity, self.summary, self.detail)
    }
}
