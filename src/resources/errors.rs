// 3rd party crates
use thiserror::Error;

// Project imports
use crate::extattrs::ExtAttrError;
use crate::nios::ApiError;
use crate::records::ValidationError;

// Current module imports
use super::types::{Diagnostic, Severity};

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Unable to {operation} {object_type}, got error: {source}")]
    Client {
        operation: &'static str,
        object_type: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("Unable to find internal ID of {object_type} '{reference}' in stored extattrs_all")]
    MissingInternalId {
        object_type: &'static str,
        reference: String,
    },

    #[error("Found {count} {object_type} objects tagged with internal ID '{internal_id}'")]
    AmbiguousInternalId {
        object_type: &'static str,
        internal_id: String,
        count: usize,
    },

    #[error("{object_type} has no reference in state")]
    MissingReference { object_type: &'static str },

    #[error("Invalid {object_type} configuration: {source}")]
    Validation {
        object_type: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error("Failed to convert {object_type}: {source}")]
    Conversion {
        object_type: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    ExtAttr(#[from] ExtAttrError),
}

impl ResourceError {
    pub fn summary(&self) -> &'static str {
        match self {
            ResourceError::Client { .. } => "Client Error",
            ResourceError::MissingInternalId { .. } => "Missing Internal ID",
            ResourceError::AmbiguousInternalId { .. } => "Duplicate Internal ID",
            ResourceError::MissingReference { .. } => "Missing Reference",
            ResourceError::Validation { .. } => "Invalid Configuration",
            ResourceError::Conversion { .. } => "Conversion Error",
            ResourceError::ExtAttr(_) => "Extensible Attribute Error",
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            severity: Severity::Error,
            summary: self.summary().to_string(),
            detail: self.to_string(),
        }
    }
}
