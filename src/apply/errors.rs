// Standard library
use std::path::PathBuf;

// 3rd party crates
use thiserror::Error;

// Project imports
use crate::records::ValidationError;
use crate::resources::{Diagnostic, ResourceError, Severity};

// Current module imports
use super::types::RecordKind;

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("Failed to read state file {path:?}: {source}")]
    StateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write state file {path:?}: {source}")]
    StateWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("State file {path:?} is not valid: {source}")]
    StateFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported state file version {found}, expected {expected}")]
    StateVersion { found: u32, expected: u32 },

    #[error("State of '{address}' cannot be converted: {source}")]
    StateModel {
        address: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid fields for {kind} record: {source}")]
    Fields {
        kind: RecordKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {kind} record: {source}")]
    Record {
        kind: RecordKind,
        #[source]
        source: ValidationError,
    },

    #[error("Object '{reference}' to import does not exist")]
    ImportNotFound { reference: String },

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl ApplyError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        if let ApplyError::Resource(e) = self {
            return e.to_diagnostic();
        }

        let summary = match self {
            ApplyError::StateRead { .. }
            | ApplyError::StateWrite { .. }
            | ApplyError::StateFormat { .. }
            | ApplyError::StateVersion { .. }
            | ApplyError::StateModel { .. } => "State Error",
            ApplyError::Fields { .. } | ApplyError::Record { .. } => "Invalid Configuration",
            ApplyError::ImportNotFound { .. } => "Import Error",
            ApplyError::Resource(e) => e.summary(),
        };

        Diagnostic {
            severity: Severity::Error,
            summary: summary.to_string(),
            detail: self.to_string(),
        }
    }
}
