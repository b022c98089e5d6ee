// 3rd party crates
use thiserror::Error;

// Project imports
use crate::apply::ApplyError;
use crate::nios::NiosValidationError;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid log level: {0}. Must be one of: error, warn, info, debug, trace")]
    InvalidLogLevel(String),
    #[error("NIOS configuration error: {0}")]
    NiosConfig(#[from] NiosValidationError),
    #[error("Resource address must not be empty")]
    EmptyAddress,
    #[error("Resource address '{0}' is declared more than once")]
    DuplicateAddress(String),
    #[error("Resource '{0}' has an empty import reference")]
    EmptyImportReference(String),
    #[error("Resource '{address}' is invalid: {source}")]
    Resource {
        address: String,
        #[source]
        source: ApplyError,
    },
}
