// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtAttrError {
    #[error("Extensible attribute '{key}' has a non-string value: {value}")]
    MalformedInternalId { key: String, value: String },
}
