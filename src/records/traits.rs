// Standard library
use std::fmt::Debug;

// 3rd party crates
use serde::de::DeserializeOwned;
use serde::Serialize;

// Current module imports
use super::errors::ValidationError;
use super::types::CommonFields;

/// A WAPI record object type.
pub trait RecordType:
    Serialize + DeserializeOwned + Clone + Debug + Default + PartialEq + Send + Sync + 'static
{
    /// WAPI object type, e.g. `record:rpz:a`.
    const OBJECT_TYPE: &'static str;

    /// Fields requested in addition to the WAPI defaults.
    const RETURN_FIELDS: &'static str;

    /// Fields only the server sets.
    const READ_ONLY_FIELDS: &'static [&'static str] = &["zone"];

    /// Fields that can only be set when the object is created.
    const CREATE_ONLY_FIELDS: &'static [&'static str] = &["rp_zone", "view"];

    fn common(&self) -> &CommonFields;

    /// Checks the type-specific fields.
    fn validate_fields(&self) -> Result<(), ValidationError>;

    /// Checks the whole record before it is sent.
    fn validate(&self) -> Result<(), ValidationError> {
        self.common().validate()?;
        self.validate_fields()
    }
}
