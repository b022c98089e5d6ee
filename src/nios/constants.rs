/// WAPI version used when the configuration does not name one.
pub const DEFAULT_WAPI_VERSION: &str = "2.13.7";

/// Per-request timeout used when the configuration does not name one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Query parameter extending the default set of returned fields.
pub const RETURN_FIELDS_PLUS: &str = "_return_fields+";

/// Query parameter wrapping responses in a `{"result": ...}` object.
pub const RETURN_AS_OBJECT: &str = "_return_as_object";

/// Error class NIOS reports for references that no longer resolve.
pub const NOT_FOUND_ERROR_CLASS: &str = "AdmConDataNotFoundError";
