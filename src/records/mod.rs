//! Response policy zone record types.
//!
//! Every record type is a plain serde model of its WAPI fields. The same
//! model is used in requests, responses and state; [`RecordType`] adds the
//! per-type tables the resource controller needs.

pub mod errors;
pub mod impls;
pub mod traits;
pub mod types;

pub use errors::ValidationError;
pub use traits::RecordType;
pub use types::*;
