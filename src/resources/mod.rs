//! Record resources: create, read, update, delete and import of one record
//! object, keeping local state in step with the grid.

pub mod errors;
pub mod functions;
pub mod impls;
pub mod types;

pub use errors::ResourceError;
pub use types::{Diagnostic, PrivateState, ReadOutcome, RecordResource, ResourceModel, Severity};
