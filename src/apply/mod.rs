//! Declarative driver.
//!
//! Desired resources come from configuration; what was applied last is kept
//! in a JSON state file. Each pass brings the grid in line with the
//! configuration through the record resource controllers and deletes objects
//! whose configuration was removed.

pub mod constants;
pub mod errors;
pub mod functions;
pub mod impls;
pub mod types;

pub use errors::ApplyError;
pub use functions::{apply, load_state, save_state};
pub use types::{ApplySummary, RecordKind, ResourceConfig};
