pub mod constants;
pub mod errors;
pub mod functions;
pub mod impls;
#[cfg(test)]
pub mod memory;
pub mod traits;
pub mod types;

pub use errors::{ApiError, NiosValidationError};
pub use traits::Wapi;
pub use types::{ListFilter, NiosConfig, WapiClient};
