//! Extensible attribute handling.
//!
//! NIOS objects carry a map of extensible attributes. Part of that map is
//! owned by the user's configuration, part of it is inherited from parent
//! objects (zones, networks) and one entry, the internal ID, is stamped by
//! this tool so an object can be found again after its reference changed.
//!
//! The functions here keep those partitions apart:
//! - [`functions::add_internal_id`] tags a request with the internal ID
//! - [`functions::remove_inherited`] splits a server response into the
//!   user-managed view and the full observed set
//! - [`functions::add_inherited`] restores inherited attributes before an
//!   update so the server does not drop them

pub mod constants;
pub mod errors;
pub mod functions;
pub mod types;

pub use constants::INTERNAL_ID_KEY;
pub use errors::ExtAttrError;
pub use types::{ExtAttr, ExtAttrMap, ExtAttrs};
