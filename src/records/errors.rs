// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Field '{field}' must be an {family} address, got '{value}'")]
    InvalidAddress {
        field: &'static str,
        family: &'static str,
        value: String,
    },

    #[error("Field 'use_ttl' is set but 'ttl' is missing")]
    TtlNotSet,

    #[error("Invalid NAPTR flags '{0}'. Must be one of: U, S, A, P or empty")]
    InvalidNaptrFlags(String),

    #[error("PTR record needs a name or an IPv4/IPv6 address")]
    PtrWithoutOwner,
}
