/// Extensible attribute used to correlate remote objects with local state.
pub const INTERNAL_ID_KEY: &str = "Terraform Internal ID";
