// Standard library
use std::collections::BTreeMap;

// 3rd party crates
use reqwest::{Client, Url};
use serde::Deserialize;

// Current module imports
use super::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_WAPI_VERSION};

/// Connection settings for a NIOS grid master.
#[derive(Debug, Deserialize, Clone)]
pub struct NiosConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_wapi_version")]
    pub wapi_version: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub insecure_tls: bool,
}

fn default_wapi_version() -> String {
    DEFAULT_WAPI_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// HTTP client for the NIOS Web API.
#[derive(Debug, Clone)]
pub struct WapiClient {
    pub(super) base_url: Url,
    pub(super) client: Client,
    pub(super) credentials: Option<(String, String)>,
}

/// Search filter for list calls.
///
/// `fields` become `name=value` parameters, `extattrs` become
/// `*name=value` parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub fields: BTreeMap<String, String>,
    pub extattrs: BTreeMap<String, String>,
}

/// Error body returned by WAPI on failed calls.
#[derive(Debug, Deserialize)]
pub struct WapiErrorBody {
    #[serde(rename = "Error")]
    pub error: Option<String>,
    pub code: Option<String>,
    pub text: Option<String>,
}
