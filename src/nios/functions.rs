// Standard library
use std::time::Duration;

// 3rd party crates
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, error};

// Current module imports
use super::constants::{NOT_FOUND_ERROR_CLASS, RETURN_AS_OBJECT, RETURN_FIELDS_PLUS};
use super::errors::ApiError;
use super::types::{ListFilter, NiosConfig, WapiErrorBody};

/// Creates a reqwest client configured for the grid master.
pub(super) fn create_reqwest_client(nios: &NiosConfig) -> Result<Client, ApiError> {
    let mut headers: HeaderMap = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    let client: Client = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(nios.timeout_secs))
        .danger_accept_invalid_certs(nios.insecure_tls)
        .build()
        .map_err(|e| {
            error!(host = %nios.host, "Failed to build HTTP client: {}", e);
            ApiError::Transport(e)
        })?;

    Ok(client)
}

/// Builds the WAPI base URL, e.g. `https://gm.example.com/wapi/v2.13.7/`.
pub(super) fn base_url(host: &str, wapi_version: &str) -> Result<Url, ApiError> {
    let host = host.trim_end_matches('/');
    let raw = if host.starts_with("http://") || host.starts_with("https://") {
        format!("{}/wapi/v{}/", host, wapi_version)
    } else {
        format!("https://{}/wapi/v{}/", host, wapi_version)
    };

    parse_url(&raw)
}

/// Appends an object type or reference to the base URL.
///
/// References look like `record:rpz:a/ZG5z...:name/view`; joining them with
/// `Url::join` would read the part before the first colon as a scheme.
pub(super) fn object_url(base: &Url, path: &str) -> Result<Url, ApiError> {
    let raw = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    parse_url(&raw)
}

fn parse_url(raw: &str) -> Result<Url, ApiError> {
    Url::parse(raw).map_err(|e| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Query parameters selecting the returned fields.
pub(super) fn return_params(return_fields: &str) -> Vec<(String, String)> {
    let mut params = Vec::with_capacity(2);
    if !return_fields.is_empty() {
        params.push((RETURN_FIELDS_PLUS.to_string(), return_fields.to_string()));
    }
    params.push((RETURN_AS_OBJECT.to_string(), "1".to_string()));
    params
}

/// Query parameters for a list filter.
pub(super) fn filter_params(filter: &ListFilter) -> Vec<(String, String)> {
    filter
        .fields
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .chain(
            filter
                .extattrs
                .iter()
                .map(|(k, v)| (format!("*{}", k), v.clone())),
        )
        .collect()
}

/// Maps a WAPI response to its JSON body or an error.
pub(super) async fn handle_response(response: Response) -> Result<Value, ApiError> {
    let status: StatusCode = response.status();
    let body: String = response.text().await?;

    if status.is_success() {
        debug!(status = %status, "Received WAPI response");
        return serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            message: e.to_string(),
            body,
        });
    }

    let message = error_message(&body);
    if status == StatusCode::NOT_FOUND || message.contains(NOT_FOUND_ERROR_CLASS) {
        return Err(ApiError::NotFound(message));
    }

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<WapiErrorBody>(body) {
        Ok(parsed) => match (parsed.error, parsed.text) {
            (Some(error), Some(text)) if !error.contains(&text) => format!("{}: {}", error, text),
            (Some(error), _) => error,
            (None, Some(text)) => text,
            (None, None) => parsed.code.unwrap_or_else(|| body.to_string()),
        },
        Err(_) if body.is_empty() => "Unknown error".to_string(),
        Err(_) => body.to_string(),
    }
}

/// Unwraps the `{"result": ...}` envelope requested with `_return_as_object`.
pub(super) fn unwrap_result(body: Value) -> Result<Value, ApiError> {
    match body {
        Value::Object(mut object) => object.remove("result").ok_or_else(|| ApiError::Decode {
            message: "response has no 'result' member".to_string(),
            body: Value::Object(object).to_string(),
        }),
        other => Err(ApiError::Decode {
            message: "response is not an object".to_string(),
            body: other.to_string(),
        }),
    }
}
