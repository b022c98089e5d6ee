// 3rd party crates
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde_json::Value;
use tracing::{debug, info};

// Current module imports
use super::errors::{ApiError, NiosValidationError};
use super::functions::{
    base_url, create_reqwest_client, filter_params, handle_response, object_url, return_params,
    unwrap_result,
};
use super::traits::Wapi;
use super::types::{ListFilter, NiosConfig, WapiClient};

impl NiosConfig {
    pub fn validate(&self) -> Result<(), NiosValidationError> {
        if self.host.trim().is_empty() {
            return Err(NiosValidationError::MissingHost);
        }

        if self.username.trim().is_empty() {
            return Err(NiosValidationError::MissingUsername);
        }

        if self.password.is_empty() {
            return Err(NiosValidationError::MissingPassword);
        }

        let version_ok = !self.wapi_version.is_empty()
            && self
                .wapi_version
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
        if !version_ok {
            return Err(NiosValidationError::InvalidWapiVersion(
                self.wapi_version.clone(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(NiosValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl WapiClient {
    /// Creates a client for the grid master described by `nios`.
    pub fn new(nios: &NiosConfig) -> Result<Self, ApiError> {
        let client = create_reqwest_client(nios)?;
        let base_url = base_url(&nios.host, &nios.wapi_version)?;

        info!(url = %base_url, user = %nios.username, "Created WAPI client");

        Ok(Self {
            base_url,
            client,
            credentials: Some((nios.username.clone(), nios.password.clone())),
        })
    }

    /// Creates an unauthenticated client for an explicit base URL.
    #[cfg(test)]
    pub fn from_reqwest(base_url: &str, client: reqwest::Client) -> Result<Self, ApiError> {
        let base_url = reqwest::Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            base_url,
            client,
            credentials: None,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some((username, password)) => request.basic_auth(username, Some(password)),
            None => request,
        }
    }
}

#[async_trait]
impl Wapi for WapiClient {
    async fn create(
        &self,
        object_type: &str,
        body: &Value,
        return_fields: &str,
    ) -> Result<Value, ApiError> {
        let url = object_url(&self.base_url, object_type)?;
        debug!(object_type = %object_type, "Sending create request");

        let response = self
            .authorize(self.client.post(url))
            .query(&return_params(return_fields))
            .json(body)
            .send()
            .await?;

        unwrap_result(handle_response(response).await?)
    }

    async fn read(&self, reference: &str, return_fields: &str) -> Result<Value, ApiError> {
        let url = object_url(&self.base_url, reference)?;
        debug!(reference = %reference, "Sending read request");

        let response = self
            .authorize(self.client.get(url))
            .query(&return_params(return_fields))
            .send()
            .await?;

        unwrap_result(handle_response(response).await?)
    }

    async fn update(
        &self,
        reference: &str,
        body: &Value,
        return_fields: &str,
    ) -> Result<Value, ApiError> {
        let url = object_url(&self.base_url, reference)?;
        debug!(reference = %reference, "Sending update request");

        let response = self
            .authorize(self.client.put(url))
            .query(&return_params(return_fields))
            .json(body)
            .send()
            .await?;

        unwrap_result(handle_response(response).await?)
    }

    async fn delete(&self, reference: &str) -> Result<String, ApiError> {
        let url = object_url(&self.base_url, reference)?;
        debug!(reference = %reference, "Sending delete request");

        let response = self.authorize(self.client.delete(url)).send().await?;

        match handle_response(response).await? {
            Value::String(deleted) => Ok(deleted),
            other => Err(ApiError::Decode {
                message: "delete did not return a reference".to_string(),
                body: other.to_string(),
            }),
        }
    }

    async fn list(
        &self,
        object_type: &str,
        filter: &ListFilter,
        return_fields: &str,
    ) -> Result<Vec<Value>, ApiError> {
        let url = object_url(&self.base_url, object_type)?;
        debug!(object_type = %object_type, filter = ?filter, "Sending list request");

        let response = self
            .authorize(self.client.get(url))
            .query(&filter_params(filter))
            .query(&return_params(return_fields))
            .send()
            .await?;

        match unwrap_result(handle_response(response).await?)? {
            Value::Array(objects) => Ok(objects),
            other => Err(ApiError::Decode {
                message: "list result is not an array".to_string(),
                body: other.to_string(),
            }),
        }
    }
}
