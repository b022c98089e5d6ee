// 3rd party crates
use async_trait::async_trait;
use serde_json::Value;

// Current module imports
use super::errors::ApiError;
use super::types::ListFilter;

/// Object operations offered by the NIOS Web API.
///
/// Bodies and results are plain JSON objects; typing happens one layer up
/// in the record resources. Every method that returns objects takes the
/// list of extra fields to return (`_return_fields+`). A reference that no
/// longer resolves is reported as [`ApiError::NotFound`].
#[async_trait]
pub trait Wapi: Send + Sync {
    /// Creates an object of `object_type` and returns it.
    async fn create(
        &self,
        object_type: &str,
        body: &Value,
        return_fields: &str,
    ) -> Result<Value, ApiError>;

    /// Fetches the object behind `reference`.
    async fn read(&self, reference: &str, return_fields: &str) -> Result<Value, ApiError>;

    /// Modifies the object behind `reference` and returns its new state.
    async fn update(
        &self,
        reference: &str,
        body: &Value,
        return_fields: &str,
    ) -> Result<Value, ApiError>;

    /// Deletes the object behind `reference`, returning the deleted reference.
    async fn delete(&self, reference: &str) -> Result<String, ApiError>;

    /// Lists objects of `object_type` matching `filter`.
    async fn list(
        &self,
        object_type: &str,
        filter: &ListFilter,
        return_fields: &str,
    ) -> Result<Vec<Value>, ApiError>;
}
