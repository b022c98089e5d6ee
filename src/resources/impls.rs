// Standard library
use std::marker::PhantomData;

// 3rd party crates
use tracing::{debug, info, warn};

// Project imports
use crate::extattrs::functions::{
    add_inherited, add_internal_id, expand as expand_ext_attrs, inherited_only, internal_id,
    server_internal_id,
};
use crate::extattrs::INTERNAL_ID_KEY;
use crate::nios::{ApiError, ListFilter, Wapi};
use crate::records::RecordType;

// Current module imports
use super::errors::ResourceError;
use super::functions::{decode, expand_create, expand_update, flatten};
use super::types::{PrivateState, ReadOutcome, RecordResource, ResourceModel};

impl<'a, C: Wapi, R: RecordType> RecordResource<'a, C, R> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            record: PhantomData,
        }
    }

    fn client_error(operation: &'static str, source: ApiError) -> ResourceError {
        ResourceError::Client {
            operation,
            object_type: R::OBJECT_TYPE,
            source,
        }
    }

    fn reference(model: &ResourceModel<R>) -> Result<&str, ResourceError> {
        model
            .reference
            .as_deref()
            .ok_or(ResourceError::MissingReference {
                object_type: R::OBJECT_TYPE,
            })
    }

    /// Creates the object described by `plan`, tagged with a fresh internal ID.
    pub async fn create(&self, plan: ResourceModel<R>) -> Result<ResourceModel<R>, ResourceError> {
        plan.record
            .validate()
            .map_err(|source| ResourceError::Validation {
                object_type: R::OBJECT_TYPE,
                source,
            })?;

        let extattrs = add_internal_id(expand_ext_attrs(plan.extattrs.as_ref()));
        let body = expand_create(&plan.record, Some(extattrs))?;

        let created = self
            .client
            .create(R::OBJECT_TYPE, &body, R::RETURN_FIELDS)
            .await
            .map_err(|e| Self::client_error("create", e))?;

        let model = flatten(decode::<R>(created)?, plan.extattrs.as_ref());
        info!(
            record = %R::OBJECT_TYPE,
            reference = model.reference.as_deref().unwrap_or_default(),
            "Created record"
        );

        Ok(model)
    }

    /// Refreshes `state` from the grid.
    ///
    /// When the stored reference no longer resolves, or resolves to an object
    /// carrying another internal ID, the object is searched by its internal ID.
    pub async fn read(
        &self,
        state: ResourceModel<R>,
        private: &PrivateState,
    ) -> Result<ReadOutcome<R>, ResourceError> {
        let reference = Self::reference(&state)?;

        let object = match self.client.read(reference, R::RETURN_FIELDS).await {
            Ok(object) => decode::<R>(object)?,
            Err(e) if e.is_not_found() => {
                debug!(
                    record = %R::OBJECT_TYPE,
                    reference = %reference,
                    "Reference not found, searching by internal ID"
                );
                return match self.read_by_ext_attrs(&state).await? {
                    Some(outcome) => Ok(outcome),
                    None => Err(ResourceError::MissingInternalId {
                        object_type: R::OBJECT_TYPE,
                        reference: reference.to_string(),
                    }),
                };
            }
            Err(e) => return Err(Self::client_error("read", e)),
        };

        if !private.associate_internal_id {
            let remote_id = server_internal_id(object.extattrs.as_ref())?;
            let stored_id = internal_id(state.extattrs_all.as_ref());

            if remote_id.as_deref() != stored_id {
                warn!(
                    record = %R::OBJECT_TYPE,
                    reference = %reference,
                    stored = stored_id.unwrap_or_default(),
                    remote = remote_id.as_deref().unwrap_or_default(),
                    "Internal ID mismatch, searching by internal ID"
                );
                if let Some(outcome) = self.read_by_ext_attrs(&state).await? {
                    return Ok(outcome);
                }
            }
        }

        Ok(ReadOutcome::Found(flatten(object, state.extattrs.as_ref())))
    }

    /// Locates the object by the internal ID stored in `extattrs_all`.
    ///
    /// Returns `None` when state holds no internal ID to search for.
    pub async fn read_by_ext_attrs(
        &self,
        state: &ResourceModel<R>,
    ) -> Result<Option<ReadOutcome<R>>, ResourceError> {
        let Some(id) = internal_id(state.extattrs_all.as_ref()) else {
            return Ok(None);
        };

        let mut filter = ListFilter::default();
        filter
            .extattrs
            .insert(INTERNAL_ID_KEY.to_string(), id.to_string());

        let mut found = self
            .client
            .list(R::OBJECT_TYPE, &filter, R::RETURN_FIELDS)
            .await
            .map_err(|e| Self::client_error("list", e))?;

        match found.len() {
            0 => {
                info!(
                    record = %R::OBJECT_TYPE,
                    internal_id = %id,
                    "Record no longer exists"
                );
                Ok(Some(ReadOutcome::Gone))
            }
            1 => {
                let object = decode::<R>(found.remove(0))?;
                let model = flatten(object, state.extattrs.as_ref());
                info!(
                    record = %R::OBJECT_TYPE,
                    internal_id = %id,
                    reference = model.reference.as_deref().unwrap_or_default(),
                    "Relocated record by internal ID"
                );
                Ok(Some(ReadOutcome::Found(model)))
            }
            count => Err(ResourceError::AmbiguousInternalId {
                object_type: R::OBJECT_TYPE,
                internal_id: id.to_string(),
                count,
            }),
        }
    }

    /// Applies `plan` to the object recorded in `prior`.
    ///
    /// Inherited attributes from `prior.extattrs_all` are sent along so the
    /// server keeps them. Clears `private.associate_internal_id` on success.
    pub async fn update(
        &self,
        plan: ResourceModel<R>,
        prior: &ResourceModel<R>,
        private: &mut PrivateState,
    ) -> Result<ResourceModel<R>, ResourceError> {
        let reference = Self::reference(prior)?;
        plan.record
            .validate()
            .map_err(|source| ResourceError::Validation {
                object_type: R::OBJECT_TYPE,
                source,
            })?;

        let inherited = inherited_only(prior.extattrs_all.as_ref(), prior.extattrs.as_ref());
        let merged = add_inherited(plan.extattrs.clone(), inherited.as_ref());
        let mut extattrs = expand_ext_attrs(merged.as_ref());
        if private.associate_internal_id {
            extattrs = Some(add_internal_id(extattrs));
        }

        let body = expand_update(&plan.record, extattrs)?;
        let updated = self
            .client
            .update(reference, &body, R::RETURN_FIELDS)
            .await
            .map_err(|e| Self::client_error("update", e))?;

        let model = flatten(decode::<R>(updated)?, plan.extattrs.as_ref());
        private.associate_internal_id = false;
        info!(
            record = %R::OBJECT_TYPE,
            reference = model.reference.as_deref().unwrap_or_default(),
            "Updated record"
        );

        Ok(model)
    }

    /// Deletes the object. An object that is already gone counts as deleted.
    pub async fn delete(&self, state: &ResourceModel<R>) -> Result<(), ResourceError> {
        let reference = Self::reference(state)?;

        match self.client.delete(reference).await {
            Ok(_) => {
                info!(record = %R::OBJECT_TYPE, reference = %reference, "Deleted record");
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                debug!(
                    record = %R::OBJECT_TYPE,
                    reference = %reference,
                    "Record already absent"
                );
                Ok(())
            }
            Err(e) => Err(Self::client_error("delete", e)),
        }
    }

    /// Seeds state for an existing object. The next update stamps it with an
    /// internal ID.
    pub fn import(&self, reference: &str) -> (ResourceModel<R>, PrivateState) {
        let model = ResourceModel {
            reference: Some(reference.to_string()),
            ..Default::default()
        };
        let private = PrivateState {
            associate_internal_id: true,
        };
        (model, private)
    }
}
