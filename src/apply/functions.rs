// Standard library
use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// 3rd party crates
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info};

// Project imports
use crate::extattrs::ExtAttrMap;
use crate::nios::Wapi;
use crate::records::RecordType;
use crate::resources::{
    PrivateState, ReadOutcome, RecordResource, ResourceError, ResourceModel,
};

// Current module imports
use super::constants::STATE_VERSION;
use super::errors::ApplyError;
use super::impls::with_record_type;
use super::types::{ApplySummary, Change, RecordKind, ResourceConfig, StateEntry, StateFile};

/// Loads the state file. A missing file is an empty state.
pub async fn load_state(path: &Path) -> Result<StateFile, ApplyError> {
    let raw = match fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = ?path, "No state file yet, starting empty");
            return Ok(StateFile::default());
        }
        Err(source) => {
            return Err(ApplyError::StateRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let state: StateFile =
        serde_json::from_slice(&raw).map_err(|source| ApplyError::StateFormat {
            path: path.to_path_buf(),
            source,
        })?;

    if state.version != STATE_VERSION {
        return Err(ApplyError::StateVersion {
            found: state.version,
            expected: STATE_VERSION,
        });
    }

    Ok(state)
}

/// Writes the state file through a temporary file so a crash never leaves a
/// partial document behind.
pub async fn save_state(path: &Path, state: &StateFile) -> Result<(), ApplyError> {
    let write_error = |source: std::io::Error| ApplyError::StateWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(write_error)?;
    }

    let body = serde_json::to_vec_pretty(state).map_err(|source| ApplyError::StateFormat {
        path: path.to_path_buf(),
        source,
    })?;

    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);

    fs::write(&temp, body).await.map_err(write_error)?;
    fs::rename(&temp, path).await.map_err(write_error)?;

    debug!(path = ?path, resources = state.resources.len(), "State saved");
    Ok(())
}

/// Brings the grid in line with `desired`, recording the result in `state`.
///
/// Resources are handled one after another. A failing resource is reported
/// in the summary and keeps its previous state; the others still run.
pub async fn apply<C: Wapi>(
    client: &C,
    desired: &[ResourceConfig],
    state: &mut StateFile,
) -> ApplySummary {
    let mut summary = ApplySummary::default();

    let declared: BTreeSet<&str> = desired.iter().map(|r| r.address.as_str()).collect();
    let orphans: Vec<String> = state
        .resources
        .keys()
        .filter(|address| !declared.contains(address.as_str()))
        .cloned()
        .collect();

    for address in orphans {
        let Some(entry) = state.resources.get(&address) else {
            continue;
        };
        match remove(client, &address, entry).await {
            Ok(()) => {
                state.resources.remove(&address);
                summary.deleted += 1;
            }
            Err(e) => summary.fail(&address, &e),
        }
    }

    for config in desired {
        let mut entry = state.resources.get(&config.address).cloned();

        if let Some(old) = entry.as_ref().filter(|old| old.kind != config.kind) {
            info!(
                address = %config.address,
                from = %old.kind.object_type(),
                to = %config.kind.object_type(),
                "Record kind changed, replacing"
            );
            if let Err(e) = remove(client, &config.address, old).await {
                summary.fail(&config.address, &e);
                continue;
            }
            state.resources.remove(&config.address);
            entry = None;
        }

        match reconcile(client, config, entry.as_ref(), &mut summary).await {
            Ok((entry, change)) => {
                match change {
                    Change::Created => summary.created += 1,
                    Change::Imported => summary.imported += 1,
                    Change::Updated => summary.updated += 1,
                    Change::Replaced => summary.replaced += 1,
                    Change::Unchanged => summary.unchanged += 1,
                }
                state.resources.insert(config.address.clone(), entry);
            }
            Err(e) => summary.fail(&config.address, &e),
        }
    }

    summary
}

async fn reconcile<C: Wapi>(
    client: &C,
    config: &ResourceConfig,
    entry: Option<&StateEntry>,
    summary: &mut ApplySummary,
) -> Result<(StateEntry, Change), ApplyError> {
    with_record_type!(config.kind, R => reconcile_record::<C, R>(client, config, entry, summary).await)
}

async fn remove<C: Wapi>(client: &C, address: &str, entry: &StateEntry) -> Result<(), ApplyError> {
    with_record_type!(entry.kind, R => {
        let model: ResourceModel<R> = from_state(address, entry)?;
        RecordResource::<C, R>::new(client).delete(&model).await?;
        Ok(())
    })
}

async fn reconcile_record<C: Wapi, R: RecordType>(
    client: &C,
    config: &ResourceConfig,
    entry: Option<&StateEntry>,
    summary: &mut ApplySummary,
) -> Result<(StateEntry, Change), ApplyError> {
    let resource = RecordResource::<C, R>::new(client);
    let plan = ResourceModel {
        record: parse_record::<R>(config.kind, &config.fields)?,
        extattrs: config.extattrs.clone(),
        ..Default::default()
    };

    let Some(entry) = entry else {
        if let Some(reference) = &config.import {
            let (seed, mut private) = resource.import(reference);
            // An imported seed has no internal ID to search by.
            let current = match resource.read(seed, &private).await {
                Ok(ReadOutcome::Found(current)) => current,
                Ok(ReadOutcome::Gone) | Err(ResourceError::MissingInternalId { .. }) => {
                    return Err(ApplyError::ImportNotFound {
                        reference: reference.clone(),
                    })
                }
                Err(e) => return Err(e.into()),
            };
            let model = resource.update(plan, &current, &mut private).await?;
            return Ok((to_state(config, &model, private)?, Change::Imported));
        }

        let model = resource.create(plan).await?;
        return Ok((
            to_state(config, &model, PrivateState::default())?,
            Change::Created,
        ));
    };

    let prior: ResourceModel<R> = from_state(&config.address, entry)?;
    let mut private = entry.private;

    let current = match resource.read(prior, &private).await? {
        ReadOutcome::Found(current) => current,
        ReadOutcome::Gone => {
            summary.warn(
                &config.address,
                "Resource Gone",
                format!(
                    "{} object was deleted outside of this tool and will be created again",
                    R::OBJECT_TYPE
                ),
            );
            let model = resource.create(plan).await?;
            return Ok((
                to_state(config, &model, PrivateState::default())?,
                Change::Created,
            ));
        }
    };

    if create_only_changed(&plan.record, &current.record) {
        info!(
            address = %config.address,
            record = %R::OBJECT_TYPE,
            "Create-only field changed, replacing"
        );
        resource.delete(&current).await?;
        let model = resource.create(plan).await?;
        return Ok((
            to_state(config, &model, PrivateState::default())?,
            Change::Replaced,
        ));
    }

    if private.associate_internal_id || needs_update(config.kind, &plan, &current)? {
        let model = resource.update(plan, &current, &mut private).await?;
        return Ok((to_state(config, &model, private)?, Change::Updated));
    }

    debug!(address = %config.address, "Record up to date");
    Ok((to_state(config, &current, private)?, Change::Unchanged))
}

/// Parses configured record fields. Missing fields parse as an empty record
/// so validation can name what is absent.
pub(super) fn parse_record<R: RecordType>(
    kind: RecordKind,
    fields: &Value,
) -> Result<R, ApplyError> {
    if fields.is_null() {
        return Ok(R::default());
    }
    serde_json::from_value(fields.clone()).map_err(|source| ApplyError::Fields { kind, source })
}

fn from_state<R: RecordType>(
    address: &str,
    entry: &StateEntry,
) -> Result<ResourceModel<R>, ApplyError> {
    serde_json::from_value(entry.model.clone()).map_err(|source| ApplyError::StateModel {
        address: address.to_string(),
        source,
    })
}

fn to_state<R: RecordType>(
    config: &ResourceConfig,
    model: &ResourceModel<R>,
    private: PrivateState,
) -> Result<StateEntry, ApplyError> {
    let model = serde_json::to_value(model).map_err(|source| ApplyError::StateModel {
        address: config.address.clone(),
        source,
    })?;
    Ok(StateEntry {
        kind: config.kind,
        model,
        private,
    })
}

fn create_only_changed<R: RecordType>(desired: &R, current: &R) -> bool {
    let (want, have) = (desired.common(), current.common());
    want.rp_zone != have.rp_zone
        || want
            .view
            .as_ref()
            .is_some_and(|view| have.view.as_ref() != Some(view))
}

/// Compares the configured fields and attributes with what the grid holds.
/// Fields left unset in configuration are not compared.
fn needs_update<R: RecordType>(
    kind: RecordKind,
    plan: &ResourceModel<R>,
    current: &ResourceModel<R>,
) -> Result<bool, ApplyError> {
    let to_value = |record: &R| {
        serde_json::to_value(record).map_err(|source| ApplyError::Fields { kind, source })
    };
    let want = to_value(&plan.record)?;
    let have = to_value(&current.record)?;

    let fields_changed = want.as_object().is_some_and(|want| {
        want.iter()
            .filter(|(key, value)| {
                !value.is_null() && !R::READ_ONLY_FIELDS.contains(&key.as_str())
            })
            .any(|(key, value)| have.get(key) != Some(value))
    });

    Ok(fields_changed
        || declared_values(plan.extattrs.as_ref()) != declared_values(current.extattrs.as_ref()))
}

fn declared_values(attrs: Option<&ExtAttrMap>) -> BTreeMap<&str, &str> {
    attrs
        .into_iter()
        .flatten()
        .filter_map(|(key, value)| value.as_deref().map(|value| (key.as_str(), value)))
        .collect()
}
