//! In-memory [`Wapi`] used by controller and driver tests.

// Standard library
use std::collections::BTreeMap;
use std::sync::Mutex;

// 3rd party crates
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use uuid::Uuid;

// Current module imports
use super::errors::ApiError;
use super::traits::Wapi;
use super::types::ListFilter;

#[derive(Default)]
struct Grid {
    objects: BTreeMap<String, Value>,
    inherited: Map<String, Value>,
    next_id: u64,
    failure: Option<(u16, String)>,
    calls: Vec<String>,
}

/// A grid master holding objects in memory.
///
/// Every stored object receives the configured inherited attributes, a
/// `uuid` and a `zone` mirroring its `rp_zone`.
#[derive(Default)]
pub struct MemoryWapi {
    grid: Mutex<Grid>,
}

impl MemoryWapi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes the grid adds to every object as inherited values.
    pub fn with_inherited(self, name: &str, value: &str) -> Self {
        self.grid.lock().unwrap().inherited.insert(
            name.to_string(),
            json!({
                "value": value,
                "inheritance_source": {"_ref": "zone_rp/ZG5zLnpvbmUk:rpz.local/default"},
                "inheritance_operation": "INHERIT"
            }),
        );
        self
    }

    /// Makes the next call fail with the given status.
    pub fn fail_next(&self, status: u16, message: &str) {
        self.grid.lock().unwrap().failure = Some((status, message.to_string()));
    }

    /// Stores an object as if created outside this tool.
    pub fn insert(&self, object_type: &str, object: Value) -> String {
        let mut grid = self.grid.lock().unwrap();
        store(&mut grid, object_type, object)
    }

    pub fn get(&self, reference: &str) -> Option<Value> {
        self.grid.lock().unwrap().objects.get(reference).cloned()
    }

    pub fn remove(&self, reference: &str) -> Option<Value> {
        self.grid.lock().unwrap().objects.remove(reference)
    }

    /// Gives an object a new reference, as a server-side move does.
    pub fn move_object(&self, reference: &str) -> Option<String> {
        let mut grid = self.grid.lock().unwrap();
        let object = grid.objects.remove(reference)?;
        let object_type = object_type_of(reference).to_string();
        grid.next_id += 1;
        let new_ref = format!("{}/ZG5zLm1vdmVk{}:moved/default", object_type, grid.next_id);
        let mut object = object;
        object["_ref"] = Value::String(new_ref.clone());
        grid.objects.insert(new_ref.clone(), object);
        Some(new_ref)
    }

    pub fn len(&self) -> usize {
        self.grid.lock().unwrap().objects.len()
    }

    /// Operations received so far, e.g. `create record:rpz:a`.
    pub fn calls(&self) -> Vec<String> {
        self.grid.lock().unwrap().calls.clone()
    }

    fn begin(&self, call: String) -> Result<std::sync::MutexGuard<'_, Grid>, ApiError> {
        let mut grid = self.grid.lock().unwrap();
        grid.calls.push(call);
        if let Some((status, message)) = grid.failure.take() {
            return Err(if status == 404 {
                ApiError::NotFound(message)
            } else {
                ApiError::Status { status, message }
            });
        }
        Ok(grid)
    }
}

fn object_type_of(reference: &str) -> &str {
    reference.split('/').next().unwrap_or(reference)
}

fn store(grid: &mut Grid, object_type: &str, mut object: Value) -> String {
    grid.next_id += 1;
    let name = object["name"].as_str().unwrap_or("record").to_string();
    let view = object["view"].as_str().unwrap_or("default").to_string();
    let reference = format!("{}/ZG5zLnJwejp7{}:{}/{}", object_type, grid.next_id, name, view);

    object["_ref"] = Value::String(reference.clone());
    object["uuid"] = Value::String(Uuid::new_v4().to_string());
    object["view"] = Value::String(view);
    if let Some(rp_zone) = object.get("rp_zone").cloned() {
        object["zone"] = rp_zone;
    }
    merge_inherited(grid, &mut object);

    grid.objects.insert(reference.clone(), object);
    reference
}

fn merge_inherited(grid: &Grid, object: &mut Value) {
    if grid.inherited.is_empty() {
        return;
    }
    if !object["extattrs"].is_object() {
        object["extattrs"] = Value::Object(Map::new());
    }
    if let Some(attrs) = object["extattrs"].as_object_mut() {
        for (name, attr) in &grid.inherited {
            attrs.entry(name.clone()).or_insert_with(|| attr.clone());
        }
    }
}

fn matches_filter(object: &Value, filter: &ListFilter) -> bool {
    filter
        .fields
        .iter()
        .all(|(name, value)| object[name].as_str() == Some(value.as_str()))
        && filter
            .extattrs
            .iter()
            .all(|(name, value)| object["extattrs"][name]["value"].as_str() == Some(value.as_str()))
}

#[async_trait]
impl Wapi for MemoryWapi {
    async fn create(
        &self,
        object_type: &str,
        body: &Value,
        _return_fields: &str,
    ) -> Result<Value, ApiError> {
        let mut grid = self.begin(format!("create {}", object_type))?;
        let reference = store(&mut grid, object_type, body.clone());
        Ok(grid.objects[&reference].clone())
    }

    async fn read(&self, reference: &str, _return_fields: &str) -> Result<Value, ApiError> {
        let grid = self.begin(format!("read {}", reference))?;
        grid.objects
            .get(reference)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(reference.to_string()))
    }

    async fn update(
        &self,
        reference: &str,
        body: &Value,
        _return_fields: &str,
    ) -> Result<Value, ApiError> {
        let mut grid = self.begin(format!("update {}", reference))?;
        let inherited = grid.inherited.clone();
        let object = grid
            .objects
            .get_mut(reference)
            .ok_or_else(|| ApiError::NotFound(reference.to_string()))?;

        if let (Some(target), Some(changes)) = (object.as_object_mut(), body.as_object()) {
            for (key, value) in changes {
                if key == "extattrs" {
                    // Attributes sent with an update replace the whole set;
                    // the grid re-applies inherited values that were omitted.
                    let mut attrs = value.as_object().cloned().unwrap_or_default();
                    for (name, attr) in &inherited {
                        attrs.entry(name.clone()).or_insert_with(|| attr.clone());
                    }
                    target.insert(key.clone(), Value::Object(attrs));
                } else {
                    target.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(object.clone())
    }

    async fn delete(&self, reference: &str) -> Result<String, ApiError> {
        let mut grid = self.begin(format!("delete {}", reference))?;
        grid.objects
            .remove(reference)
            .map(|_| reference.to_string())
            .ok_or_else(|| ApiError::NotFound(reference.to_string()))
    }

    async fn list(
        &self,
        object_type: &str,
        filter: &ListFilter,
        _return_fields: &str,
    ) -> Result<Vec<Value>, ApiError> {
        let grid = self.begin(format!("list {}", object_type))?;
        Ok(grid
            .objects
            .iter()
            .filter(|(reference, _)| object_type_of(reference) == object_type)
            .filter(|(_, object)| matches_filter(object, filter))
            .map(|(_, object)| object.clone())
            .collect())
    }
}
