// 3rd party crates
use serde_json::Value;

// Project imports
use crate::extattrs::functions::remove_inherited;
use crate::extattrs::{ExtAttrMap, ExtAttrs};
use crate::records::RecordType;

// Current module imports
use super::errors::ResourceError;
use super::types::{ResourceModel, WireObject};

fn expand<R: RecordType>(
    record: &R,
    extattrs: Option<ExtAttrs>,
    excluded: &[&str],
) -> Result<Value, ResourceError> {
    let wire = WireObject {
        reference: None,
        uuid: None,
        record,
        extattrs,
    };

    let mut body = serde_json::to_value(&wire).map_err(|source| ResourceError::Conversion {
        object_type: R::OBJECT_TYPE,
        source,
    })?;

    if let Some(object) = body.as_object_mut() {
        for field in excluded {
            object.remove(*field);
        }
    }

    Ok(body)
}

/// Builds a create request body.
pub fn expand_create<R: RecordType>(
    record: &R,
    extattrs: Option<ExtAttrs>,
) -> Result<Value, ResourceError> {
    expand(record, extattrs, R::READ_ONLY_FIELDS)
}

/// Builds an update request body; create-only fields are left out.
pub fn expand_update<R: RecordType>(
    record: &R,
    extattrs: Option<ExtAttrs>,
) -> Result<Value, ResourceError> {
    let excluded: Vec<&str> = R::READ_ONLY_FIELDS
        .iter()
        .chain(R::CREATE_ONLY_FIELDS)
        .copied()
        .collect();
    expand(record, extattrs, &excluded)
}

/// Parses a WAPI object.
pub fn decode<R: RecordType>(value: Value) -> Result<WireObject<R>, ResourceError> {
    serde_json::from_value(value).map_err(|source| ResourceError::Conversion {
        object_type: R::OBJECT_TYPE,
        source,
    })
}

/// Turns a WAPI object into state, keeping only the declared attributes in
/// `extattrs`.
pub fn flatten<R: RecordType>(
    object: WireObject<R>,
    declared: Option<&ExtAttrMap>,
) -> ResourceModel<R> {
    let (extattrs, extattrs_all) = remove_inherited(declared, object.extattrs.as_ref());

    ResourceModel {
        reference: object.reference,
        uuid: object.uuid,
        record: object.record,
        extattrs,
        extattrs_all,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extattrs::ExtAttr;
    use crate::records::{CommonFields, Ipv4Fields, RecordA};
    use serde_json::json;

    fn record() -> RecordA {
        RecordA(Ipv4Fields {
            name: "bad.rpz.local".to_string(),
            ipv4addr: "10.0.0.1".to_string(),
            common: CommonFields {
                rp_zone: "rpz.local".to_string(),
                view: Some("default".to_string()),
                zone: Some("rpz.local".to_string()),
                ..Default::default()
            },
        })
    }

    #[test]
    fn expand_create_drops_read_only_fields() {
        let mut attrs = ExtAttrs::new();
        attrs.insert("Site".to_string(), ExtAttr::new("a"));

        let body = expand_create(&record(), Some(attrs)).unwrap();

        assert_eq!(
            body,
            json!({
                "name": "bad.rpz.local",
                "ipv4addr": "10.0.0.1",
                "rp_zone": "rpz.local",
                "view": "default",
                "extattrs": {"Site": {"value": "a"}}
            })
        );
    }

    #[test]
    fn expand_update_drops_create_only_fields() {
        let body = expand_update(&record(), None).unwrap();

        assert_eq!(body, json!({"name": "bad.rpz.local", "ipv4addr": "10.0.0.1"}));
    }

    #[test]
    fn flatten_splits_inherited_attributes() {
        let object: WireObject<RecordA> = decode(json!({
            "_ref": "record:rpz:a/ZG5z:bad.rpz.local/default",
            "name": "bad.rpz.local",
            "ipv4addr": "10.0.0.1",
            "rp_zone": "rpz.local",
            "extattrs": {
                "Site": {"value": "a"},
                "Owner": {"value": "sys", "inheritance_source": {"_ref": "zone_rp/x"}},
                "Terraform Internal ID": {"value": "X"}
            }
        }))
        .unwrap();

        let mut declared = ExtAttrMap::new();
        declared.insert("Site".to_string(), Some("a".to_string()));

        let model = flatten(object, Some(&declared));

        assert_eq!(
            model.reference.as_deref(),
            Some("record:rpz:a/ZG5z:bad.rpz.local/default")
        );
        assert_eq!(model.extattrs, Some(declared));
        let all = model.extattrs_all.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all["Owner"].as_deref(), Some("sys"));
    }

    #[test]
    fn state_model_uses_ref_key() {
        let model = ResourceModel {
            reference: Some("record:rpz:a/ZG5z:bad.rpz.local/default".to_string()),
            uuid: None,
            record: record(),
            extattrs: None,
            extattrs_all: None,
        };

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["ref"], "record:rpz:a/ZG5z:bad.rpz.local/default");
        assert_eq!(value["ipv4addr"], "10.0.0.1");

        let back: ResourceModel<RecordA> = serde_json::from_value(value).unwrap();
        assert_eq!(back, model);
    }
}
