// 3rd party crates
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

// Current module imports
use super::constants::INTERNAL_ID_KEY;
use super::errors::ExtAttrError;
use super::types::{ExtAttr, ExtAttrMap, ExtAttrs};

/// Converts state extensible attributes into their WAPI form.
///
/// Null values carry no information for the server and are dropped.
pub fn expand(attrs: Option<&ExtAttrMap>) -> Option<ExtAttrs> {
    attrs.map(|map| {
        map.iter()
            .filter_map(|(key, value)| {
                value
                    .as_ref()
                    .map(|value| (key.clone(), ExtAttr::new(value.as_str())))
            })
            .collect()
    })
}

/// Converts WAPI extensible attributes into their state form.
///
/// Non-string values (integers, lists) are kept as their compact JSON text.
pub fn flatten(attrs: Option<&ExtAttrs>) -> Option<ExtAttrMap> {
    attrs.map(|map| {
        map.iter()
            .map(|(key, attr)| (key.clone(), render_value(&attr.value)))
            .collect()
    })
}

fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Stamps the internal ID onto a request's extensible attributes.
///
/// An ID that is already present is kept as is.
pub fn add_internal_id(attrs: Option<ExtAttrs>) -> ExtAttrs {
    let mut attrs = attrs.unwrap_or_default();
    if !attrs.contains_key(INTERNAL_ID_KEY) {
        let id = Uuid::new_v4().to_string();
        debug!(internal_id = %id, "Generated internal ID");
        attrs.insert(INTERNAL_ID_KEY.to_string(), ExtAttr::new(id));
    }
    attrs
}

/// Splits a server response into the user-managed attributes and the full
/// observed set.
///
/// The first map holds the server's values for keys present in `declared`;
/// everything else is treated as inherited. It is null when nothing was
/// declared. The second map is the complete server set.
pub fn remove_inherited(
    declared: Option<&ExtAttrMap>,
    server: Option<&ExtAttrs>,
) -> (Option<ExtAttrMap>, Option<ExtAttrMap>) {
    let all = flatten(server);

    let managed = declared.map(|declared| match &all {
        Some(all) => all
            .iter()
            .filter(|(key, _)| declared.contains_key(*key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
        None => ExtAttrMap::new(),
    });

    (managed, all)
}

/// Adds back every attribute of `all` that the plan does not mention.
pub fn add_inherited(plan: Option<ExtAttrMap>, all: Option<&ExtAttrMap>) -> Option<ExtAttrMap> {
    let Some(all) = all else {
        return plan;
    };

    let mut merged = plan.unwrap_or_default();
    for (key, value) in all {
        if !merged.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }
    Some(merged)
}

/// Returns the part of `all` that was not declared by the user.
///
/// The internal ID is always kept.
pub fn inherited_only(all: Option<&ExtAttrMap>, declared: Option<&ExtAttrMap>) -> Option<ExtAttrMap> {
    all.map(|all| {
        all.iter()
            .filter(|(key, _)| {
                key.as_str() == INTERNAL_ID_KEY
                    || !declared.is_some_and(|declared| declared.contains_key(*key))
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    })
}

/// Reads the internal ID from state attributes. Empty values count as absent.
pub fn internal_id(attrs: Option<&ExtAttrMap>) -> Option<&str> {
    attrs
        .and_then(|attrs| attrs.get(INTERNAL_ID_KEY))
        .and_then(|value| value.as_deref())
        .filter(|value| !value.is_empty())
}

/// Reads the internal ID from a server response.
pub fn server_internal_id(attrs: Option<&ExtAttrs>) -> Result<Option<String>, ExtAttrError> {
    let Some(attr) = attrs.and_then(|attrs| attrs.get(INTERNAL_ID_KEY)) else {
        return Ok(None);
    };

    match &attr.value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(ExtAttrError::MalformedInternalId {
            key: INTERNAL_ID_KEY.to_string(),
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(pairs: &[(&str, &str)]) -> ExtAttrMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Some(v.to_string())))
            .collect()
    }

    fn inherited(value: &str) -> ExtAttr {
        ExtAttr {
            value: Value::String(value.to_string()),
            inheritance_source: Some(json!({"_ref": "zone_rp/ZG5z:rpz.local/default"})),
            inheritance_operation: Some("INHERIT".to_string()),
        }
    }

    #[test]
    fn expand_drops_null_values() {
        let mut attrs = map(&[("Site", "a")]);
        attrs.insert("Empty".to_string(), None);

        let expanded = expand(Some(&attrs)).unwrap();

        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded["Site"].value, json!("a"));
        assert!(expand(None).is_none());
    }

    #[test]
    fn flatten_renders_non_string_values() {
        let mut attrs = ExtAttrs::new();
        attrs.insert("Site".to_string(), ExtAttr::new("a"));
        attrs.insert(
            "Rack".to_string(),
            ExtAttr {
                value: json!(42),
                inheritance_source: None,
                inheritance_operation: None,
            },
        );
        attrs.insert(
            "Tags".to_string(),
            ExtAttr {
                value: json!(["x", "y"]),
                inheritance_source: None,
                inheritance_operation: None,
            },
        );

        let flat = flatten(Some(&attrs)).unwrap();

        assert_eq!(flat["Site"].as_deref(), Some("a"));
        assert_eq!(flat["Rack"].as_deref(), Some("42"));
        assert_eq!(flat["Tags"].as_deref(), Some(r#"["x","y"]"#));
    }

    #[test]
    fn add_internal_id_is_idempotent() {
        let first = add_internal_id(None);
        let id = first[INTERNAL_ID_KEY].value.clone();

        let second = add_internal_id(Some(first));

        assert_eq!(second.len(), 1);
        assert_eq!(second[INTERNAL_ID_KEY].value, id);
    }

    #[test]
    fn add_internal_id_keeps_user_attributes() {
        let attrs = expand(Some(&map(&[("Site", "a")])));

        let tagged = add_internal_id(attrs);

        assert_eq!(tagged.len(), 2);
        assert_eq!(tagged["Site"].value, json!("a"));
        let id = tagged[INTERNAL_ID_KEY].value.as_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn remove_inherited_keeps_only_declared_keys() {
        let declared = map(&[("Site", "a"), ("Missing", "m")]);
        let mut server = ExtAttrs::new();
        server.insert("Site".to_string(), ExtAttr::new("a"));
        server.insert("Owner".to_string(), inherited("sys"));
        server.insert(INTERNAL_ID_KEY.to_string(), ExtAttr::new("X"));

        let (managed, all) = remove_inherited(Some(&declared), Some(&server));

        assert_eq!(managed, Some(map(&[("Site", "a")])));
        assert_eq!(
            all,
            Some(map(&[("Site", "a"), ("Owner", "sys"), (INTERNAL_ID_KEY, "X")]))
        );
    }

    #[test]
    fn remove_inherited_takes_server_values() {
        let declared = map(&[("Site", "old")]);
        let mut server = ExtAttrs::new();
        server.insert("Site".to_string(), ExtAttr::new("new"));

        let (managed, _) = remove_inherited(Some(&declared), Some(&server));

        assert_eq!(managed, Some(map(&[("Site", "new")])));
    }

    #[test]
    fn remove_inherited_with_nothing_declared() {
        let mut server = ExtAttrs::new();
        server.insert("Owner".to_string(), inherited("sys"));

        let (managed, all) = remove_inherited(None, Some(&server));
        assert!(managed.is_none());
        assert_eq!(all, Some(map(&[("Owner", "sys")])));

        let (managed, all) = remove_inherited(Some(&map(&[("Site", "a")])), None);
        assert_eq!(managed, Some(ExtAttrMap::new()));
        assert!(all.is_none());
    }

    #[test]
    fn add_inherited_fills_missing_keys_only() {
        let plan = map(&[("Site", "b")]);
        let all = map(&[("Site", "a"), ("Owner", "sys")]);

        let merged = add_inherited(Some(plan), Some(&all)).unwrap();

        assert_eq!(merged, map(&[("Site", "b"), ("Owner", "sys")]));
    }

    #[test]
    fn add_inherited_without_plan() {
        let all = map(&[("Owner", "sys")]);

        assert_eq!(add_inherited(None, Some(&all)), Some(all.clone()));
        assert_eq!(add_inherited(None, None), None);
        assert_eq!(
            add_inherited(Some(map(&[("Site", "a")])), None),
            Some(map(&[("Site", "a")]))
        );
    }

    #[test]
    fn inherited_only_excludes_declared_keys_but_keeps_internal_id() {
        let all = map(&[("Site", "a"), ("Owner", "sys"), (INTERNAL_ID_KEY, "X")]);
        let declared = map(&[("Site", "a"), (INTERNAL_ID_KEY, "X")]);

        let rest = inherited_only(Some(&all), Some(&declared)).unwrap();

        assert_eq!(rest, map(&[("Owner", "sys"), (INTERNAL_ID_KEY, "X")]));
        assert_eq!(inherited_only(Some(&all), None), Some(all.clone()));
        assert!(inherited_only(None, Some(&declared)).is_none());
    }

    #[test]
    fn internal_id_ignores_empty_values() {
        assert_eq!(internal_id(Some(&map(&[(INTERNAL_ID_KEY, "X")]))), Some("X"));
        assert_eq!(internal_id(Some(&map(&[(INTERNAL_ID_KEY, "")]))), None);
        assert_eq!(internal_id(Some(&map(&[("Site", "a")]))), None);
        assert_eq!(internal_id(None), None);
    }

    #[test]
    fn server_internal_id_rejects_non_strings() {
        let mut attrs = ExtAttrs::new();
        attrs.insert(
            INTERNAL_ID_KEY.to_string(),
            ExtAttr {
                value: json!(7),
                inheritance_source: None,
                inheritance_operation: None,
            },
        );

        assert!(matches!(
            server_internal_id(Some(&attrs)),
            Err(ExtAttrError::MalformedInternalId { .. })
        ));

        attrs.insert(INTERNAL_ID_KEY.to_string(), ExtAttr::new("X"));
        assert_eq!(server_internal_id(Some(&attrs)).unwrap().as_deref(), Some("X"));
        assert_eq!(server_internal_id(None).unwrap(), None);
    }
}
