//! `deserialize_with` helpers for bodies written by the remote service,
//! where one badly typed field must not sink the whole body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `Some(T)` when the field has the expected type, `None` for anything else
/// (including `null`).
pub(crate) fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Keeps the array items that have the expected shape and skips the rest.
/// Anything other than an array reads as `None`.
pub(crate) fn items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Envelope {
        #[serde(default, deserialize_with = "option")]
        count: Option<u16>,
        #[serde(default, deserialize_with = "items")]
        names: Option<Vec<String>>,
    }

    fn read(value: Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn option_keeps_well_typed_value() {
        assert_eq!(read(json!({ "count": 400 })).count, Some(400));
    }

    #[test]
    fn option_drops_mistyped_value() {
        assert_eq!(read(json!({ "count": "400" })).count, None);
        assert_eq!(read(json!({ "count": null })).count, None);
        assert_eq!(read(json!({ "count": -1 })).count, None);
    }

    #[test]
    fn missing_fields_default_to_none() {
        assert_eq!(
            read(json!({})),
            Envelope {
                count: None,
                names: None
            }
        );
    }

    #[test]
    fn items_skips_mistyped_entries() {
        let names = read(json!({ "names": ["a", 1, null, "b"] })).names;

        assert_eq!(names, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn items_reads_non_array_as_none() {
        assert_eq!(read(json!({ "names": "a" })).names, None);
    }
}
