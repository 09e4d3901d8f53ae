//! Duplicate detection over a list of records.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Marker set to `true` on records that share a property value.
pub const DUPLICATE_MARKER: &str = "duplicate";

/// Key shared by records without the property.
const ABSENT_KEY: &str = "undefined";

/// Text form of a property value: string contents, comma-joined arrays, and
/// one shared key for every object.
fn text_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => text_key(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
        other => other.to_string(),
    }
}

/// Marks records whose `property` values collide and reports whether any did.
///
/// The first record carrying a value has a stale marker cleared; once a later
/// record repeats that value, both get `"duplicate": true`.
///
/// Values compare by their text form, so `1` and `"1"` collide. Records
/// missing `property` compare equal to each other.
///
/// # Examples
///
/// ```
/// use serde_json::{Map, Value, json};
/// use verity_support::{DUPLICATE_MARKER, has_duplicates};
///
/// let mut records: Vec<Map<String, Value>> = [json!({"id": 1}), json!({"id": 2}), json!({"id": 1})]
///     .into_iter()
///     .filter_map(|v| v.as_object().cloned())
///     .collect();
///
/// assert!(has_duplicates("id", &mut records));
/// assert_eq!(records[0].get(DUPLICATE_MARKER), Some(&json!(true)));
/// assert_eq!(records[1].get(DUPLICATE_MARKER), None);
/// ```
pub fn has_duplicates(property: &str, records: &mut [Map<String, Value>]) -> bool {
    if records.is_empty() {
        return false;
    }

    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut found = false;

    for index in 0..records.len() {
        let key = records[index]
            .get(property)
            .map_or_else(|| ABSENT_KEY.to_owned(), text_key);

        match first_seen.get(&key) {
            Some(&first) => {
                records[first].insert(DUPLICATE_MARKER.to_owned(), Value::Bool(true));
                records[index].insert(DUPLICATE_MARKER.to_owned(), Value::Bool(true));
                found = true;
            }
            None => {
                records[index].remove(DUPLICATE_MARKER);
                first_seen.insert(key, index);
            }
        }
    }

    tracing::trace!(property, records = records.len(), found, "duplicate scan");
    found
}
