use serde_json::Value;

/// Remote ids arrive as either JSON strings or numbers; both are kept as text.
#[must_use]
pub fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[must_use]
pub fn string_field(payload: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| payload.get(*key))
        .find_map(|value| match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// Entries of one list payload. `rejected` holds entries that were not
/// objects at all; they count toward the page length but carry no data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItems {
    pub items: Vec<Value>,
    pub rejected: Vec<Value>,
}

impl ListItems {
    /// Number of entries the remote actually sent.
    #[must_use]
    pub fn raw_len(&self) -> usize {
        self.items.len() + self.rejected.len()
    }
}

/// Lists come back as bare arrays of objects, as arrays of `{"<singular>": {..}}`
/// wrappers, or as an object carrying a `"<plural>"` array.
#[must_use]
pub fn unwrap_list(payload: Value, singular: &str, plural: &str) -> Option<ListItems> {
    let entries = match payload {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove(plural) {
            Some(Value::Array(entries)) => entries,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => return None,
        },
        _ => return None,
    };

    let mut list = ListItems::default();
    for entry in entries {
        match entry {
            Value::Object(mut map) => match map.remove(singular) {
                Some(inner @ Value::Object(_)) => list.items.push(inner),
                Some(other) => {
                    map.insert(singular.to_string(), other);
                    list.items.push(Value::Object(map));
                }
                None => list.items.push(Value::Object(map)),
            },
            other => list.rejected.push(other),
        }
    }
    Some(list)
}

#[must_use]
pub fn truncate_for_log(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut result: String = s.chars().take(max_chars).collect();
    result.push_str("...");
    result
}
