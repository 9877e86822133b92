use serde_json::Value;

/// Percent-encode `input` for use as a URL path segment or query value.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push_str("%20"),
            _ => {
                out.push('%');
                out.push_str(&format!("{b:02X}"));
            }
        }
    }
    out
}

/// What: Extract a list from a response that may or may not be wrapped.
///
/// Inputs:
/// - `v`: Response body
/// - `key`: Wrapper field name (e.g. `apps`)
///
/// Output:
/// - The bare array, the array under `key`, or `None` when neither is present.
#[must_use]
pub fn list_of(v: Value, key: &str) -> Option<Vec<Value>> {
    match v {
        Value::Array(arr) => Some(arr),
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(arr)) => Some(arr),
            _ => None,
        },
        _ => None,
    }
}

/// What: Extract a single object from a response that may or may not be wrapped.
///
/// Inputs:
/// - `v`: Response body
/// - `key`: Wrapper field name (e.g. `app`)
///
/// Output:
/// - The object under `key` (or the first element when that is an array), else
///   the body itself when it is an object; `None` otherwise.
#[must_use]
pub fn object_of(v: Value, key: &str) -> Option<Value> {
    match v {
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(arr)) => arr.into_iter().next(),
            Some(inner @ Value::Object(_)) => Some(inner),
            Some(_) => None,
            None => Some(Value::Object(map)),
        },
        Value::Array(arr) => arr.into_iter().next(),
        _ => None,
    }
}

/// Format a Unix timestamp (seconds) as `YYYY-MM-DD HH:MM:SS` in UTC.
#[must_use]
pub fn ts_to_date(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    /// What: Percent-encoding leaves unreserved bytes and escapes the rest
    ///
    /// - Input: "a b/c?1"
    /// - Output: "a%20b%2Fc%3F1"
    fn util_percent_encode_reserved() {
        assert_eq!(percent_encode("a b/c?1"), "a%20b%2Fc%3F1");
        assert_eq!(percent_encode("abc-1.0_~"), "abc-1.0_~");
    }

    #[test]
    /// What: Lists are found bare or under the wrapper key
    ///
    /// - Input: Bare array, wrapped array, wrong shape
    /// - Output: Some, Some, None
    fn util_list_of_shapes() {
        assert_eq!(list_of(json!([1, 2]), "apps").map(|v| v.len()), Some(2));
        assert_eq!(list_of(json!({"apps": [1]}), "apps").map(|v| v.len()), Some(1));
        assert!(list_of(json!({"success": false}), "apps").is_none());
    }

    #[test]
    /// What: Single objects are found wrapped, as first array element, or bare
    ///
    /// - Input: {"app": {...}}, {"app": [{...}]}, bare object, string
    /// - Output: The inner object for the first three; None for the string
    fn util_object_of_shapes() {
        assert_eq!(object_of(json!({"app": {"id": "x"}}), "app"), Some(json!({"id": "x"})));
        assert_eq!(object_of(json!({"app": [{"id": "y"}]}), "app"), Some(json!({"id": "y"})));
        assert_eq!(object_of(json!({"id": "z"}), "app"), Some(json!({"id": "z"})));
        assert!(object_of(json!("nope"), "app").is_none());
    }

    #[test]
    /// What: Timestamp formatting is UTC and fixed-width
    ///
    /// - Input: 0
    /// - Output: "1970-01-01 00:00:00"
    fn util_ts_to_date_epoch() {
        assert_eq!(ts_to_date(0), "1970-01-01 00:00:00");
    }
}
