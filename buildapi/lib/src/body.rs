//! Body parameters for mutating calls.
//!
//! Parameters are a string-keyed mapping of JSON-like values. On the wire
//! they become a URL-encoded form:
//!
//! - strings as-is; numbers and booleans in their JSON text form
//! - `null` as an empty value
//! - lists as the same key repeated once per element
//! - mappings as `key[sub]=value`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body parameters of a single call.
///
/// ## Examples
///
/// ```
/// use buildapi::BodyParams;
///
/// let params = BodyParams::new()
///     .with("build_id", 1234)
///     .with("priority", 2);
///
/// assert!(params.contains("build_id"));
/// assert_eq!(
///     params.to_form_pairs(),
///     vec![
///         ("build_id".to_string(), "1234".to_string()),
///         ("priority".to_string(), "2".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyParams(Map<String, Value>);

impl BodyParams {
    /// Creates empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns `true` if `key` is present (a `null` value counts as present).
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Looks up a parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of top-level parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over top-level parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Flattens the parameters into form key/value pairs.
    pub fn to_form_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.0 {
            flatten(key, value, &mut pairs);
        }
        pairs
    }
}

fn flatten(key: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => out.push((key.to_string(), String::new())),
        Value::Bool(b) => out.push((key.to_string(), b.to_string())),
        Value::Number(n) => out.push((key.to_string(), n.to_string())),
        Value::String(s) => out.push((key.to_string(), s.clone())),
        Value::Array(items) => {
            for item in items {
                flatten(key, item, out);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                flatten(&format!("{key}[{sub}]"), item, out);
            }
        }
    }
}

impl From<Map<String, Value>> for BodyParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for BodyParams
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
