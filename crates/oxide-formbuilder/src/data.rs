//! Submitted form data.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::warn;

use crate::error::Result;

/// Submitted values keyed by field name, replaced wholesale on each submit.
pub type FormData = IndexMap<String, String>;

/// Returns the submitted value for `name` when it is present and non-empty.
pub fn submitted<'a>(data: &'a FormData, name: &str) -> Option<&'a str> {
    data.get(name).map(String::as_str).filter(|v| !v.is_empty())
}

/// Parses a JSON object into form data.
///
/// Strings are taken as-is, numbers and booleans are stringified, `null`
/// entries are dropped. Nested arrays and objects have no form encoding and
/// are skipped.
pub fn parse_form_data(json: &str) -> Result<FormData> {
    let raw: IndexMap<String, Value> = serde_json::from_str(json)?;
    let mut data = FormData::new();
    for (name, value) in raw {
        match value {
            Value::String(s) => {
                data.insert(name, s);
            }
            Value::Number(n) => {
                data.insert(name, n.to_string());
            }
            Value::Bool(b) => {
                data.insert(name, b.to_string());
            }
            Value::Null => {}
            Value::Array(_) | Value::Object(_) => {
                warn!(field = %name, "Skipping non-scalar submitted value");
            }
        }
    }
    Ok(data)
}
