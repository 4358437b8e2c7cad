//! Debug dump of in-memory structures as preformatted HTML.

use ironhtml::html;
use serde::Serialize;

use crate::error::Result;

/// Serializes `value` as pretty JSON inside a `<pre>` element.
pub fn dump<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string_pretty(value)?;
    Ok(html! { pre { #json } }.render())
}
