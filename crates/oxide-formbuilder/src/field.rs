//! Field definitions and the ordered field registry.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::attrs::{AttrValue, Attributes};

/// Parameter keys that configure the field itself instead of becoming HTML
/// attributes.
///
/// `name` is neither reserved nor an attribute param: the `name` attribute
/// always equals the field name, so a `name` param is ignored.
pub const RESERVED_PARAMS: [&str; 5] =
    ["before_html", "after_html", "label", "required", "confirm"];

/// The attribute that binds a control to its submitted value.
const NAME_ATTRIBUTE: &str = "name";

/// Suffix of the companion field checked for `confirm` fields.
pub const CONFIRMATION_SUFFIX: &str = "_confirmation";

/// The kind of a field, used as the input `type` and for render dispatch.
///
/// Parsing is total: an empty string is [`FieldKind::Text`] and anything
/// unrecognized is kept as [`FieldKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    #[default]
    Text,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Password,
    Email,
    Hidden,
    Other(String),
}

/// How a field kind is turned into markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Self-closing `<input>` element.
    Input,
    /// `<textarea>` pair with the value as inner text.
    Textarea,
    /// `<select>` pair, options supplied by an option source.
    Select,
    /// Not rendered yet (radio and checkbox groups).
    Unsupported,
}

impl FieldKind {
    /// Parses a kind name.
    pub fn parse(kind: &str) -> Self {
        match kind {
            "" | "text" => Self::Text,
            "textarea" => Self::Textarea,
            "select" => Self::Select,
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            "password" => Self::Password,
            "email" => Self::Email,
            "hidden" => Self::Hidden,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the kind name, which is also the input `type`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Password => "password",
            Self::Email => "email",
            Self::Hidden => "hidden",
            Self::Other(kind) => kind,
        }
    }

    pub fn control(&self) -> Control {
        match self {
            Self::Textarea => Control::Textarea,
            Self::Select => Control::Select,
            Self::Radio | Self::Checkbox => Control::Unsupported,
            _ => Control::Input,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FieldKind {
    fn from(kind: &str) -> Self {
        Self::parse(kind)
    }
}

impl From<String> for FieldKind {
    fn from(kind: String) -> Self {
        Self::parse(&kind)
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A value in the `params` map passed to [`FieldRegistry::add_field`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<String>),
}

impl ParamValue {
    fn truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            Self::Text(s) => !s.is_empty() && s != "0",
            Self::List(items) => !items.is_empty(),
        }
    }

    fn text(&self) -> Option<String> {
        match self {
            Self::Bool(_) => None,
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::List(items) => Some(items.join(" ")),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Ordered field parameters: reserved settings and HTML attributes mixed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldParams {
    entries: IndexMap<String, ParamValue>,
}

impl FieldParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an arbitrary parameter.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Sets the label text.
    #[must_use]
    pub fn label(self, text: impl Into<String>) -> Self {
        self.set("label", ParamValue::Text(text.into()))
    }

    /// Explicitly disables the label.
    #[must_use]
    pub fn no_label(self) -> Self {
        self.set("label", false)
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(self) -> Self {
        self.set("required", true)
    }

    /// Requires a non-empty `<name>_confirmation` companion value.
    #[must_use]
    pub fn confirm(self) -> Self {
        self.set("confirm", true)
    }

    #[must_use]
    pub fn before_html(self, html: impl Into<String>) -> Self {
        self.set("before_html", ParamValue::Text(html.into()))
    }

    #[must_use]
    pub fn after_html(self, html: impl Into<String>) -> Self {
        self.set("after_html", ParamValue::Text(html.into()))
    }

    /// Adds an HTML attribute.
    #[must_use]
    pub fn attr(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, ParamValue::Text(value.into()))
    }

    /// Adds a list-valued HTML attribute.
    #[must_use]
    pub fn attr_list(self, key: impl Into<String>, values: Vec<&str>) -> Self {
        self.set(key, values)
    }

    /// Adds a boolean HTML attribute such as `disabled`.
    #[must_use]
    pub fn flag(self, key: impl Into<String>) -> Self {
        self.set(key, true)
    }

}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for FieldParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A registered form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    pub name: String,
    pub kind: FieldKind,
    /// HTML attributes; always contains `name` first.
    pub attributes: Attributes,
    /// `None` means no label element is rendered.
    pub label: Option<String>,
    pub required: bool,
    pub confirm: bool,
    /// Per-field wrapper markup. Stored for callers; the renderer uses its
    /// form-wide [`Wrapper`](crate::Wrapper) instead.
    pub before_html: Option<String>,
    pub after_html: Option<String>,
}

impl FieldDefinition {
    /// Builds a definition, routing reserved params to settings and the
    /// rest to attributes.
    pub fn new(name: impl Into<String>, kind: impl Into<FieldKind>, params: FieldParams) -> Self {
        let name = name.into();
        let mut field = Self {
            attributes: Attributes::new().with(NAME_ATTRIBUTE, name.as_str()),
            name,
            kind: kind.into(),
            label: None,
            required: false,
            confirm: false,
            before_html: None,
            after_html: None,
        };

        for (key, value) in params.entries {
            if RESERVED_PARAMS.contains(&key.as_str()) {
                field.apply_reserved(&key, &value);
                continue;
            }
            if key == NAME_ATTRIBUTE {
                warn!(field = %field.name, "Ignoring `name` param; the field name is used");
                continue;
            }
            match value {
                ParamValue::Bool(true) => field.attributes.set(key.clone(), key),
                ParamValue::Bool(false) => {}
                ParamValue::Number(n) => field.attributes.set(key, n.to_string()),
                ParamValue::Text(text) => field.attributes.set(key, text),
                ParamValue::List(items) => field.attributes.set(key, AttrValue::List(items)),
            }
        }

        field
    }

    fn apply_reserved(&mut self, key: &str, value: &ParamValue) {
        match key {
            "label" => self.label = value.text(),
            "required" => self.required = value.truthy(),
            "confirm" => self.confirm = value.truthy(),
            "before_html" => self.before_html = value.text(),
            "after_html" => self.after_html = value.text(),
            _ => {}
        }
    }

    /// Name of the companion field checked when `confirm` is set.
    pub fn confirmation_name(&self) -> String {
        format!("{}{CONFIRMATION_SUFFIX}", self.name)
    }
}

/// Form-level attributes plus the ordered, uniquely keyed field set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldRegistry {
    attributes: Attributes,
    fields: IndexMap<String, FieldDefinition>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts a form-level attribute.
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> &mut Self {
        self.attributes.set(key, value);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Registers a field. Re-adding a name replaces the definition but keeps
    /// its original position.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        kind: impl Into<FieldKind>,
        params: FieldParams,
    ) -> &mut Self {
        let field = FieldDefinition::new(name, kind, params);
        self.fields.insert(field.name.clone(), field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    /// Fields in registration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
