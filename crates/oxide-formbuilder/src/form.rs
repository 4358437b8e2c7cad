//! The `Form` façade: registry, submitted data, errors and rendering.

use serde::Serialize;
use tracing::{debug, trace};

use crate::attrs::{AttrValue, Attributes};
use crate::data::FormData;
use crate::error::Result;
use crate::field::{FieldDefinition, FieldKind, FieldParams, FieldRegistry};
use crate::messages::MessageCatalog;
use crate::render::{OptionSource, Renderer, Wrapper};
use crate::validation::{self, CustomValidators, ErrorCollection, ValidationMode, Validator};

/// Form attributes applied before any caller-supplied ones.
pub const DEFAULT_ATTRIBUTES: [(&str, &str); 3] = [
    ("method", "post"),
    ("accept-charset", "utf-8"),
    ("enctype", "application/x-www-form-urlencoded"),
];

/// A form owned by a single request: declare fields, set data, validate,
/// render.
///
/// ```rust
/// use oxide_formbuilder::{FieldParams, Form, FormData};
///
/// let mut form = Form::with_action("/signup");
/// form.add_field("email", "email", FieldParams::new().label("Email").required());
///
/// assert!(!form.validate());
/// assert!(form.render().contains("field-with-errors required"));
///
/// let mut data = FormData::new();
/// data.insert("email".to_string(), "alice@example.com".to_string());
/// form.set_data(data);
/// assert!(form.validate());
/// ```
#[derive(Debug)]
pub struct Form {
    registry: FieldRegistry,
    data: FormData,
    errors: ErrorCollection,
    messages: MessageCatalog,
    validators: CustomValidators,
    mode: ValidationMode,
    renderer: Renderer,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    /// Creates a form carrying only the default attributes.
    pub fn new() -> Self {
        Self::build(None, Attributes::new())
    }

    /// Creates a form posting to `action`.
    pub fn with_action(action: &str) -> Self {
        Self::build(Some(action), Attributes::new())
    }

    /// Creates a form whose attributes override the defaults.
    pub fn with_attributes(attributes: Attributes) -> Self {
        Self::build(None, attributes)
    }

    pub fn with_action_and_attributes(action: &str, attributes: Attributes) -> Self {
        Self::build(Some(action), attributes)
    }

    fn build(action: Option<&str>, attributes: Attributes) -> Self {
        let mut registry = FieldRegistry::new();
        if let Some(action) = action.filter(|a| !a.is_empty()) {
            registry.set_attribute("action", action);
        }
        for (key, value) in DEFAULT_ATTRIBUTES {
            registry.set_attribute(key, value);
        }
        for (key, value) in attributes.iter() {
            registry.set_attribute(key, value.clone());
        }

        Self {
            registry,
            data: FormData::new(),
            errors: ErrorCollection::new(),
            messages: MessageCatalog::new(),
            validators: CustomValidators::new(),
            mode: ValidationMode::default(),
            renderer: Renderer::new(),
        }
    }

    /// Replaces the error message catalog.
    pub fn set_error_messages(&mut self, catalog: MessageCatalog) {
        self.messages = catalog;
    }

    pub fn error_messages(&self) -> &MessageCatalog {
        &self.messages
    }

    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.registry.attribute(key)
    }

    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> &mut Self {
        self.registry.set_attribute(key, value);
        self
    }

    /// Replaces the submitted data.
    pub fn set_data(&mut self, data: FormData) {
        self.data = data;
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// Registers a field; see [`FieldDefinition::new`] for param handling.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        kind: impl Into<FieldKind>,
        params: FieldParams,
    ) -> &mut Self {
        let name = name.into();
        trace!(field = %name, "Adding field");
        self.registry.add_field(name, kind, params);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.registry.field(name)
    }

    /// Fields in registration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.registry.fields()
    }

    /// Registers a custom validator for a field.
    pub fn add_validator(
        &mut self,
        field: impl Into<String>,
        validator: impl Validator + 'static,
    ) -> &mut Self {
        self.validators.add(field, validator);
        self
    }

    pub fn add_boxed_validator(
        &mut self,
        field: impl Into<String>,
        validator: Box<dyn Validator>,
    ) -> &mut Self {
        self.validators.add_boxed(field, validator);
        self
    }

    pub fn set_validation_mode(&mut self, mode: ValidationMode) {
        self.mode = mode;
    }

    /// Replaces the field wrapper; `None` disables wrapping.
    pub fn set_wrapper(&mut self, wrapper: Option<Wrapper>) {
        self.renderer.set_wrapper(wrapper);
    }

    /// Sets the source of `<option>` entries for select fields.
    pub fn set_option_source(&mut self, source: impl OptionSource + 'static) {
        self.renderer.set_option_source(source);
    }

    /// Validates the submitted data, replacing any previous errors.
    pub fn validate(&mut self) -> bool {
        let valid = validation::validate(
            &self.registry,
            &self.data,
            &self.validators,
            self.mode,
            &mut self.errors,
        );
        debug!(valid, fields_with_errors = self.errors.len(), "Form validated");
        valid
    }

    pub fn errors(&self) -> &ErrorCollection {
        &self.errors
    }

    /// Records an error outside the validation pipeline, e.g. from a
    /// uniqueness check done by the caller. Cleared by the next `validate`.
    pub fn add_error(&mut self, field: &str, code: impl Into<String>) {
        self.errors.add(field, code);
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Renders the complete form.
    pub fn render(&self) -> String {
        self.renderer
            .render_form(&self.registry, &self.data, &self.errors, &self.messages)
    }

    /// Renders one field, or an empty string if it is not registered.
    pub fn field_markup(&self, name: &str) -> String {
        match self.registry.field(name) {
            Some(field) => {
                self.renderer
                    .render_field(field, &self.data, &self.errors, &self.messages)
            }
            None => String::new(),
        }
    }

    /// Dumps attributes, fields, data and errors as preformatted JSON.
    pub fn dump(&self) -> Result<String> {
        #[derive(Serialize)]
        struct Snapshot<'a> {
            attributes: &'a Attributes,
            fields: Vec<&'a FieldDefinition>,
            data: &'a FormData,
            errors: &'a ErrorCollection,
        }

        crate::debug::dump(&Snapshot {
            attributes: self.registry.attributes(),
            fields: self.registry.fields().map(|(_, field)| field).collect(),
            data: &self.data,
            errors: &self.errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Rule;

    fn data(pairs: &[(&str, &str)]) -> FormData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_attributes() {
        let form = Form::new();
        assert_eq!(form.attribute("method"), Some(&AttrValue::from("post")));
        assert_eq!(form.attribute("accept-charset"), Some(&AttrValue::from("utf-8")));
        assert_eq!(
            form.attribute("enctype"),
            Some(&AttrValue::from("application/x-www-form-urlencoded"))
        );
        assert_eq!(form.attribute("action"), None);
    }

    #[test]
    fn test_action_comes_first() {
        let form = Form::with_action("/signup");
        assert_eq!(
            form.render(),
            concat!(
                "<form action=\"/signup\" method=\"post\" accept-charset=\"utf-8\" ",
                "enctype=\"application/x-www-form-urlencoded\">\n",
                "</form>"
            )
        );
    }

    #[test]
    fn test_empty_action_is_ignored() {
        let form = Form::with_action("");
        assert_eq!(form.attribute("action"), None);
    }

    #[test]
    fn test_attributes_override_defaults() {
        let form = Form::with_attributes(
            Attributes::new()
                .with("method", "get")
                .with("id", "search"),
        );
        assert_eq!(form.attribute("method"), Some(&AttrValue::from("get")));
        assert!(form.render().starts_with(
            concat!(
                "<form method=\"get\" accept-charset=\"utf-8\" ",
                "enctype=\"application/x-www-form-urlencoded\" id=\"search\">"
            )
        ));
    }

    #[test]
    fn test_set_attribute_later() {
        let mut form = Form::new();
        form.set_attribute("method", "get")
            .set_attribute("class", vec!["a", "b"]);
        assert_eq!(form.attribute("method"), Some(&AttrValue::from("get")));
        assert_eq!(form.attribute("class").map(AttrValue::joined), Some("a b".to_string()));
    }

    #[test]
    fn test_field_markup_unknown_field_is_empty() {
        let form = Form::new();
        assert_eq!(form.field_markup("missing"), "");
    }

    #[test]
    fn test_set_data_replaces() {
        let mut form = Form::new();
        form.set_data(data(&[("a", "1")]));
        form.set_data(data(&[("b", "2")]));
        assert!(form.data().get("a").is_none());
        assert_eq!(form.data().get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_validate_then_render_errors() {
        let mut form = Form::new();
        form.add_field("name", "text", FieldParams::new().required());
        form.set_error_messages(MessageCatalog::new().with("name", "required", "Name, please"));

        assert!(!form.validate());
        assert_eq!(
            form.field_markup("name"),
            concat!(
                "<div class=\"field-with-errors required\">\n",
                "<input type=\"text\" name=\"name\" />\n",
                "<span class=\"error-message required\">Name, please</span>\n",
                "</div>\n"
            )
        );
    }

    #[test]
    fn test_custom_validator_through_form() {
        let mut form = Form::new();
        form.add_field("username", "text", FieldParams::new())
            .add_validator("username", Rule::min_length(3));
        form.set_data(data(&[("username", "al")]));

        assert!(!form.validate());
        assert!(form.errors().contains("username", "min_length"));
    }

    #[test]
    fn test_add_error_and_clear() {
        let mut form = Form::new();
        form.add_field("email", "email", FieldParams::new());
        form.add_error("email", "taken");
        assert!(form.field_markup("email").contains("field-with-errors taken"));

        form.clear_errors();
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_dump_contains_state() {
        let mut form = Form::with_action("/x");
        form.add_field("email", "email", FieldParams::new());
        form.set_data(data(&[("email", "alice")]));
        let html = form.dump().unwrap();
        assert!(html.contains("alice"));
        assert!(html.contains("accept-charset"));
    }
}
