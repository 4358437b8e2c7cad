//! Markup rendering for forms and individual fields.
//!
//! Every element is emitted on its own line. A field renders as:
//!
//! ```text
//! <div class="field-with-errors required">
//! <label for="email">Email</label>
//! <input type="email" name="email" />
//! <span class="error-message required">Invalid field</span>
//! </div>
//! ```
//!
//! The `class` on the wrapper only appears when the field has errors (or
//! the [`Wrapper`] carries classes of its own).

use std::fmt;

use indexmap::IndexMap;
use ironhtml::html;
use tracing::trace;

use crate::attrs::{html_escape, Attributes};
use crate::data::{submitted, FormData};
use crate::field::{Control, FieldDefinition, FieldRegistry};
use crate::messages::MessageCatalog;
use crate::validation::ErrorCollection;

/// Class added to the wrapper of a field that has errors.
pub const FIELD_WITH_ERRORS: &str = "field-with-errors";

/// Class on the inline error element.
pub const ERROR_MESSAGE_CLASS: &str = "error-message";

/// The `<div>` wrapped around every rendered field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wrapper {
    /// Classes always present on the wrapper.
    pub classes: Vec<String>,
}

impl Wrapper {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Wraps already rendered field markup, adding the error classes when
    /// `codes` is non-empty.
    pub fn wrap(&self, codes: &[String], inner: &str) -> String {
        let mut classes: Vec<&str> = self.classes.iter().map(String::as_str).collect();
        if !codes.is_empty() {
            classes.push(FIELD_WITH_ERRORS);
            classes.extend(codes.iter().map(String::as_str));
        }
        let classes = classes.join(" ");

        let mut html = html! { div }
            .when(!classes.is_empty(), |div| div.class(classes))
            .raw(format!("\n{inner}"))
            .render();
        html.push('\n');
        html
    }
}

/// Supplies `<option>` entries for select fields.
pub trait OptionSource: Send + Sync {
    /// Returns `(value, label)` pairs for the field, in display order.
    fn options(&self, field: &FieldDefinition) -> Vec<(String, String)>;
}

/// Fixed options per field name.
#[derive(Debug, Clone, Default)]
pub struct StaticOptions {
    choices: IndexMap<String, Vec<(String, String)>>,
}

impl StaticOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the choices for a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, choices: Vec<(&str, &str)>) -> Self {
        self.insert(
            name,
            choices
                .into_iter()
                .map(|(v, l)| (v.to_string(), l.to_string()))
                .collect(),
        );
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, choices: Vec<(String, String)>) {
        self.choices.insert(name.into(), choices);
    }

}

impl OptionSource for StaticOptions {
    fn options(&self, field: &FieldDefinition) -> Vec<(String, String)> {
        self.choices.get(&field.name).cloned().unwrap_or_default()
    }
}

/// Turns field definitions, submitted data and errors into markup.
pub struct Renderer {
    wrapper: Option<Wrapper>,
    options: Option<Box<dyn OptionSource>>,
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("wrapper", &self.wrapper)
            .field("has_options", &self.options.is_some())
            .finish()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Creates a renderer with the default `<div>` wrapper.
    pub fn new() -> Self {
        Self {
            wrapper: Some(Wrapper::default()),
            options: None,
        }
    }

    /// Replaces the wrapper; `None` renders fields unwrapped.
    pub fn set_wrapper(&mut self, wrapper: Option<Wrapper>) {
        self.wrapper = wrapper;
    }

    pub fn set_option_source(&mut self, source: impl OptionSource + 'static) {
        self.options = Some(Box::new(source));
    }

    /// Renders the whole form: opening tag, every field in order, closing tag.
    pub fn render_form(
        &self,
        registry: &FieldRegistry,
        data: &FormData,
        errors: &ErrorCollection,
        catalog: &MessageCatalog,
    ) -> String {
        let attrs = registry.attributes();
        let mut html = if attrs.is_empty() {
            "<form>\n".to_string()
        } else {
            format!("<form {}>\n", attrs.to_html())
        };

        for (_, field) in registry.fields() {
            html.push_str(&self.render_field(field, data, errors, catalog));
        }

        html.push_str("</form>");
        html
    }

    /// Renders a single field with its wrapper, label and error annotation.
    pub fn render_field(
        &self,
        field: &FieldDefinition,
        data: &FormData,
        errors: &ErrorCollection,
        catalog: &MessageCatalog,
    ) -> String {
        let codes = errors.get(&field.name).unwrap_or_default();
        let mut html = String::new();

        if let Some(label) = &field.label {
            let name = field.name.as_str();
            html.push_str(&html! { label.for_(#name) { #label } }.render());
            html.push('\n');
        }

        match field.kind.control() {
            Control::Textarea => {
                let content = data
                    .get(&field.name)
                    .map(|v| html_escape(v))
                    .unwrap_or_default();
                html.push_str(&format!(
                    "<textarea {}>{content}</textarea>\n",
                    field.attributes.to_html()
                ));
            }
            Control::Select => {
                html.push_str(&self.render_select(field, data));
                html.push('\n');
            }
            Control::Unsupported => {
                trace!(field = %field.name, kind = %field.kind, "No markup for field kind");
            }
            Control::Input => {
                html.push_str(&render_input(field, data));
                html.push('\n');
            }
        }

        if let Some(first) = codes.first() {
            let classes = format!("{ERROR_MESSAGE_CLASS} {}", codes.join(" "));
            let message = catalog.message(&field.name, first);
            html.push_str(&html! { span.class(#classes) { #message } }.render());
            html.push('\n');
        }

        match &self.wrapper {
            Some(wrapper) => wrapper.wrap(codes, &html),
            None => html,
        }
    }

    fn render_select(&self, field: &FieldDefinition, data: &FormData) -> String {
        let choices = self
            .options
            .as_ref()
            .map(|source| source.options(field))
            .unwrap_or_default();
        let attrs = field.attributes.to_html();

        if choices.is_empty() {
            return format!("<select {attrs}></select>");
        }

        let current = submitted(data, &field.name);
        let options: Vec<String> = choices
            .iter()
            .map(|(value, label)| {
                let option_attrs = if current == Some(value.as_str()) {
                    Attributes::new()
                        .with("value", value.as_str())
                        .with("selected", "selected")
                } else {
                    Attributes::new().with("value", value.as_str())
                };
                format!(
                    "<option {}>{}</option>",
                    option_attrs.to_html(),
                    html_escape(label)
                )
            })
            .collect();

        format!("<select {attrs}>\n{}\n</select>", options.join("\n"))
    }
}

fn render_input(field: &FieldDefinition, data: &FormData) -> String {
    let value_attr = submitted(data, &field.name)
        .map(|v| format!(r#" value="{}""#, html_escape(v)))
        .unwrap_or_default();
    format!(
        r#"<input type="{}"{value_attr} {} />"#,
        html_escape(field.kind.as_str()),
        field.attributes.to_html()
    )
}
