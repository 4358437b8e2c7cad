//! Declarative form definitions loaded from JSON.
//!
//! ```json
//! {
//!   "action": "/signup",
//!   "fields": [
//!     {"name": "email", "kind": "email", "params": {"label": "Email", "required": true}},
//!     {"name": "password", "kind": "password", "params": {"confirm": true}}
//!   ],
//!   "validators": {"email": [{"type": "email"}]},
//!   "error_messages": {"email": {"required": "Email is required"}}
//! }
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::attrs::Attributes;
use crate::error::{FormError, Result};
use crate::field::{FieldKind, FieldParams};
use crate::form::Form;
use crate::messages::MessageCatalog;
use crate::render::StaticOptions;
use crate::validation::{Check, Rule, ValidationMode, Validator};

/// A complete form definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormConfig {
    #[serde(default)]
    pub action: Option<String>,
    /// Form attributes; these override the defaults.
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    #[serde(default)]
    pub error_messages: MessageCatalog,
    #[serde(default)]
    pub validators: IndexMap<String, Vec<ValidatorSpec>>,
    #[serde(default)]
    pub mode: ValidationMode,
    /// Select options as `[value, label]` pairs per field.
    #[serde(default)]
    pub options: IndexMap<String, Vec<(String, String)>>,
}

/// One field entry, mirroring the arguments of [`Form::add_field`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub params: FieldParams,
}

/// A built-in validator declared in configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidatorSpec {
    MinLength {
        value: usize,
        #[serde(default)]
        code: Option<String>,
    },
    MaxLength {
        value: usize,
        #[serde(default)]
        code: Option<String>,
    },
    Email {
        #[serde(default)]
        code: Option<String>,
    },
    Url {
        #[serde(default)]
        code: Option<String>,
    },
    Regex {
        pattern: String,
        code: String,
    },
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default)]
        code: Option<String>,
    },
}

impl ValidatorSpec {
    /// Instantiates the validator.
    pub fn build(&self) -> Result<Box<dyn Validator>> {
        let validator = match self {
            Self::MinLength { value, code } => with_code(Rule::min_length(*value), code),
            Self::MaxLength { value, code } => with_code(Rule::max_length(*value), code),
            Self::Email { code } => with_code(Rule::email(), code),
            Self::Url { code } => with_code(Rule::url(), code),
            Self::Regex { pattern, code } => Box::new(Rule::pattern(pattern, code)?),
            Self::Range { min, max, code } => with_code(Rule::range(*min, *max), code),
        };
        Ok(validator)
    }
}

/// Boxes `rule`, replacing its default code when one is configured.
fn with_code<C: Check + 'static>(rule: Rule<C>, code: &Option<String>) -> Box<dyn Validator> {
    match code {
        Some(code) => Box::new(rule.with_code(code)),
        None => Box::new(rule),
    }
}

impl FormConfig {
    /// Parses a JSON form definition.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds a [`Form`] from this definition.
    ///
    /// Fails if a regex pattern does not compile or a validator names a
    /// field that is not declared.
    pub fn build(&self) -> Result<Form> {
        let mut form = match self.action.as_deref() {
            Some(action) => Form::with_action_and_attributes(action, self.attributes.clone()),
            None => Form::with_attributes(self.attributes.clone()),
        };

        for field in &self.fields {
            form.add_field(&field.name, field.kind.clone(), field.params.clone());
        }

        for (name, specs) in &self.validators {
            if form.field(name).is_none() {
                return Err(FormError::UnknownField(name.clone()));
            }
            for spec in specs {
                form.add_boxed_validator(name, spec.build()?);
            }
        }

        if !self.options.is_empty() {
            let mut options = StaticOptions::new();
            for (name, choices) in &self.options {
                options.insert(name, choices.clone());
            }
            form.set_option_source(options);
        }

        form.set_error_messages(self.error_messages.clone());
        form.set_validation_mode(self.mode);

        debug!(
            fields = self.fields.len(),
            validators = self.validators.len(),
            "Built form from configuration"
        );
        Ok(form)
    }
}
