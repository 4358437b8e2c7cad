//! # oxide-formbuilder
//!
//! Declarative HTML form builder.
//!
//! This crate provides:
//! - An ordered field registry with typed attribute values
//! - A staged validation pipeline (required, confirmation, custom rules)
//! - Markup rendering with inline error annotations
//! - Per-form error message catalogs
//! - JSON form definitions
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_formbuilder::{FieldParams, Form, FormData, MessageCatalog};
//!
//! let mut form = Form::with_action("/signup");
//! form.add_field("email", "email", FieldParams::new().label("Email").required())
//!     .add_field("password", "password", FieldParams::new().confirm());
//! form.set_error_messages(
//!     MessageCatalog::new().with("email", "required", "Email is required"),
//! );
//!
//! let mut data = FormData::new();
//! data.insert("password".to_string(), "hunter2".to_string());
//! form.set_data(data);
//!
//! assert!(!form.validate());
//! assert!(form.field_markup("email").contains("Email is required"));
//! ```
//!
//! ## Custom Validators
//!
//! ```rust
//! use oxide_formbuilder::validation::Rule;
//! use oxide_formbuilder::{FieldParams, Form, FormData};
//!
//! let mut form = Form::new();
//! form.add_field("username", "text", FieldParams::new())
//!     .add_validator("username", Rule::min_length(3))
//!     .add_validator(
//!         "username",
//!         Rule::predicate("lowercase", |s: &str| s.chars().all(char::is_lowercase)),
//!     );
//!
//! let mut data = FormData::new();
//! data.insert("username".to_string(), "Al".to_string());
//! form.set_data(data);
//!
//! assert!(!form.validate());
//! assert_eq!(
//!     form.errors().get("username"),
//!     Some(&["min_length".to_string(), "lowercase".to_string()][..])
//! );
//! ```
//!
//! ## Field Kinds
//!
//! - `text`, `password`, `email`, `hidden` and unknown kinds - `<input>`
//! - `textarea` - `<textarea>` with the submitted value as content
//! - `select` - `<select>`, options from an [`OptionSource`]
//! - `radio`, `checkbox` - not rendered yet

mod attrs;
pub mod config;
mod data;
pub mod debug;
mod error;
mod field;
mod form;
mod messages;
pub mod render;
pub mod validation;

pub use attrs::{html_escape, AttrValue, Attributes};
pub use config::{FieldConfig, FormConfig, ValidatorSpec};
pub use data::{parse_form_data, submitted, FormData};
pub use error::{FormError, Result};
pub use field::{
    Control, FieldDefinition, FieldKind, FieldParams, FieldRegistry, ParamValue,
    CONFIRMATION_SUFFIX, RESERVED_PARAMS,
};
pub use form::{Form, DEFAULT_ATTRIBUTES};
pub use messages::{MessageCatalog, DEFAULT_ERROR_MESSAGE};
pub use render::{OptionSource, Renderer, StaticOptions, Wrapper};
pub use validation::{CustomValidators, ErrorCollection, ValidationMode, Validator};
