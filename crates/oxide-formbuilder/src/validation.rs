//! Validation pipeline, error collection and custom validators.
//!
//! Validation runs three stages in order:
//!
//! 1. required fields must have a non-empty submitted value (code
//!    `"required"`),
//! 2. `confirm` fields need a non-empty `<name>_confirmation` value (the
//!    error is recorded on the companion field, with its own name as code),
//! 3. custom validators registered per field.
//!
//! A stage fails only when it recorded an error. With
//! [`ValidationMode::HaltOnFailure`] the first failing stage ends the run;
//! [`ValidationMode::Accumulate`] always runs every stage.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::data::{submitted, FormData};
use crate::field::FieldRegistry;

/// Error code recorded for a missing required value.
pub const REQUIRED: &str = "required";

/// Error codes by field, each field's codes distinct and in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorCollection {
    errors: IndexMap<String, Vec<String>>,
}

impl ErrorCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error code for a field; a code already present is ignored.
    pub fn add(&mut self, field: &str, code: impl Into<String>) {
        let code = code.into();
        let codes = self.errors.entry(field.to_string()).or_default();
        if !codes.contains(&code) {
            codes.push(code);
        }
    }

    /// Returns the codes recorded for a field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    /// Returns the first code recorded for a field.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .and_then(|codes| codes.first())
            .map(String::as_str)
    }

    pub fn contains(&self, field: &str, code: &str) -> bool {
        self.errors
            .get(field)
            .is_some_and(|codes| codes.iter().any(|c| c == code))
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Returns all errors as a flat list of `(field, code)`.
    pub fn all_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(field, codes)| codes.iter().map(move |c| (field.as_str(), c.as_str())))
            .collect()
    }
}

impl fmt::Display for ErrorCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, codes) in &self.errors {
            writeln!(f, "{field}: {}", codes.join(", "))?;
        }
        Ok(())
    }
}

/// Trait for custom field validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns the error code if invalid.
    fn validate(&self, value: &str) -> Result<(), String>;

    /// Returns the error code reported by this validator.
    fn code(&self) -> &str;
}

/// A test on a submitted value. [`Rule`] pairs it with an error code.
pub trait Check: Send + Sync {
    fn check(&self, value: &str) -> bool;
}

/// A [`Check`] reporting a single error code when it fails.
///
/// Every built-in rule has a default code, replaceable with
/// [`Rule::with_code`]; the code is what error messages are looked up by.
///
/// ```rust
/// use oxide_formbuilder::validation::{Rule, Validator};
///
/// let rule = Rule::min_length(3).with_code("too_short");
/// assert_eq!(rule.validate("ab"), Err("too_short".to_string()));
/// assert!(rule.validate("abc").is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Rule<C> {
    check: C,
    code: String,
}

impl<C: Check> Rule<C> {
    pub fn new(code: impl Into<String>, check: C) -> Self {
        Self {
            check,
            code: code.into(),
        }
    }

    /// Replaces the reported error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

impl<C: Check> Validator for Rule<C> {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.check.check(value) {
            Ok(())
        } else {
            Err(self.code.clone())
        }
    }

    fn code(&self) -> &str {
        &self.code
    }
}

/// At least this many characters.
#[derive(Debug, Clone, Copy)]
pub struct MinLength(pub usize);

impl Check for MinLength {
    fn check(&self, value: &str) -> bool {
        value.chars().count() >= self.0
    }
}

/// At most this many characters.
#[derive(Debug, Clone, Copy)]
pub struct MaxLength(pub usize);

impl Check for MaxLength {
    fn check(&self, value: &str) -> bool {
        value.chars().count() <= self.0
    }
}

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email regex is valid")
});

#[derive(Debug, Clone, Copy)]
pub struct Email;

impl Check for Email {
    fn check(&self, value: &str) -> bool {
        EMAIL_REGEX.is_match(value)
    }
}

/// An http(s) URL.
#[derive(Debug, Clone, Copy)]
pub struct Url;

impl Check for Url {
    fn check(&self, value: &str) -> bool {
        value.starts_with("http://") || value.starts_with("https://")
    }
}

#[derive(Debug, Clone)]
pub struct Pattern(pub Regex);

impl Check for Pattern {
    fn check(&self, value: &str) -> bool {
        self.0.is_match(value)
    }
}

/// A number within optional inclusive bounds. Non-numeric input fails.
#[derive(Debug, Clone, Copy)]
pub struct Range {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Check for Range {
    fn check(&self, value: &str) -> bool {
        let Ok(num) = value.trim().parse::<f64>() else {
            return false;
        };
        !(self.min.is_some_and(|min| num < min) || self.max.is_some_and(|max| num > max))
    }
}

/// A closure deciding whether a value is valid.
pub struct Predicate<F>(pub F);

impl<F> Check for Predicate<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn check(&self, value: &str) -> bool {
        (self.0)(value)
    }
}

impl Rule<MinLength> {
    pub fn min_length(min: usize) -> Self {
        Self::new("min_length", MinLength(min))
    }
}

impl Rule<MaxLength> {
    pub fn max_length(max: usize) -> Self {
        Self::new("max_length", MaxLength(max))
    }
}

impl Rule<Email> {
    pub fn email() -> Self {
        Self::new("email", Email)
    }
}

impl Rule<Url> {
    pub fn url() -> Self {
        Self::new("url", Url)
    }
}

impl Rule<Pattern> {
    /// Compiles `pattern`; there is no default code for a pattern rule.
    pub fn pattern(pattern: &str, code: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self::new(code, Pattern(Regex::new(pattern)?)))
    }
}

impl Rule<Range> {
    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Self::new("range", Range { min, max })
    }
}

impl<F> Rule<Predicate<F>>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    pub fn predicate(code: impl Into<String>, predicate: F) -> Self {
        Self::new(code, Predicate(predicate))
    }
}

/// Custom validators in registration order, each bound to a field name.
#[derive(Default)]
pub struct CustomValidators {
    validators: Vec<(String, Box<dyn Validator>)>,
}

impl fmt::Debug for CustomValidators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.validators.iter().map(|(field, v)| (field, v.code())))
            .finish()
    }
}

impl CustomValidators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a validator for a field.
    pub fn add(&mut self, field: impl Into<String>, validator: impl Validator + 'static) {
        self.add_boxed(field, Box::new(validator));
    }

    pub fn add_boxed(&mut self, field: impl Into<String>, validator: Box<dyn Validator>) {
        self.validators.push((field.into(), validator));
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Runs every validator against its field's submitted value.
    ///
    /// Empty or missing values are skipped; presence is the required
    /// stage's concern. Returns `true` if any validator failed.
    pub fn run(&self, data: &FormData, errors: &mut ErrorCollection) -> bool {
        let mut failed = false;
        for (field, validator) in &self.validators {
            let Some(value) = submitted(data, field) else {
                trace!(
                    field = %field,
                    code = validator.code(),
                    "Skipping validator for empty value"
                );
                continue;
            };
            if let Err(code) = validator.validate(value) {
                errors.add(field, code);
                failed = true;
            }
        }
        failed
    }
}

/// Controls whether validation stops at the first failing stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Skip the remaining stages once a stage records an error.
    #[default]
    HaltOnFailure,
    /// Run every stage and collect all errors.
    Accumulate,
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Required,
    Confirmation,
    Custom,
}

impl Stage {
    const ALL: [Stage; 3] = [Stage::Required, Stage::Confirmation, Stage::Custom];

    fn name(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Confirmation => "confirmation",
            Self::Custom => "custom",
        }
    }
}

/// Validates `data` against the registry, rebuilding `errors` from scratch.
///
/// Returns `true` when no stage recorded an error.
pub fn validate(
    registry: &FieldRegistry,
    data: &FormData,
    custom: &CustomValidators,
    mode: ValidationMode,
    errors: &mut ErrorCollection,
) -> bool {
    errors.clear();
    let mut valid = true;

    for stage in Stage::ALL {
        let failed = match stage {
            Stage::Required => check_required(registry, data, errors),
            Stage::Confirmation => check_confirmation(registry, data, errors),
            Stage::Custom => custom.run(data, errors),
        };
        debug!(stage = stage.name(), failed, "Validation stage finished");

        if failed {
            valid = false;
            if mode == ValidationMode::HaltOnFailure {
                break;
            }
        }
    }

    valid
}

fn check_required(
    registry: &FieldRegistry,
    data: &FormData,
    errors: &mut ErrorCollection,
) -> bool {
    let mut failed = false;
    for (name, _) in registry.fields().filter(|(_, field)| field.required) {
        if submitted(data, name).is_none() {
            errors.add(name, REQUIRED);
            failed = true;
        }
    }
    failed
}

fn check_confirmation(
    registry: &FieldRegistry,
    data: &FormData,
    errors: &mut ErrorCollection,
) -> bool {
    let mut failed = false;
    for (_, field) in registry.fields().filter(|(_, field)| field.confirm) {
        let confirm_field = field.confirmation_name();
        if submitted(data, &confirm_field).is_none() {
            errors.add(&confirm_field, confirm_field.clone());
            failed = true;
        }
    }
    failed
}
