//! End-to-end tests: declare fields, submit data, validate, render.

use oxide_formbuilder::validation::{Rule, REQUIRED};
use oxide_formbuilder::{
    FieldParams, Form, FormConfig, FormData, MessageCatalog, ValidationMode, DEFAULT_ERROR_MESSAGE,
};

fn data(pairs: &[(&str, &str)]) -> FormData {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// =============================================================================
// Registry behaviour
// =============================================================================

#[test]
fn fields_keep_first_registration_order() {
    let mut form = Form::new();
    form.add_field("a", "text", FieldParams::new())
        .add_field("b", "text", FieldParams::new())
        .add_field("c", "text", FieldParams::new())
        .add_field("a", "email", FieldParams::new())
        .add_field("b", "", FieldParams::new().label("B"));

    let names: Vec<&str> = form.fields().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(form.field("a").unwrap().kind.as_str(), "email");
    assert_eq!(form.field("b").unwrap().label.as_deref(), Some("B"));
}

// =============================================================================
// Validation scenarios
// =============================================================================

#[test]
fn required_email_without_data_fails_and_renders_error() {
    let mut form = Form::with_action("/subscribe");
    form.add_field("email", "text", FieldParams::new().required());

    assert!(!form.validate());
    assert!(form.errors().contains("email", REQUIRED));

    let html = form.render();
    assert!(html.contains(r#"<input type="text" name="email" />"#));
    assert!(html.contains(r#"<div class="field-with-errors required">"#));
    assert!(html.contains(&format!(
        r#"<span class="error-message required">{DEFAULT_ERROR_MESSAGE}</span>"#
    )));
}

#[test]
fn confirmed_password_passes_without_error_markup() {
    let mut form = Form::new();
    form.add_field("password", "password", FieldParams::new().confirm());
    form.set_data(data(&[("password", "x"), ("password_confirmation", "x")]));

    assert!(form.validate());
    assert!(form.errors().is_empty());

    let html = form.render();
    assert!(!html.contains("field-with-errors"));
    assert!(!html.contains("error-message"));
    assert!(html.contains(r#"<input type="password" value="x" name="password" />"#));
}

#[test]
fn missing_confirmation_is_reported_on_companion_field() {
    let mut form = Form::new();
    form.add_field("password", "password", FieldParams::new().confirm());
    form.set_data(data(&[("password", "x")]));

    assert!(!form.validate());
    assert_eq!(
        form.errors().get("password_confirmation"),
        Some(&["password_confirmation".to_string()][..])
    );
}

#[test]
fn field_without_rules_validates() {
    let mut form = Form::new();
    form.add_field("nickname", "text", FieldParams::new().label("Nickname"));
    form.set_data(data(&[("nickname", "al")]));

    assert!(form.validate());
    assert!(form.errors().get("nickname").is_none());
}

#[test]
fn name_param_does_not_change_submitted_key() {
    let mut form = Form::new();
    form.add_field("email", "text", FieldParams::new().required().attr("name", "contact"));

    form.set_data(data(&[("email", "a@b.c")]));
    assert!(form.validate());
    assert_eq!(
        form.field_markup("email"),
        "<div>\n<input type=\"text\" value=\"a@b.c\" name=\"email\" />\n</div>\n"
    );

    form.set_data(data(&[("contact", "a@b.c")]));
    assert!(!form.validate());
    assert!(form.errors().contains("email", REQUIRED));
    assert!(!form.render().contains("contact"));
}

#[test]
fn halt_mode_hides_custom_errors_until_required_fields_pass() {
    let mut form = Form::new();
    form.add_field("name", "text", FieldParams::new().required())
        .add_field("email", "email", FieldParams::new())
        .add_validator("email", Rule::email());
    form.set_data(data(&[("email", "nope")]));

    assert!(!form.validate());
    assert!(form.errors().get("email").is_none());

    form.set_data(data(&[("name", "Ann"), ("email", "nope")]));
    assert!(!form.validate());
    assert!(form.errors().get("name").is_none());
    assert!(form.errors().contains("email", "email"));

    form.set_validation_mode(ValidationMode::Accumulate);
    form.set_data(data(&[("email", "nope")]));
    assert!(!form.validate());
    assert!(form.errors().contains("name", REQUIRED));
    assert!(form.errors().contains("email", "email"));
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn full_form_markup() {
    let mut form = Form::with_action("/profile");
    form.add_field("name", "text", FieldParams::new().label("Name").required())
        .add_field("bio", "textarea", FieldParams::new().attr("rows", "3"))
        .add_field("token", "hidden", FieldParams::new());
    form.set_data(data(&[("bio", "Hello"), ("token", "abc")]));
    form.set_error_messages(MessageCatalog::new().with("name", "required", "Tell us your name"));

    assert!(!form.validate());
    assert_eq!(
        form.render(),
        concat!(
            "<form action=\"/profile\" method=\"post\" accept-charset=\"utf-8\" ",
            "enctype=\"application/x-www-form-urlencoded\">\n",
            "<div class=\"field-with-errors required\">\n",
            "<label for=\"name\">Name</label>\n",
            "<input type=\"text\" name=\"name\" />\n",
            "<span class=\"error-message required\">Tell us your name</span>\n",
            "</div>\n",
            "<div>\n",
            "<textarea name=\"bio\" rows=\"3\">Hello</textarea>\n",
            "</div>\n",
            "<div>\n",
            "<input type=\"hidden\" value=\"abc\" name=\"token\" />\n",
            "</div>\n",
            "</form>"
        )
    );
}

#[test]
fn independent_forms_use_independent_catalogs() {
    let mut english = Form::new();
    english.add_field("q", "text", FieldParams::new().required());
    english.set_error_messages(MessageCatalog::new().with("q", "required", "Required"));

    let mut spanish = Form::new();
    spanish.add_field("q", "text", FieldParams::new().required());
    spanish.set_error_messages(MessageCatalog::new().with("q", "required", "Obligatorio"));

    english.validate();
    spanish.validate();

    assert!(english.field_markup("q").contains(">Required<"));
    assert!(spanish.field_markup("q").contains(">Obligatorio<"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn form_from_json_definition() {
    let config = FormConfig::from_json_str(
        r#"{
            "action": "/signup",
            "fields": [
                {
                    "name": "email",
                    "kind": "email",
                    "params": {"label": "Email", "required": true, "class": "wide"}
                },
                {"name": "role", "kind": "select"}
            ],
            "options": {"role": [["user", "User"], ["admin", "Admin"]]},
            "validators": {"email": [{"type": "email"}]},
            "error_messages": {"email": {"email": "That is not an email"}}
        }"#,
    )
    .unwrap();
    let mut form = config.build().unwrap();
    form.set_data(data(&[("email", "bob"), ("role", "user")]));

    assert!(!form.validate());
    let html = form.render();
    assert!(html.contains(r#"<input type="email" value="bob" name="email" class="wide" />"#));
    assert!(html.contains(r#"<span class="error-message email">That is not an email</span>"#));
    assert!(html.contains(r#"<option value="user" selected="selected">User</option>"#));
    assert!(html.contains(r#"<option value="admin">Admin</option>"#));
}
