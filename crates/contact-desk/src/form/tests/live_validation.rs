use super::common::{attached_form, mark_urgent, shared_page};
use crate::config::ContactConfig;
use crate::form::document::{Document, EventKind, FormMarkup, URGENT_ID};
use crate::form::feedback::{self, Validity};
use crate::form::orchestrator::ContactForm;
use crate::form::overlay::{FORM_STYLES, FORM_STYLE_ID};
use crate::form::rules::{FieldError, ValidationResult};
use crate::form::widgets::URGENT_CLASS;
use std::sync::{Arc, Mutex};

#[test]
fn typing_validates_each_keystroke() {
    let form = attached_form();

    assert_eq!(
        form.input("email", "fatima@"),
        Some(ValidationResult::Invalid(FieldError::InvalidFormat))
    );
    assert_eq!(form.input("email", "fatima@example.com"), Some(ValidationResult::Valid));
    form.with_document(|document| {
        assert_eq!(feedback::validity(document, "email"), Some(Validity::Valid));
    });
}

#[test]
fn blur_on_untouched_field_reports_required() {
    let form = attached_form();
    assert_eq!(
        form.blur("name"),
        Some(ValidationResult::Invalid(FieldError::Required))
    );
    form.with_document(|document| {
        assert_eq!(
            feedback::validity(document, "name"),
            Some(Validity::Invalid("Please enter your full name".to_string()))
        );
    });
}

#[test]
fn service_select_validates_on_change_only() {
    let form = attached_form();
    assert_eq!(form.dispatch("service", EventKind::Input), None);
    assert_eq!(form.select("service", "plumbing"), Some(ValidationResult::Valid));
}

#[test]
fn message_input_updates_counter() {
    let form = attached_form();
    form.input("message", "Leak");
    form.with_document(|document| {
        assert_eq!(document.counter().map(|c| c.text.as_str()), Some("4/1000"));
        assert!(matches!(
            feedback::validity(document, "message"),
            Some(Validity::Invalid(_))
        ));
    });
}

#[test]
fn urgent_checkbox_toggles_highlight() {
    let form = attached_form();
    mark_urgent(&form);
    form.with_document(|document| {
        assert!(document
            .group(URGENT_ID)
            .is_some_and(|group| group.has_class(URGENT_CLASS)));
    });
}

#[test]
fn attaching_twice_does_not_duplicate_bindings() {
    let page = shared_page();
    ContactForm::attach(Arc::clone(&page), ContactConfig::default()).expect("first attach");
    let listeners = page.lock().expect("lock").listener_count();
    ContactForm::attach(Arc::clone(&page), ContactConfig::default()).expect("second attach");

    let document = page.lock().expect("lock");
    assert_eq!(document.listener_count(), listeners);
    assert_eq!(document.style_count(), 1);
    let css = document.style(FORM_STYLE_ID).expect("form styles injected");
    assert_eq!(css, FORM_STYLES);
    assert!(css.contains(".form-group.urgent-active"));
}

#[test]
fn pages_without_the_form_are_left_alone() {
    let page = Arc::new(Mutex::new(Document::blank()));
    assert!(ContactForm::attach(Arc::clone(&page), ContactConfig::default()).is_none());
    let document = page.lock().expect("lock");
    assert_eq!(document.style_count(), 0);
    assert_eq!(document.listener_count(), 0);
}

#[test]
fn partial_forms_bind_what_exists() {
    let page = Arc::new(Mutex::new(Document::with_form(
        FormMarkup::standard().without(URGENT_ID).without("phone"),
    )));
    let form = ContactForm::attach(page, ContactConfig::default()).expect("form present");
    assert_eq!(form.input("phone", "123"), None);
    form.set_checked(URGENT_ID, true);
    assert_eq!(form.input("name", "Noor"), Some(ValidationResult::Valid));
}
