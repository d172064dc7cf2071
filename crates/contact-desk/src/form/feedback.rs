//! Inline success/error state for a field-group.
//!
//! Every operation is a no-op when the control is missing from the page.

use super::document::{Document, TextNode};
use super::rules::{FieldKind, ValidationResult};

pub const ERROR_CLASS: &str = "error";
pub const SUCCESS_CLASS: &str = "success";

/// Validity of a field as reflected by its group markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    Unvalidated,
    Valid,
    Invalid(String),
}

pub fn show_error(document: &mut Document, field_id: &str, message: &str) {
    let id = document.allocate_node();
    let Some(group) = document.group_mut(field_id) else {
        return;
    };
    group.remove_class(SUCCESS_CLASS);
    group.take_error_message();
    group.add_class(ERROR_CLASS);
    group.set_error_message(TextNode {
        id,
        text: message.to_string(),
    });
}

pub fn show_success(document: &mut Document, field_id: &str) {
    let Some(group) = document.group_mut(field_id) else {
        return;
    };
    group.remove_class(ERROR_CLASS);
    group.take_error_message();
    group.add_class(SUCCESS_CLASS);
}

pub fn clear(document: &mut Document, field_id: &str) {
    let Some(group) = document.group_mut(field_id) else {
        return;
    };
    group.remove_class(ERROR_CLASS);
    group.remove_class(SUCCESS_CLASS);
    group.take_error_message();
}

pub fn render(document: &mut Document, field: FieldKind, result: ValidationResult) {
    match result {
        ValidationResult::Valid => show_success(document, field.element_id()),
        ValidationResult::Invalid(error) => {
            show_error(document, field.element_id(), &error.message(field))
        }
    }
}

/// `None` when the control is not on the page.
pub fn validity(document: &Document, field_id: &str) -> Option<Validity> {
    let group = document.group(field_id)?;
    let state = match group.error_message() {
        Some(node) if group.has_class(ERROR_CLASS) => Validity::Invalid(node.text.clone()),
        _ if group.has_class(SUCCESS_CLASS) => Validity::Valid,
        _ => Validity::Unvalidated,
    };
    Some(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::document::FormMarkup;

    fn page() -> Document {
        Document::with_form(FormMarkup::standard())
    }

    #[test]
    fn success_after_error_leaves_no_error_node() {
        let mut document = page();
        show_error(&mut document, "email", "Please enter a valid email address");
        show_success(&mut document, "email");

        let group = document.group("email").expect("email group");
        assert_eq!(group.error_node_count(), 0);
        assert!(group.has_class(SUCCESS_CLASS));
        assert!(!group.has_class(ERROR_CLASS));
    }

    #[test]
    fn repeated_errors_keep_a_single_message_node() {
        let mut document = page();
        show_error(&mut document, "name", "first");
        show_error(&mut document, "name", "second");

        let group = document.group("name").expect("name group");
        assert_eq!(group.error_node_count(), 1);
        assert_eq!(group.error_message().map(|node| node.text.as_str()), Some("second"));
        assert_eq!(
            validity(&document, "name"),
            Some(Validity::Invalid("second".to_string()))
        );
    }

    #[test]
    fn clear_resets_to_unvalidated() {
        let mut document = page();
        show_error(&mut document, "phone", "Please enter your phone number");
        clear(&mut document, "phone");
        assert_eq!(validity(&document, "phone"), Some(Validity::Unvalidated));

        show_success(&mut document, "phone");
        clear(&mut document, "phone");
        let group = document.group("phone").expect("phone group");
        assert_eq!(group.classes().count(), 0);
    }

    #[test]
    fn missing_control_is_tolerated() {
        let mut document = Document::with_form(FormMarkup::standard().without("service"));
        show_error(&mut document, "service", "Please select a service");
        show_success(&mut document, "service");
        clear(&mut document, "service");
        assert!(validity(&document, "service").is_none());

        let mut blank = Document::blank();
        show_error(&mut blank, "name", "Please enter your full name");
        assert!(validity(&blank, "name").is_none());
    }
}
