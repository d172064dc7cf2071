//! Live validation: attaches each rule to its trigger events and re-renders
//! the field on every trigger.

use super::document::{Document, Listener};
use super::feedback;
use super::rules::{FieldKind, RuleSet, ValidationResult};

/// Attaches rule listeners; returns how many were newly attached.
pub fn bind(document: &mut Document, rules: &RuleSet) -> usize {
    let mut attached = 0;
    for rule in rules.iter() {
        for event in rule.triggers {
            if document.add_listener(rule.field.element_id(), *event, Listener::Validate(rule.field))
            {
                attached += 1;
            }
        }
    }
    attached
}

/// Evaluates the field's rule against its current value and renders the result.
///
/// Returns `None` if the control is not on the page.
pub fn on_trigger(
    document: &mut Document,
    rules: &RuleSet,
    field: FieldKind,
) -> Option<ValidationResult> {
    let value = document.value(field.element_id())?.to_string();
    let result = rules.rule(field).evaluate(&value);
    feedback::render(document, field, result);
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::document::{EventKind, FormMarkup};
    use crate::form::feedback::Validity;

    #[test]
    fn binding_twice_attaches_nothing_new() {
        let mut document = Document::with_form(FormMarkup::standard());
        let rules = RuleSet::standard();
        assert_eq!(bind(&mut document, &rules), 10);
        assert_eq!(bind(&mut document, &rules), 0);
        assert_eq!(
            document.listeners_for("service", EventKind::Change),
            vec![Listener::Validate(FieldKind::Service)]
        );
        assert!(document.listeners_for("service", EventKind::Input).is_empty());
    }

    #[test]
    fn binding_skips_missing_controls() {
        let mut document = Document::with_form(FormMarkup::standard().without("phone"));
        assert_eq!(bind(&mut document, &RuleSet::standard()), 8);
        assert_eq!(bind(&mut Document::blank(), &RuleSet::standard()), 0);
    }

    #[test]
    fn trigger_renders_current_value() {
        let mut document = Document::with_form(FormMarkup::standard());
        let rules = RuleSet::standard();
        document.set_value("email", "owner@");
        let result = on_trigger(&mut document, &rules, FieldKind::Email);
        assert!(matches!(result, Some(ValidationResult::Invalid(_))));
        assert_eq!(
            feedback::validity(&document, "email"),
            Some(Validity::Invalid("Please enter a valid email address".to_string()))
        );

        document.set_value("email", "owner@villa.ae");
        on_trigger(&mut document, &rules, FieldKind::Email);
        assert_eq!(feedback::validity(&document, "email"), Some(Validity::Valid));
    }
}
