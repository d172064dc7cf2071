use super::document::Document;
use super::feedback;
use super::rules::{FieldKind, RuleSet, ValidationResult};
use serde::Serialize;

/// Outcome of one exhaustive pass over the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitVerdict {
    outcomes: Vec<(FieldKind, ValidationResult)>,
}

impl SubmitVerdict {
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(|(_, result)| result.is_valid())
    }

    pub fn outcomes(&self) -> &[(FieldKind, ValidationResult)] {
        &self.outcomes
    }

    pub fn invalid_fields(&self) -> Vec<FieldKind> {
        self.outcomes
            .iter()
            .filter(|(_, result)| !result.is_valid())
            .map(|(field, _)| *field)
            .collect()
    }

    pub fn first_invalid(&self) -> Option<FieldKind> {
        self.invalid_fields().into_iter().next()
    }

    pub fn result(&self, field: FieldKind) -> Option<ValidationResult> {
        self.outcomes
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, result)| *result)
    }
}

/// Evaluates and renders every field, never stopping at the first failure.
///
/// Controls missing from the page are skipped: the visitor cannot fill them.
pub fn validate_all(document: &mut Document, rules: &RuleSet) -> SubmitVerdict {
    let mut outcomes = Vec::with_capacity(5);
    for rule in rules.iter() {
        let Some(value) = document.value(rule.field.element_id()).map(str::to_string) else {
            continue;
        };
        let result = rule.evaluate(&value);
        feedback::render(document, rule.field, result);
        outcomes.push((rule.field, result));
    }
    SubmitVerdict { outcomes }
}

/// Pure variant over raw values, used where no page exists.
pub fn validate_values<'a>(
    rules: &RuleSet,
    value_of: impl Fn(FieldKind) -> &'a str,
) -> SubmitVerdict {
    SubmitVerdict {
        outcomes: rules
            .iter()
            .map(|rule| (rule.field, rule.evaluate(value_of(rule.field))))
            .collect(),
    }
}
