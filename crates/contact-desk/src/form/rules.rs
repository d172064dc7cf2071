use super::document::EventKind;
use super::validators::{is_not_empty, is_valid_email, is_valid_phone};
use serde::Serialize;
use std::fmt;

pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 1000;

/// The five validated controls of the contact form, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    FullName,
    Email,
    Phone,
    Service,
    Message,
}

impl FieldKind {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::FullName,
            Self::Email,
            Self::Phone,
            Self::Service,
            Self::Message,
        ]
    }

    pub const fn element_id(self) -> &'static str {
        match self {
            Self::FullName => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Service => "service",
            Self::Message => "message",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Service => "Service",
            Self::Message => "Message",
        }
    }

    /// Exhaustive field-to-rule mapping.
    pub fn rule(self) -> Rule {
        match self {
            Self::FullName => Rule {
                field: self,
                triggers: &[EventKind::Input, EventKind::Blur],
                check: check_full_name,
            },
            Self::Email => Rule {
                field: self,
                triggers: &[EventKind::Input, EventKind::Blur],
                check: check_email,
            },
            Self::Phone => Rule {
                field: self,
                triggers: &[EventKind::Input, EventKind::Blur],
                check: check_phone,
            },
            Self::Service => Rule {
                field: self,
                triggers: &[EventKind::Change, EventKind::Blur],
                check: check_service,
            },
            Self::Message => Rule {
                field: self,
                triggers: &[EventKind::Input, EventKind::Blur],
                check: check_message,
            },
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    Required,
    InvalidFormat,
    TooShort,
    TooLong,
}

impl FieldError {
    /// Inline text shown under the offending control.
    pub fn message(self, field: FieldKind) -> String {
        match (field, self) {
            (FieldKind::FullName, Self::Required) => "Please enter your full name".to_string(),
            (FieldKind::Email, Self::Required) => "Please enter your email address".to_string(),
            (FieldKind::Email, Self::InvalidFormat) => {
                "Please enter a valid email address".to_string()
            }
            (FieldKind::Phone, Self::Required) => "Please enter your phone number".to_string(),
            (FieldKind::Phone, Self::InvalidFormat) => {
                "Please enter a valid phone number".to_string()
            }
            (FieldKind::Service, Self::Required) => "Please select a service".to_string(),
            (FieldKind::Message, Self::Required) => "Please enter your message".to_string(),
            (_, Self::TooShort) => {
                format!("Message must be at least {MESSAGE_MIN_CHARS} characters")
            }
            (_, Self::TooLong) => {
                format!("Message must not exceed {MESSAGE_MAX_CHARS} characters")
            }
            (field, Self::Required) => format!("{} is required", field.label()),
            (field, Self::InvalidFormat) => format!("{} has an invalid format", field.label()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum ValidationResult {
    Valid,
    Invalid(FieldError),
}

impl ValidationResult {
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn error(self) -> Option<FieldError> {
        match self {
            Self::Valid => None,
            Self::Invalid(error) => Some(error),
        }
    }
}

/// Immutable binding of a field to its trigger events and validator.
#[derive(Clone, Copy)]
pub struct Rule {
    pub field: FieldKind,
    pub triggers: &'static [EventKind],
    check: fn(&str) -> ValidationResult,
}

impl Rule {
    pub fn evaluate(&self, value: &str) -> ValidationResult {
        (self.check)(value)
    }

    pub fn triggered_by(&self, event: EventKind) -> bool {
        self.triggers.contains(&event)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("field", &self.field)
            .field("triggers", &self.triggers)
            .finish_non_exhaustive()
    }
}

/// The rule table, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: [Rule; 5],
}

impl RuleSet {
    pub fn standard() -> Self {
        Self {
            rules: FieldKind::ordered().map(FieldKind::rule),
        }
    }

    pub fn rule(&self, field: FieldKind) -> &Rule {
        &self.rules[field as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

fn required(value: &str) -> Result<(), FieldError> {
    if is_not_empty(value) {
        Ok(())
    } else {
        Err(FieldError::Required)
    }
}

fn outcome(result: Result<(), FieldError>) -> ValidationResult {
    match result {
        Ok(()) => ValidationResult::Valid,
        Err(error) => ValidationResult::Invalid(error),
    }
}

fn check_full_name(value: &str) -> ValidationResult {
    outcome(required(value))
}

fn check_email(value: &str) -> ValidationResult {
    outcome(required(value).and_then(|()| {
        if is_valid_email(value) {
            Ok(())
        } else {
            Err(FieldError::InvalidFormat)
        }
    }))
}

fn check_phone(value: &str) -> ValidationResult {
    outcome(required(value).and_then(|()| {
        if is_valid_phone(value) {
            Ok(())
        } else {
            Err(FieldError::InvalidFormat)
        }
    }))
}

fn check_service(value: &str) -> ValidationResult {
    outcome(required(value))
}

fn check_message(value: &str) -> ValidationResult {
    outcome(required(value).and_then(|()| {
        if value.trim().chars().count() < MESSAGE_MIN_CHARS {
            Err(FieldError::TooShort)
        } else if value.chars().count() > MESSAGE_MAX_CHARS {
            Err(FieldError::TooLong)
        } else {
            Ok(())
        }
    }))
}
