//! Contact form behavior over a headless page model.
//!
//! Leaf modules (`validators`, `rules`, `composer`) are pure. Everything that
//! touches markup goes through [`document::Document`], and the
//! [`orchestrator::ContactForm`] controller ties the pieces to user events.

pub mod binder;
pub mod composer;
pub mod document;
pub mod feedback;
pub mod handoff;
pub mod orchestrator;
pub mod overlay;
pub mod rules;
pub mod submit;
pub mod validators;
pub mod widgets;

#[cfg(test)]
mod tests;

pub use composer::{compose, ComposedMessage, PropertyKind, ServiceKind, SubmissionPayload};
pub use document::{Document, EventKind, FormMarkup, Navigation};
pub use feedback::Validity;
pub use handoff::{Channel, HandoffTargets, ModalAction};
pub use orchestrator::{ContactForm, SubmissionState, SubmitOutcome};
pub use overlay::{Toast, ToastKind};
pub use rules::{FieldError, FieldKind, RuleSet, ValidationResult};
pub use submit::SubmitVerdict;
