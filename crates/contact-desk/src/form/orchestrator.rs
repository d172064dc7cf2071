//! Submit handling as an explicit state machine:
//! `Idle -> Validating -> {Rejected | Accepted} -> Sending -> Offered -> Idle`.

use super::binder;
use super::composer::{compose, ComposedMessage, SubmissionPayload};
use super::document::{Document, EventKind, Listener, Navigation};
use super::feedback;
use super::handoff::{self, build_targets, HandoffTargets, ModalAction};
use super::overlay::{ensure_styles, show_toast, ToastKind};
use super::rules::{FieldKind, RuleSet, ValidationResult};
use super::submit;
use super::widgets;
use crate::config::ContactConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

pub const BUSY_LABEL: &str = "Sending...";
pub const REJECTED_TOAST: &str = "Please correct the highlighted fields and try again.";
pub const OFFERED_TOAST: &str = "Almost done! Choose how you'd like to send your request.";
pub const HANDOFF_FAILED_TOAST: &str =
    "We couldn't prepare your message. Please call us or try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Rejected,
    Accepted,
    Sending,
    Offered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected {
        invalid: Vec<FieldKind>,
    },
    Offered {
        message: ComposedMessage,
        targets: HandoffTargets,
    },
    /// A submission was already between validation and reset.
    Ignored,
    Failed {
        reason: String,
    },
}

/// Clears the in-flight latch even if the submit future is dropped midway.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(latch: &'a AtomicBool) -> Option<Self> {
        if latch.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self(latch))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Controller bound to one page's contact form.
#[derive(Clone)]
pub struct ContactForm {
    document: Arc<Mutex<Document>>,
    rules: Arc<RuleSet>,
    config: Arc<ContactConfig>,
    state: Arc<watch::Sender<SubmissionState>>,
    history: Arc<Mutex<Vec<SubmissionState>>>,
    in_flight: Arc<AtomicBool>,
}

impl ContactForm {
    /// Binds live validation and widgets. Returns `None` on pages without the form.
    ///
    /// Controllers attached to the same page share one in-flight latch.
    pub fn attach(document: Arc<Mutex<Document>>, config: ContactConfig) -> Option<Self> {
        let rules = RuleSet::standard();
        let in_flight = {
            let mut guard = document.lock().expect("document mutex poisoned");
            if !guard.has_form() {
                debug!("no contact form on this page; skipping");
                return None;
            }
            ensure_styles(&mut guard);
            let rule_listeners = binder::bind(&mut guard, &rules);
            let widget_listeners = widgets::bind(&mut guard);
            debug!(rule_listeners, widget_listeners, "contact form bound");
            guard.submission_latch()
        };

        let (state, _) = watch::channel(SubmissionState::Idle);
        Some(Self {
            document,
            rules: Arc::new(rules),
            config: Arc::new(config),
            state: Arc::new(state),
            history: Arc::new(Mutex::new(vec![SubmissionState::Idle])),
            in_flight,
        })
    }

    pub fn with_document<R>(&self, read: impl FnOnce(&Document) -> R) -> R {
        read(&self.lock())
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Every state entered so far, starting with the initial `Idle`.
    pub fn history(&self) -> Vec<SubmissionState> {
        self.history.lock().expect("history mutex poisoned").clone()
    }

    pub fn input(&self, id: &str, value: &str) -> Option<ValidationResult> {
        self.lock().set_value(id, value);
        self.dispatch(id, EventKind::Input)
    }

    pub fn select(&self, id: &str, value: &str) -> Option<ValidationResult> {
        self.lock().set_value(id, value);
        self.dispatch(id, EventKind::Change)
    }

    pub fn set_checked(&self, id: &str, checked: bool) {
        self.lock().set_checked(id, checked);
        self.dispatch(id, EventKind::Change);
    }

    pub fn blur(&self, id: &str) -> Option<ValidationResult> {
        self.dispatch(id, EventKind::Blur)
    }

    /// Runs the listeners bound to `(id, event)`; yields the validation result if one ran.
    pub fn dispatch(&self, id: &str, event: EventKind) -> Option<ValidationResult> {
        let mut document = self.lock();
        let mut validation = None;
        for listener in document.listeners_for(id, event) {
            match listener {
                Listener::Validate(field) => {
                    validation = binder::on_trigger(&mut document, &self.rules, field);
                }
                Listener::CharacterCounter => widgets::refresh_counter(&mut document),
                Listener::UrgencyHighlight => widgets::toggle_urgency(&mut document),
            }
        }
        validation
    }

    pub fn modal_action(&self, action: ModalAction) -> Option<Navigation> {
        handoff::handle_modal_action(&mut self.lock(), action)
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_latch) = InFlight::acquire(&self.in_flight) else {
            info!("submission already in progress; ignoring");
            return SubmitOutcome::Ignored;
        };

        self.transition(SubmissionState::Validating);
        let verdict = submit::validate_all(&mut self.lock(), &self.rules);
        if !verdict.is_valid() {
            return self.reject(verdict.invalid_fields());
        }

        self.transition(SubmissionState::Accepted);
        let (payload, idle_label) = self.begin_sending();
        self.transition(SubmissionState::Sending);
        tokio::time::sleep(self.config.timing.busy_delay).await;
        self.finish_sending(idle_label);

        let message = compose(&payload);
        let targets = match build_targets(&self.config.handoff, &message) {
            Ok(targets) => targets,
            Err(err) => {
                error!(%err, "unable to build handoff links");
                self.toast(ToastKind::Error, HANDOFF_FAILED_TOAST);
                self.transition(SubmissionState::Idle);
                return SubmitOutcome::Failed {
                    reason: err.to_string(),
                };
            }
        };

        self.toast(ToastKind::Info, OFFERED_TOAST);
        handoff::open_modal(&mut self.lock(), &targets);
        self.transition(SubmissionState::Offered);
        info!(urgent = payload.urgent, service = %payload.service, "handoff offered");

        tokio::time::sleep(self.config.timing.reset_delay).await;
        self.reset_form();
        self.transition(SubmissionState::Idle);

        SubmitOutcome::Offered { message, targets }
    }

    fn reject(&self, invalid: Vec<FieldKind>) -> SubmitOutcome {
        self.transition(SubmissionState::Rejected);
        if let Some(first) = invalid.first() {
            self.lock().scroll_into_view(first.element_id());
        }
        self.toast(ToastKind::Error, REJECTED_TOAST);
        warn!(?invalid, "submission rejected");
        self.transition(SubmissionState::Idle);
        SubmitOutcome::Rejected { invalid }
    }

    fn begin_sending(&self) -> (SubmissionPayload, Option<String>) {
        let mut document = self.lock();
        let payload = SubmissionPayload::snapshot(&document);
        let idle_label = document.submit_control_mut().map(|control| {
            control.disabled = true;
            std::mem::replace(&mut control.label, BUSY_LABEL.to_string())
        });
        (payload, idle_label)
    }

    fn finish_sending(&self, idle_label: Option<String>) {
        let mut document = self.lock();
        if let (Some(control), Some(label)) = (document.submit_control_mut(), idle_label) {
            control.label = label;
            control.disabled = false;
        }
    }

    fn reset_form(&self) {
        let mut document = self.lock();
        let ids: Vec<String> = document
            .controls()
            .map(|control| control.id().to_string())
            .collect();
        for id in &ids {
            document.set_value(id, "");
            document.set_checked(id, false);
            feedback::clear(&mut document, id);
        }
        widgets::reset_counter(&mut document);
        widgets::clear_urgency(&mut document);
    }

    fn toast(&self, kind: ToastKind, text: &str) {
        show_toast(&self.document, kind, text, self.config.timing.toast_duration);
    }

    fn transition(&self, next: SubmissionState) {
        self.history
            .lock()
            .expect("history mutex poisoned")
            .push(next);
        self.state.send_replace(next);
        debug!(state = ?next, "submission state changed");
    }

    fn lock(&self) -> MutexGuard<'_, Document> {
        self.document.lock().expect("document mutex poisoned")
    }
}
