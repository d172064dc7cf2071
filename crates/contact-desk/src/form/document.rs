//! In-memory stand-in for the page the contact form script runs on.
//!
//! Only the pieces the form reads or writes are modelled: the form tree with
//! its controls and field-groups, injected style blocks, the toast and modal
//! slots, and a log of scroll and navigation side effects.

use super::handoff::Modal;
use super::overlay::{OverlaySlot, Toast};
use super::rules::FieldKind;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use url::Url;

pub const FORM_ROOT_ID: &str = "contact-form";
pub const PROPERTY_TYPE_ID: &str = "property-type";
pub const URGENT_ID: &str = "urgent";
pub const DEFAULT_SUBMIT_LABEL: &str = "Send Message";

pub type NodeId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Input,
    Change,
    Blur,
}

/// Handler kinds the form attaches to its controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Listener {
    Validate(FieldKind),
    CharacterCounter,
    UrgencyHighlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub id: NodeId,
    pub text: String,
}

/// Wrapper around one labelled control and its feedback area.
#[derive(Debug, Clone, Default)]
pub struct FieldGroup {
    classes: BTreeSet<String>,
    error_message: Option<TextNode>,
}

impl FieldGroup {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn error_message(&self) -> Option<&TextNode> {
        self.error_message.as_ref()
    }

    pub fn error_node_count(&self) -> usize {
        usize::from(self.error_message.is_some())
    }

    pub(crate) fn set_error_message(&mut self, node: TextNode) {
        self.error_message = Some(node);
    }

    pub(crate) fn take_error_message(&mut self) -> Option<TextNode> {
        self.error_message.take()
    }
}

#[derive(Debug, Clone)]
pub struct Control {
    id: String,
    value: String,
    checked: bool,
    group: FieldGroup,
}

impl Control {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            value: String::new(),
            checked: false,
            group: FieldGroup::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn group(&self) -> &FieldGroup {
        &self.group
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterCounter {
    pub id: NodeId,
    pub text: String,
    pub over_limit: bool,
}

/// Where a handoff link was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    NewContext(Url),
    CurrentContext(Url),
}

/// Which controls a page renders inside the contact form.
#[derive(Debug, Clone)]
pub struct FormMarkup {
    control_ids: Vec<String>,
    submit_label: String,
}

impl FormMarkup {
    /// All five validated controls plus property type and the urgent checkbox.
    pub fn standard() -> Self {
        let mut control_ids: Vec<String> = FieldKind::ordered()
            .iter()
            .map(|field| field.element_id().to_string())
            .collect();
        control_ids.insert(4, PROPERTY_TYPE_ID.to_string());
        control_ids.push(URGENT_ID.to_string());
        Self {
            control_ids,
            submit_label: DEFAULT_SUBMIT_LABEL.to_string(),
        }
    }

    pub fn without(mut self, id: &str) -> Self {
        self.control_ids.retain(|existing| existing != id);
        self
    }

    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct ContactFormTree {
    controls: Vec<Control>,
    submit: SubmitControl,
    counter: Option<CharacterCounter>,
    listeners: BTreeSet<(String, EventKind, Listener)>,
}

#[derive(Debug, Default)]
pub struct Document {
    form: Option<ContactFormTree>,
    styles: BTreeMap<String, String>,
    toast: OverlaySlot<Toast>,
    modal: OverlaySlot<Modal>,
    navigations: Vec<Navigation>,
    scroll_log: Vec<String>,
    next_node: NodeId,
    submission_latch: Arc<AtomicBool>,
}

impl Document {
    /// A page without the contact form.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn with_form(markup: FormMarkup) -> Self {
        let controls = markup
            .control_ids
            .iter()
            .map(|id| Control::new(id))
            .collect();
        Self {
            form: Some(ContactFormTree {
                controls,
                submit: SubmitControl {
                    label: markup.submit_label,
                    disabled: false,
                },
                counter: None,
                listeners: BTreeSet::new(),
            }),
            ..Self::default()
        }
    }

    pub fn has_form(&self) -> bool {
        self.form.is_some()
    }

    pub fn control(&self, id: &str) -> Option<&Control> {
        self.form
            .as_ref()?
            .controls
            .iter()
            .find(|control| control.id == id)
    }

    fn control_mut(&mut self, id: &str) -> Option<&mut Control> {
        self.form
            .as_mut()?
            .controls
            .iter_mut()
            .find(|control| control.id == id)
    }

    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.form
            .iter()
            .flat_map(|form| form.controls.iter())
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.control(id).map(Control::value)
    }

    /// Returns false when the control is absent.
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.control_mut(id) {
            Some(control) => {
                control.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.control(id).is_some_and(Control::checked)
    }

    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        match self.control_mut(id) {
            Some(control) => {
                control.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn group(&self, id: &str) -> Option<&FieldGroup> {
        self.control(id).map(Control::group)
    }

    pub fn group_mut(&mut self, id: &str) -> Option<&mut FieldGroup> {
        self.control_mut(id).map(|control| &mut control.group)
    }

    pub fn submit_control(&self) -> Option<&SubmitControl> {
        self.form.as_ref().map(|form| &form.submit)
    }

    pub fn submit_control_mut(&mut self) -> Option<&mut SubmitControl> {
        self.form.as_mut().map(|form| &mut form.submit)
    }

    pub fn counter(&self) -> Option<&CharacterCounter> {
        self.form.as_ref()?.counter.as_ref()
    }

    pub fn counter_mut(&mut self) -> Option<&mut CharacterCounter> {
        self.form.as_mut()?.counter.as_mut()
    }

    /// Inserts the counter node unless one already exists or the form is absent.
    pub(crate) fn insert_counter(&mut self, text: String) -> bool {
        let id = self.allocate_node();
        match self.form.as_mut() {
            Some(form) if form.counter.is_none() => {
                form.counter = Some(CharacterCounter {
                    id,
                    text,
                    over_limit: false,
                });
                true
            }
            _ => false,
        }
    }

    /// Registers a listener once per (element, event, handler).
    pub fn add_listener(&mut self, id: &str, event: EventKind, listener: Listener) -> bool {
        if self.control(id).is_none() {
            return false;
        }
        match self.form.as_mut() {
            Some(form) => form.listeners.insert((id.to_string(), event, listener)),
            None => false,
        }
    }

    pub fn listeners_for(&self, id: &str, event: EventKind) -> Vec<Listener> {
        self.form
            .iter()
            .flat_map(|form| form.listeners.iter())
            .filter(|(element, kind, _)| element == id && *kind == event)
            .map(|(_, _, listener)| *listener)
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.form.as_ref().map_or(0, |form| form.listeners.len())
    }

    pub fn allocate_node(&mut self) -> NodeId {
        self.next_node += 1;
        self.next_node
    }

    /// Returns true only the first time a style id is injected; later calls
    /// leave the existing block untouched.
    pub fn inject_style(&mut self, id: &str, css: &str) -> bool {
        if self.styles.contains_key(id) {
            return false;
        }
        self.styles.insert(id.to_string(), css.to_string());
        true
    }

    pub fn has_style(&self, id: &str) -> bool {
        self.styles.contains_key(id)
    }

    pub fn style(&self, id: &str) -> Option<&str> {
        self.styles.get(id).map(String::as_str)
    }

    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    pub fn scroll_into_view(&mut self, id: &str) {
        if self.control(id).is_some() {
            self.scroll_log.push(id.to_string());
        }
    }

    pub fn scroll_log(&self) -> &[String] {
        &self.scroll_log
    }

    pub fn navigate(&mut self, navigation: Navigation) {
        self.navigations.push(navigation);
    }

    pub fn navigations(&self) -> &[Navigation] {
        &self.navigations
    }

    /// Set while any controller on this page is handling a submission.
    pub(crate) fn submission_latch(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.submission_latch)
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.current()
    }

    pub fn toast_slot(&self) -> &OverlaySlot<Toast> {
        &self.toast
    }

    pub(crate) fn toast_slot_mut(&mut self) -> &mut OverlaySlot<Toast> {
        &mut self.toast
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.current()
    }

    pub fn modal_slot(&self) -> &OverlaySlot<Modal> {
        &self.modal
    }

    pub(crate) fn modal_slot_mut(&mut self) -> &mut OverlaySlot<Modal> {
        &mut self.modal
    }
}
