//! Character counter and urgency highlight. Neither affects validation.

use super::document::{Document, EventKind, Listener, URGENT_ID};
use super::rules::{FieldKind, MESSAGE_MAX_CHARS};

pub const URGENT_CLASS: &str = "urgent-active";

fn counter_text(count: usize) -> String {
    format!("{count}/{MESSAGE_MAX_CHARS}")
}

/// Inserts the counter after the message control and wires both widgets.
pub fn bind(document: &mut Document) -> usize {
    let message_id = FieldKind::Message.element_id();
    let mut attached = 0;
    if document.control(message_id).is_some() && document.insert_counter(counter_text(0)) {
        refresh_counter(document);
    }
    if document.add_listener(message_id, EventKind::Input, Listener::CharacterCounter) {
        attached += 1;
    }
    if document.add_listener(URGENT_ID, EventKind::Change, Listener::UrgencyHighlight) {
        attached += 1;
    }
    attached
}

pub fn refresh_counter(document: &mut Document) {
    let Some(count) = document
        .value(FieldKind::Message.element_id())
        .map(|value| value.chars().count())
    else {
        return;
    };
    if let Some(counter) = document.counter_mut() {
        counter.text = counter_text(count);
        counter.over_limit = count > MESSAGE_MAX_CHARS;
    }
}

pub fn reset_counter(document: &mut Document) {
    if let Some(counter) = document.counter_mut() {
        counter.text = counter_text(0);
        counter.over_limit = false;
    }
}

pub fn toggle_urgency(document: &mut Document) {
    let checked = document.is_checked(URGENT_ID);
    if let Some(group) = document.group_mut(URGENT_ID) {
        if checked {
            group.add_class(URGENT_CLASS);
        } else {
            group.remove_class(URGENT_CLASS);
        }
    }
}

pub fn clear_urgency(document: &mut Document) {
    if let Some(group) = document.group_mut(URGENT_ID) {
        group.remove_class(URGENT_CLASS);
    }
}
