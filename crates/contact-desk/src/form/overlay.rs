//! Single-occupant slots for transient UI (toast, modal) and the shared style block.

use super::document::{Document, NodeId};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

pub const FORM_STYLE_ID: &str = "contact-form-styles";

/// Animations and state markers the form relies on; injected once per page.
pub const FORM_STYLES: &str = r#"
.form-group.error input, .form-group.error select, .form-group.error textarea { border-color: #e53e3e; }
.form-group.success input, .form-group.success select, .form-group.success textarea { border-color: #38a169; }
.form-group .error-message { color: #e53e3e; font-size: 0.85rem; margin-top: 0.25rem; }
.form-group.urgent-active { background: #fff5f5; border-left: 3px solid #e53e3e; }
.char-counter { font-size: 0.8rem; color: #718096; text-align: right; }
.char-counter.over-limit { color: #e53e3e; font-weight: 600; }
.toast { position: fixed; bottom: 2rem; right: 2rem; padding: 1rem 1.5rem; border-radius: 8px; animation: toast-in 0.3s ease; z-index: 1100; }
.toast.success { background: #38a169; color: #fff; }
.toast.error { background: #e53e3e; color: #fff; }
.toast.info { background: #3182ce; color: #fff; }
.handoff-modal { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.6); display: flex; align-items: center; justify-content: center; z-index: 1200; animation: fade-in 0.2s ease; }
.handoff-modal .modal-box { background: #fff; border-radius: 12px; padding: 2rem; max-width: 420px; width: 90%; }
@keyframes toast-in { from { transform: translateY(100%); opacity: 0; } to { transform: translateY(0); opacity: 1; } }
@keyframes fade-in { from { opacity: 0; } to { opacity: 1; } }
"#;

/// Anything that occupies an overlay slot is identified by its node id.
pub trait Overlay {
    fn node_id(&self) -> NodeId;
}

/// Holds at most one occupant; acquiring evicts whatever was there.
#[derive(Debug)]
pub struct OverlaySlot<T> {
    occupant: Option<T>,
    issued: usize,
}

impl<T> Default for OverlaySlot<T> {
    fn default() -> Self {
        Self {
            occupant: None,
            issued: 0,
        }
    }
}

impl<T: Overlay> OverlaySlot<T> {
    /// Returns the evicted occupant, if any.
    pub fn acquire(&mut self, item: T) -> Option<T> {
        self.issued += 1;
        self.occupant.replace(item)
    }

    /// Releases the slot only if `id` still occupies it.
    pub fn release(&mut self, id: NodeId) -> Option<T> {
        if self.occupant.as_ref().map(Overlay::node_id) == Some(id) {
            self.occupant.take()
        } else {
            None
        }
    }

    pub fn clear(&mut self) -> Option<T> {
        self.occupant.take()
    }

    pub fn current(&self) -> Option<&T> {
        self.occupant.as_ref()
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Total occupants ever placed in this slot.
    pub fn issued(&self) -> usize {
        self.issued
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub const fn class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: NodeId,
    pub kind: ToastKind,
    pub text: String,
}

impl Overlay for Toast {
    fn node_id(&self) -> NodeId {
        self.id
    }
}

pub fn ensure_styles(document: &mut Document) -> bool {
    document.inject_style(FORM_STYLE_ID, FORM_STYLES)
}

/// Replaces any visible toast and schedules its removal.
///
/// Without a tokio runtime the toast stays until the next one evicts it.
pub fn show_toast(
    document: &Arc<Mutex<Document>>,
    kind: ToastKind,
    text: impl Into<String>,
    lifetime: Duration,
) -> NodeId {
    let id = {
        let mut guard = document.lock().expect("document mutex poisoned");
        ensure_styles(&mut guard);
        let id = guard.allocate_node();
        let evicted = guard.toast_slot_mut().acquire(Toast {
            id,
            kind,
            text: text.into(),
        });
        if let Some(previous) = evicted {
            debug!(toast = previous.id, "evicted previous toast");
        }
        id
    };

    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            let document = Arc::clone(document);
            handle.spawn(async move {
                tokio::time::sleep(lifetime).await;
                let mut guard = document.lock().expect("document mutex poisoned");
                if guard.toast_slot_mut().release(id).is_some() {
                    debug!(toast = id, "toast dismissed");
                }
            });
        }
        Err(_) => debug!(toast = id, "no runtime available; toast will not auto-dismiss"),
    }

    id
}
