//! Deep links into the visitor's own chat or mail client, and the choice
//! dialog that offers them.

use super::composer::ComposedMessage;
use super::document::{Document, Navigation, NodeId};
use super::overlay::{ensure_styles, Overlay};
use crate::config::HandoffConfig;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

pub const WHATSAPP_BASE: &str = "https://wa.me/";
pub const MODAL_TITLE: &str = "How would you like to send your request?";

/// Characters left intact by a URI component encoder.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("unable to build {channel} link: {source}")]
    InvalidLink {
        channel: Channel,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    WhatsApp,
    Email,
}

impl Channel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::WhatsApp => "Send via WhatsApp",
            Self::Email => "Send via Email",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WhatsApp => f.write_str("WhatsApp"),
            Self::Email => f.write_str("email"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandoffTargets {
    pub whatsapp: Url,
    pub email: Url,
}

impl HandoffTargets {
    pub fn url(&self, channel: Channel) -> &Url {
        match channel {
            Channel::WhatsApp => &self.whatsapp,
            Channel::Email => &self.email,
        }
    }
}

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

pub fn build_targets(
    config: &HandoffConfig,
    message: &ComposedMessage,
) -> Result<HandoffTargets, HandoffError> {
    let text = encode_component(message.as_str());

    let whatsapp = Url::parse(&format!(
        "{WHATSAPP_BASE}{number}?text={text}",
        number = config.whatsapp_number()
    ))
    .map_err(|source| HandoffError::InvalidLink {
        channel: Channel::WhatsApp,
        source,
    })?;

    let email = Url::parse(&format!(
        "mailto:{address}?subject={subject}&body={text}",
        address = config.email_address(),
        subject = encode_component(config.email_subject()),
    ))
    .map_err(|source| HandoffError::InvalidLink {
        channel: Channel::Email,
        source,
    })?;

    Ok(HandoffTargets { whatsapp, email })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffChoice {
    pub channel: Channel,
    pub label: &'static str,
    pub href: Url,
}

/// Channel choice dialog; dismissed by cancel, a backdrop click, or Escape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub id: NodeId,
    pub title: &'static str,
    pub choices: Vec<HandoffChoice>,
}

impl Modal {
    pub fn choice(&self, channel: Channel) -> Option<&HandoffChoice> {
        self.choices.iter().find(|choice| choice.channel == channel)
    }
}

impl Overlay for Modal {
    fn node_id(&self) -> NodeId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Choose(Channel),
    Cancel,
    BackdropClick,
    Escape,
}

/// Opens the dialog, replacing one that is already open.
pub fn open_modal(document: &mut Document, targets: &HandoffTargets) -> NodeId {
    ensure_styles(document);
    let id = document.allocate_node();
    let choices = [Channel::WhatsApp, Channel::Email]
        .into_iter()
        .map(|channel| HandoffChoice {
            channel,
            label: channel.label(),
            href: targets.url(channel).clone(),
        })
        .collect();
    if let Some(previous) = document.modal_slot_mut().acquire(Modal {
        id,
        title: MODAL_TITLE,
        choices,
    }) {
        debug!(modal = previous.id, "replaced open handoff dialog");
    }
    id
}

/// Applies a user action to the open dialog; returns the navigation a
/// channel choice triggers.
pub fn handle_modal_action(document: &mut Document, action: ModalAction) -> Option<Navigation> {
    let modal = document.modal_slot_mut().clear()?;
    match action {
        ModalAction::Choose(channel) => {
            let href = modal.choice(channel)?.href.clone();
            let navigation = match channel {
                Channel::WhatsApp => Navigation::NewContext(href),
                Channel::Email => Navigation::CurrentContext(href),
            };
            info!(%channel, "visitor chose handoff channel");
            document.navigate(navigation.clone());
            Some(navigation)
        }
        ModalAction::Cancel | ModalAction::BackdropClick | ModalAction::Escape => {
            debug!(?action, "handoff dialog dismissed");
            None
        }
    }
}
