use super::document::{Document, PROPERTY_TYPE_ID, URGENT_ID};
use super::rules::FieldKind;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const URGENT_BANNER: &str = "🚨 *URGENT REQUEST* 🚨";
pub const MESSAGE_TITLE: &str = "*New Service Request*";
pub const MESSAGE_FOOTER: &str = "_Sent via website contact form_";
pub const PROPERTY_NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    AirConditioning,
    Plumbing,
    Electrical,
    Painting,
    Carpentry,
    Cleaning,
    PestControl,
    Maintenance,
    Renovation,
    Other,
}

impl ServiceKind {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::AirConditioning,
            Self::Plumbing,
            Self::Electrical,
            Self::Painting,
            Self::Carpentry,
            Self::Cleaning,
            Self::PestControl,
            Self::Maintenance,
            Self::Renovation,
            Self::Other,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::AirConditioning => "ac",
            Self::Plumbing => "plumbing",
            Self::Electrical => "electrical",
            Self::Painting => "painting",
            Self::Carpentry => "carpentry",
            Self::Cleaning => "cleaning",
            Self::PestControl => "pest-control",
            Self::Maintenance => "maintenance",
            Self::Renovation => "renovation",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AirConditioning => "AC Installation & Repair",
            Self::Plumbing => "Plumbing Services",
            Self::Electrical => "Electrical Works",
            Self::Painting => "Painting & Decoration",
            Self::Carpentry => "Carpentry & Joinery",
            Self::Cleaning => "Deep Cleaning",
            Self::PestControl => "Pest Control",
            Self::Maintenance => "Annual Maintenance Contract",
            Self::Renovation => "Renovation & Fit-Out",
            Self::Other => "Other",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|kind| kind.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Villa,
    Apartment,
    Office,
    Retail,
    Warehouse,
    Other,
}

impl PropertyKind {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Villa,
            Self::Apartment,
            Self::Office,
            Self::Retail,
            Self::Warehouse,
            Self::Other,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Villa => "villa",
            Self::Apartment => "apartment",
            Self::Office => "office",
            Self::Retail => "retail",
            Self::Warehouse => "warehouse",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Villa => "Villa / Townhouse",
            Self::Apartment => "Apartment",
            Self::Office => "Office / Commercial",
            Self::Retail => "Retail / Showroom",
            Self::Warehouse => "Warehouse / Industrial",
            Self::Other => "Other",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|kind| kind.code() == code)
    }
}

pub fn service_label(code: &str) -> &str {
    ServiceKind::from_code(code).map_or(code, |kind| kind.label())
}

pub fn property_label(code: &str) -> &str {
    if code.trim().is_empty() {
        return PROPERTY_NOT_SPECIFIED;
    }
    PropertyKind::from_code(code).map_or(code, |kind| kind.label())
}

/// Snapshot of the form taken after validation passes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    #[serde(default)]
    pub property_type: String,
    pub message: String,
    #[serde(default)]
    pub urgent: bool,
}

impl SubmissionPayload {
    /// Reads the page's values; absent controls read as empty.
    pub fn snapshot(document: &Document) -> Self {
        let read = |id: &str| document.value(id).unwrap_or_default().to_string();
        Self {
            name: read(FieldKind::FullName.element_id()),
            email: read(FieldKind::Email.element_id()),
            phone: read(FieldKind::Phone.element_id()),
            service: read(FieldKind::Service.element_id()),
            property_type: read(PROPERTY_TYPE_ID),
            message: read(FieldKind::Message.element_id()),
            urgent: document.is_checked(URGENT_ID),
        }
        .normalized()
    }

    /// Trims every text value, as composed messages expect.
    pub fn normalized(self) -> Self {
        let trim = |value: String| value.trim().to_string();
        Self {
            name: trim(self.name),
            email: trim(self.email),
            phone: trim(self.phone),
            service: trim(self.service),
            property_type: trim(self.property_type),
            message: trim(self.message),
            urgent: self.urgent,
        }
    }

    pub fn value(&self, field: FieldKind) -> &str {
        match field {
            FieldKind::FullName => &self.name,
            FieldKind::Email => &self.email,
            FieldKind::Phone => &self.phone,
            FieldKind::Service => &self.service,
            FieldKind::Message => &self.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComposedMessage(String);

impl ComposedMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComposedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn compose(payload: &SubmissionPayload) -> ComposedMessage {
    let prefix = if payload.urgent {
        format!("{URGENT_BANNER}\n\n")
    } else {
        String::new()
    };

    ComposedMessage(format!(
        "{prefix}{MESSAGE_TITLE}\n\n\
         *Name:* {name}\n\
         *Email:* {email}\n\
         *Phone:* {phone}\n\
         *Service:* {service}\n\
         *Property Type:* {property}\n\n\
         *Message:*\n{message}\n\n\
         {MESSAGE_FOOTER}",
        name = payload.name,
        email = payload.email,
        phone = payload.phone,
        service = service_label(&payload.service),
        property = property_label(&payload.property_type),
        message = payload.message,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> SubmissionPayload {
        SubmissionPayload {
            name: "Omar Haddad".to_string(),
            email: "omar@example.com".to_string(),
            phone: "+971 50 123 4567".to_string(),
            service: "ac".to_string(),
            property_type: "warehouse".to_string(),
            message: "Two rooftop units stopped cooling overnight.".to_string(),
            urgent: false,
        }
    }

    #[test]
    fn labels_replace_codes() {
        let message = compose(&payload());
        assert!(message.as_str().contains("*Service:* AC Installation & Repair"));
        assert!(message.as_str().contains("*Property Type:* Warehouse / Industrial"));
        assert!(!message.as_str().contains("*Service:* ac\n"));
        assert!(message.as_str().starts_with(MESSAGE_TITLE));
        assert!(message.as_str().ends_with(MESSAGE_FOOTER));
    }

    #[test]
    fn urgent_flag_prefixes_banner() {
        let mut urgent = payload();
        urgent.urgent = true;
        let message = compose(&urgent);
        assert!(message.as_str().starts_with(URGENT_BANNER));
        assert_eq!(
            message.as_str().strip_prefix(&format!("{URGENT_BANNER}\n\n")),
            Some(compose(&payload()).as_str())
        );
    }

    #[test]
    fn unknown_codes_fall_back() {
        let mut custom = payload();
        custom.service = "solar".to_string();
        custom.property_type = String::new();
        let message = compose(&custom);
        assert!(message.as_str().contains("*Service:* solar\n"));
        assert!(message
            .as_str()
            .contains(&format!("*Property Type:* {PROPERTY_NOT_SPECIFIED}\n")));

        custom.property_type = "boat".to_string();
        assert!(compose(&custom).as_str().contains("*Property Type:* boat\n"));
    }

    #[test]
    fn composition_is_deterministic() {
        assert_eq!(compose(&payload()), compose(&payload()));
    }

    #[test]
    fn payload_reads_optional_fields_with_defaults() {
        let payload: SubmissionPayload = serde_json::from_str(
            r#"{"name":"Ana","email":"ana@example.com","phone":"0501234567","service":"plumbing","message":"Leaking pipe under sink"}"#,
        )
        .expect("payload parses");
        assert!(payload.property_type.is_empty());
        assert!(!payload.urgent);
    }

    #[test]
    fn snapshot_and_normalized_payload_compose_identically() {
        use crate::form::document::FormMarkup;

        let padded = SubmissionPayload {
            name: "  Omar Haddad ".to_string(),
            service: " ac".to_string(),
            property_type: "warehouse\n".to_string(),
            message: "\tTwo rooftop units stopped cooling overnight.  ".to_string(),
            ..payload()
        };

        let mut document = Document::with_form(FormMarkup::standard());
        for field in FieldKind::ordered() {
            document.set_value(field.element_id(), padded.value(field));
        }
        document.set_value(PROPERTY_TYPE_ID, padded.property_type.as_str());

        let from_page = SubmissionPayload::snapshot(&document);
        assert_eq!(from_page, payload());
        assert_eq!(compose(&padded.normalized()), compose(&from_page));
    }
}
