use std::sync::{Arc, Mutex};

use crate::config::ContactConfig;
use crate::form::document::{Document, FormMarkup, PROPERTY_TYPE_ID, URGENT_ID};
use crate::form::orchestrator::ContactForm;

pub(super) fn shared_page() -> Arc<Mutex<Document>> {
    Arc::new(Mutex::new(Document::with_form(FormMarkup::standard())))
}

pub(super) fn attached_form() -> ContactForm {
    ContactForm::attach(shared_page(), ContactConfig::default()).expect("form present")
}

pub(super) fn fill_valid(form: &ContactForm) {
    form.input("name", "Fatima Al Mansoori");
    form.input("email", "fatima@example.com");
    form.input("phone", "+971 50-198-4302");
    form.select("service", "ac");
    form.select(PROPERTY_TYPE_ID, "warehouse");
    form.input(
        "message",
        "Cold room compressor trips every afternoon; need a technician this week.",
    );
}

pub(super) fn mark_urgent(form: &ContactForm) {
    form.set_checked(URGENT_ID, true);
}
