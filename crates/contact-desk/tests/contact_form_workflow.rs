use contact_desk::config::ContactConfig;
use contact_desk::form::handoff::ModalAction;
use contact_desk::form::{
    Channel, ContactForm, Document, FormMarkup, Navigation, SubmissionState, SubmitOutcome,
};
use percent_encoding::percent_decode_str;
use std::sync::{Arc, Mutex};

fn page() -> Arc<Mutex<Document>> {
    Arc::new(Mutex::new(Document::with_form(FormMarkup::standard())))
}

#[tokio::test(start_paused = true)]
async fn visitor_fixes_errors_then_hands_off_to_whatsapp() {
    let form = ContactForm::attach(page(), ContactConfig::default()).expect("form present");

    form.input("name", "");
    form.input("email", "khalid@");
    let rejected = form.submit().await;
    assert!(matches!(
        rejected,
        SubmitOutcome::Rejected { ref invalid } if invalid.len() == 5
    ));

    form.input("name", "Khalid Rahman");
    form.input("email", "khalid@example.com");
    form.input("phone", "050 198 4302");
    form.select("service", "ac");
    form.select("property-type", "warehouse");
    form.input("message", "Loading bay AC units need servicing before summer.");

    let outcome = form.submit().await;
    let SubmitOutcome::Offered { message, targets } = outcome else {
        panic!("valid submission should offer handoff");
    };
    assert!(message.as_str().contains("AC Installation & Repair"));
    assert!(message.as_str().contains("Warehouse / Industrial"));

    let text = targets
        .whatsapp
        .query()
        .and_then(|query| query.strip_prefix("text="))
        .expect("text parameter present");
    let decoded = percent_decode_str(text)
        .decode_utf8()
        .expect("encoded message is utf-8");
    assert_eq!(decoded, message.as_str());

    form.with_document(|document| {
        assert_eq!(document.modal_slot().issued(), 1);
        assert!(document.modal().is_some());
        assert!(document.toast().is_some());
    });
    assert_eq!(form.state(), SubmissionState::Idle);

    let navigation = form.modal_action(ModalAction::Choose(Channel::WhatsApp));
    assert_eq!(navigation, Some(Navigation::NewContext(targets.whatsapp.clone())));
}

#[test]
fn script_is_inert_on_pages_without_the_form() {
    let page = Arc::new(Mutex::new(Document::blank()));
    assert!(ContactForm::attach(page, ContactConfig::default()).is_none());
}
