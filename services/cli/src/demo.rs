use clap::{Args, ValueEnum};
use contact_desk::config::ContactConfig;
use contact_desk::error::AppError;
use contact_desk::form::document::{PROPERTY_TYPE_ID, URGENT_ID};
use contact_desk::form::feedback;
use contact_desk::form::handoff::ModalAction;
use contact_desk::form::{
    Channel, ContactForm, Document, FieldKind, FormMarkup, Navigation, SubmitOutcome, Validity,
};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum ChannelArg {
    #[default]
    Whatsapp,
    Email,
    /// Dismiss the dialog without choosing
    Cancel,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Which option the simulated visitor picks in the handoff dialog
    #[arg(long, value_enum, default_value_t = ChannelArg::Whatsapp)]
    pub(crate) channel: ChannelArg,
    /// Tick the urgent checkbox before submitting
    #[arg(long)]
    pub(crate) urgent: bool,
}

pub(crate) async fn run_demo(args: DemoArgs, config: ContactConfig) -> Result<(), AppError> {
    let page = Arc::new(Mutex::new(Document::with_form(FormMarkup::standard())));
    let Some(form) = ContactForm::attach(page, config) else {
        println!("Contact form not present on page; nothing to do.");
        return Ok(());
    };

    println!("Contact form demo");
    println!("\nFirst attempt: visitor submits with a typo in the email");
    form.input("name", "Sara Nasser");
    form.input("email", "sara@example");
    form.input("phone", "+971 50 198 4302");
    if let SubmitOutcome::Rejected { invalid } = form.submit().await {
        println!("Submission rejected ({} field(s) need attention)", invalid.len());
    }
    render_toast(&form);
    render_feedback(&form);

    println!("\nSecond attempt: visitor fixes the form");
    form.input("email", "sara@example.com");
    form.select("service", "plumbing");
    form.select(PROPERTY_TYPE_ID, "villa");
    form.input(
        "message",
        "Water heater in the master bathroom is leaking onto the floor.",
    );
    if args.urgent {
        form.set_checked(URGENT_ID, true);
    }
    render_feedback(&form);

    match form.submit().await {
        SubmitOutcome::Offered { message, targets } => {
            render_toast(&form);
            println!("\nComposed message\n----------------\n{message}\n");
            println!("WhatsApp link: {}", targets.whatsapp);
            println!("Email link:    {}", targets.email);
        }
        SubmitOutcome::Rejected { invalid } => {
            let names: Vec<String> = invalid.iter().map(|field| field.to_string()).collect();
            return Err(AppError::Rejected(names));
        }
        SubmitOutcome::Failed { reason } => {
            println!("Handoff could not be prepared: {reason}");
            return Ok(());
        }
        SubmitOutcome::Ignored => return Ok(()),
    }

    let action = match args.channel {
        ChannelArg::Whatsapp => ModalAction::Choose(Channel::WhatsApp),
        ChannelArg::Email => ModalAction::Choose(Channel::Email),
        ChannelArg::Cancel => ModalAction::Cancel,
    };
    match form.modal_action(action) {
        Some(Navigation::NewContext(url)) => println!("\nOpened in a new tab: {url}"),
        Some(Navigation::CurrentContext(url)) => println!("\nNavigated to: {url}"),
        None => println!("\nVisitor closed the dialog without sending."),
    }

    Ok(())
}

fn render_toast(form: &ContactForm) {
    form.with_document(|document| {
        if let Some(toast) = document.toast() {
            println!("[toast:{}] {}", toast.kind.class(), toast.text);
        }
    });
}

fn render_feedback(form: &ContactForm) {
    form.with_document(|document| {
        for field in FieldKind::ordered() {
            let status = match feedback::validity(document, field.element_id()) {
                Some(Validity::Valid) => "ok".to_string(),
                Some(Validity::Invalid(message)) => message,
                Some(Validity::Unvalidated) => "not checked yet".to_string(),
                None => "not on page".to_string(),
            };
            println!("- {}: {}", field.label(), status);
        }
    });
}
