use clap::Args;
use contact_desk::config::ContactConfig;
use contact_desk::error::AppError;
use contact_desk::form::handoff::build_targets;
use contact_desk::form::submit::validate_values;
use contact_desk::form::{
    compose, ComposedMessage, HandoffTargets, RuleSet, SubmissionPayload, SubmitVerdict,
    ValidationResult,
};
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct PayloadArgs {
    /// JSON submission payload; `-` reads from stdin
    #[arg(long)]
    pub(crate) payload: PathBuf,
    /// Print machine-readable JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn load_payload(path: &Path) -> Result<SubmissionPayload, AppError> {
    let raw = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&raw)?)
}

fn check(payload: &SubmissionPayload) -> SubmitVerdict {
    validate_values(&RuleSet::standard(), |field| payload.value(field))
}

/// Rules run on the raw values; the message is composed from trimmed ones.
fn prepare(
    payload: SubmissionPayload,
    config: &ContactConfig,
) -> Result<(ComposedMessage, HandoffTargets), AppError> {
    let message = compose(&payload.normalized());
    let targets = build_targets(&config.handoff, &message)?;
    Ok((message, targets))
}

fn render_verdict(verdict: &SubmitVerdict, as_json: bool) -> Result<(), AppError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(verdict)?);
        return Ok(());
    }
    for (field, result) in verdict.outcomes() {
        match result {
            ValidationResult::Valid => println!("- {field}: ok"),
            ValidationResult::Invalid(error) => {
                println!("- {field}: {}", error.message(*field))
            }
        }
    }
    Ok(())
}

fn handoff_json(
    message: &ComposedMessage,
    targets: &HandoffTargets,
) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(&json!({
        "message": message,
        "targets": targets,
    }))?)
}

fn rejection(verdict: &SubmitVerdict) -> AppError {
    AppError::Rejected(
        verdict
            .invalid_fields()
            .iter()
            .map(|field| field.label().to_string())
            .collect(),
    )
}

pub(crate) fn run_validate(args: PayloadArgs) -> Result<(), AppError> {
    let payload = load_payload(&args.payload)?;
    let verdict = check(&payload);
    render_verdict(&verdict, args.json)?;
    if !verdict.is_valid() {
        return Err(rejection(&verdict));
    }
    if !args.json {
        println!("\nPayload passes every contact form rule.");
    }
    Ok(())
}

pub(crate) fn run_compose(args: PayloadArgs, config: &ContactConfig) -> Result<(), AppError> {
    let payload = load_payload(&args.payload)?;
    let verdict = check(&payload);
    if !verdict.is_valid() {
        render_verdict(&verdict, args.json)?;
        return Err(rejection(&verdict));
    }

    let (message, targets) = prepare(payload, config)?;
    if args.json {
        println!("{}", handoff_json(&message, &targets)?);
    } else {
        println!("{message}");
        println!("\nWhatsApp: {}", targets.whatsapp);
        println!("Email:    {}", targets.email);
    }
    Ok(())
}
