use crate::demo::{run_demo, DemoArgs};
use crate::infra::{run_compose, run_validate, PayloadArgs};
use clap::{Parser, Subcommand};
use contact_desk::config::AppConfig;
use contact_desk::error::AppError;
use contact_desk::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "Contact Desk",
    about = "Run the website contact form pipeline from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through a scripted visitor session (default command)
    Demo(DemoArgs),
    /// Check a submission payload against the contact form rules
    Validate(PayloadArgs),
    /// Validate a payload, then print the composed message and handoff links
    Compose(PayloadArgs),
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, "configuration loaded");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(args, config.contact).await,
        Command::Validate(args) => run_validate(args),
        Command::Compose(args) => run_compose(args, &config.contact),
    }
}
