mod cli;
mod demo;
mod infra;

use contact_desk::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
