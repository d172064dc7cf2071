use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "APP_LOG_LEVEL '{value}' is not a valid tracing filter")
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Target shared by the library and the `contact-desk` binary.
const CRATE_TARGET: &str = "contact_desk";

/// A bare level applies to this crate only; dependencies stay at `warn`.
/// Anything already shaped like a directive list is used as given.
fn directives(log_level: &str) -> String {
    let level = log_level.trim();
    if level.contains(['=', ',']) {
        level.to_string()
    } else {
        format!("warn,{CRATE_TARGET}={level}")
    }
}

fn filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    let directives = directives(&config.log_level);
    EnvFilter::try_new(&directives).map_err(|source| TelemetryError::EnvFilter {
        value: directives,
        source,
    })
}

/// Installs the process-wide subscriber; `RUST_LOG` wins over the configured level.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter(config)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(level: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_level: level.to_string(),
        }
    }

    #[test]
    fn bare_level_is_scoped_to_the_crate() {
        assert_eq!(directives(" debug "), "warn,contact_desk=debug");
        assert!(filter(&config("debug")).is_ok());
    }

    #[test]
    fn directive_lists_pass_through() {
        assert_eq!(directives("info,tokio=trace"), "info,tokio=trace");
        assert_eq!(directives("contact_desk=trace"), "contact_desk=trace");
    }

    #[test]
    fn malformed_level_reports_the_directives() {
        let err = filter(&config("loud")).expect_err("not a level");
        assert!(err.to_string().contains("warn,contact_desk=loud"));
    }
}
