use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_WHATSAPP_NUMBER: &str = "971501984302";
pub const DEFAULT_EMAIL_ADDRESS: &str = "info@example.com";
pub const DEFAULT_EMAIL_SUBJECT: &str = "New Service Request from Website";

/// Characters that would end the path of a `mailto:` link.
const MAILTO_DELIMITERS: [char; 4] = ['?', '#', '&', '%'];

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub contact: ContactConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let handoff = HandoffConfig::new(
            &env::var("CONTACT_WHATSAPP_NUMBER")
                .unwrap_or_else(|_| DEFAULT_WHATSAPP_NUMBER.to_string()),
            &env::var("CONTACT_EMAIL_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_EMAIL_ADDRESS.to_string()),
            env::var("CONTACT_EMAIL_SUBJECT").unwrap_or_else(|_| DEFAULT_EMAIL_SUBJECT.to_string()),
        )?;

        let defaults = TimingConfig::default();
        let timing = TimingConfig {
            busy_delay: duration_var("CONTACT_BUSY_DELAY_MS", defaults.busy_delay)?,
            reset_delay: duration_var("CONTACT_RESET_DELAY_MS", defaults.reset_delay)?,
            toast_duration: duration_var("CONTACT_TOAST_MS", defaults.toast_duration)?,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            contact: ContactConfig { handoff, timing },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn duration_var(name: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidDuration {
                variable: name,
                value: raw,
            }),
        Err(_) => Ok(default),
    }
}

/// Everything the contact form needs at runtime.
#[derive(Debug, Clone, Default)]
pub struct ContactConfig {
    pub handoff: HandoffConfig,
    pub timing: TimingConfig,
}

/// Recipients for the two handoff channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffConfig {
    whatsapp_number: String,
    email_address: String,
    email_subject: String,
}

impl HandoffConfig {
    /// Normalizes the chat recipient to bare digits and checks the mail recipient shape.
    pub fn new(
        whatsapp_number: &str,
        email_address: &str,
        email_subject: String,
    ) -> Result<Self, ConfigError> {
        let digits: String = whatsapp_number
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '-' | '(' | ')' | '.' | '+'))
            .collect();
        if digits.len() < 7 || digits.len() > 15 || !digits.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(ConfigError::InvalidWhatsappNumber(whatsapp_number.to_string()));
        }

        let email_address = email_address.trim();
        if !crate::form::validators::is_valid_email(email_address)
            || email_address.contains(MAILTO_DELIMITERS)
        {
            return Err(ConfigError::InvalidEmailAddress(email_address.to_string()));
        }

        Ok(Self {
            whatsapp_number: digits,
            email_address: email_address.to_string(),
            email_subject,
        })
    }

    pub fn whatsapp_number(&self) -> &str {
        &self.whatsapp_number
    }

    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    pub fn email_subject(&self) -> &str {
        &self.email_subject
    }
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            email_address: DEFAULT_EMAIL_ADDRESS.to_string(),
            email_subject: DEFAULT_EMAIL_SUBJECT.to_string(),
        }
    }
}

/// Cosmetic pacing of the submission sequence and toast lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub busy_delay: Duration,
    pub reset_delay: Duration,
    pub toast_duration: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            busy_delay: Duration::from_millis(800),
            reset_delay: Duration::from_millis(500),
            toast_duration: Duration::from_millis(5000),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidWhatsappNumber(String),
    InvalidEmailAddress(String),
    InvalidDuration {
        variable: &'static str,
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWhatsappNumber(value) => write!(
                f,
                "CONTACT_WHATSAPP_NUMBER must hold 7 to 15 digits (found '{value}')"
            ),
            ConfigError::InvalidEmailAddress(value) => write!(
                f,
                "CONTACT_EMAIL_ADDRESS must be a valid email address without ?, #, & or % (found '{value}')"
            ),
            ConfigError::InvalidDuration { variable, value } => write!(
                f,
                "{variable} must be a whole number of milliseconds (found '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("CONTACT_WHATSAPP_NUMBER");
        env::remove_var("CONTACT_EMAIL_ADDRESS");
        env::remove_var("CONTACT_EMAIL_SUBJECT");
        env::remove_var("CONTACT_BUSY_DELAY_MS");
        env::remove_var("CONTACT_RESET_DELAY_MS");
        env::remove_var("CONTACT_TOAST_MS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.contact.handoff, HandoffConfig::default());
        assert_eq!(config.contact.timing.busy_delay, Duration::from_millis(800));
        assert_eq!(config.contact.timing.reset_delay, Duration::from_millis(500));
    }

    #[test]
    fn whatsapp_number_is_normalized_to_digits() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CONTACT_WHATSAPP_NUMBER", "+971 50-198-4302");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.contact.handoff.whatsapp_number(), "971501984302");
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_delay() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CONTACT_BUSY_DELAY_MS", "soon");
        let err = AppConfig::load().expect_err("delay must be numeric");
        assert!(matches!(
            err,
            ConfigError::InvalidDuration {
                variable: "CONTACT_BUSY_DELAY_MS",
                ..
            }
        ));
        reset_env();
    }

    #[test]
    fn rejects_malformed_recipient_address() {
        let err = HandoffConfig::new("971501984302", "not-an-address", String::new())
            .expect_err("address must be email shaped");
        assert!(err.to_string().contains("CONTACT_EMAIL_ADDRESS"));
    }

    #[test]
    fn rejects_recipient_with_link_delimiters() {
        for address in [
            "desk#1@example.com",
            "desk?cc=x@example.com",
            "desk&co@example.com",
            "desk%40@example.com",
        ] {
            let err = HandoffConfig::new("971501984302", address, String::new())
                .expect_err("delimiter would break the mailto link");
            assert!(matches!(err, ConfigError::InvalidEmailAddress(ref value) if value == address));
        }
        let plus = HandoffConfig::new("971501984302", " desk+quotes@example.com ", String::new())
            .expect("plus addressing is allowed");
        assert_eq!(plus.email_address(), "desk+quotes@example.com");
    }
}
