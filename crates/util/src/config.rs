use std::{env, fmt, net::SocketAddr};

use url::Url;

use super::server_bind_address;

pub const DEFAULT_RELAY_URL: &str = "https://formspree.io/f/xrbroevl";
pub const DEFAULT_SUPPORT_EMAIL: &str = "hantakalidhoti@gmail.com";
pub const DEFAULT_SITE_DOMAIN: &str = "nepalcansell.com";

/// Application runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    fn from_str(value: &str) -> Result<Self, ConfigError> {
        match value {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }

    /// Returns the canonical name used for logging/metrics labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

/// Runtime configuration resolved from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub environment: Environment,
    /// Form-relay endpoint receiving inquiries.
    pub relay_url: Url,
    /// Mailbox shown on the page and used by the compose fallback.
    pub support_email: String,
    /// Domain the page advertises.
    pub site_domain: String,
}

impl AppConfig {
    /// Constructs the configuration by reading and validating environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_value = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let environment = Environment::from_str(&env_value)?;
        let bind_addr = server_bind_address().map_err(ConfigError::BindAddress)?;

        let relay_raw = env_or("FORM_RELAY_URL", DEFAULT_RELAY_URL);
        let relay_url = Url::parse(&relay_raw).map_err(ConfigError::RelayUrl)?;
        if !matches!(relay_url.scheme(), "http" | "https") {
            return Err(ConfigError::RelayScheme(relay_url.scheme().to_string()));
        }

        let support_email = env_or("SUPPORT_EMAIL", DEFAULT_SUPPORT_EMAIL)
            .trim()
            .to_string();
        if !support_email.contains('@') {
            return Err(ConfigError::SupportEmail(support_email));
        }

        let site_domain = env_or("SITE_DOMAIN", DEFAULT_SITE_DOMAIN).trim().to_string();
        if site_domain.is_empty() {
            return Err(ConfigError::EmptySiteDomain);
        }

        Ok(Self {
            bind_addr,
            environment,
            relay_url,
            support_email,
            site_domain,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Errors that can occur during configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    InvalidEnvironment(String),
    BindAddress(std::net::AddrParseError),
    RelayUrl(url::ParseError),
    RelayScheme(String),
    SupportEmail(String),
    EmptySiteDomain,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnvironment(value) => write!(
                f,
                "APP_ENV must be one of 'development', 'production', or 'test' (got {value})"
            ),
            Self::BindAddress(err) => write!(f, "invalid APP_BIND_ADDR value: {err}"),
            Self::RelayUrl(err) => write!(f, "invalid FORM_RELAY_URL value: {err}"),
            Self::RelayScheme(scheme) => {
                write!(f, "FORM_RELAY_URL must use http or https (got {scheme})")
            }
            Self::SupportEmail(value) => {
                write!(f, "SUPPORT_EMAIL must be an email address (got {value})")
            }
            Self::EmptySiteDomain => write!(f, "SITE_DOMAIN must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}
