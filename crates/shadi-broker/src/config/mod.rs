use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

const DEVELOPMENT_JWT_SECRET: &str = "development-secret-change-in-production";
const DEFAULT_PRODUCT_NAME: &str = "shadi_broker";

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
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub profile_api: ProfileApiConfig,
    pub auth: AuthConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let base_url =
            env::var("PROFILE_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidProfileApiUrl(base_url));
        }
        let timeout_secs = env::var("PROFILE_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidTimeout)?;

        let jwt_secret = match env::var("ADMIN_JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == AppEnvironment::Production => {
                return Err(ConfigError::MissingJwtSecret)
            }
            _ => DEVELOPMENT_JWT_SECRET.to_string(),
        };

        let product_name =
            env::var("EXPORT_PRODUCT_NAME").unwrap_or_else(|_| DEFAULT_PRODUCT_NAME.to_string());
        let escape_csv = match env::var("EXPORT_ESCAPE_CSV") {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidFlag("EXPORT_ESCAPE_CSV"))?,
            Err(_) => false,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            profile_api: ProfileApiConfig {
                base_url,
                timeout_secs,
            },
            auth: AuthConfig { jwt_secret },
            export: ExportConfig {
                product_name,
                escape_csv,
            },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the external Profile API.
#[derive(Debug, Clone)]
pub struct ProfileApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Secret used to verify admin bearer tokens.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

/// CSV export naming and format.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub product_name: String,
    pub escape_csv: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            escape_csv: false,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidProfileApiUrl(String),
    InvalidTimeout,
    MissingJwtSecret,
    InvalidFlag(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidProfileApiUrl(url) => {
                write!(f, "PROFILE_API_URL must be an http(s) URL, got '{url}'")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "PROFILE_API_TIMEOUT_SECS must be a positive integer")
            }
            ConfigError::MissingJwtSecret => {
                write!(f, "ADMIN_JWT_SECRET must be set in production")
            }
            ConfigError::InvalidFlag(name) => write!(f, "{name} must be true or false"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
