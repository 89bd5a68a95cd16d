use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::profiles::{FieldValueError, GatewayError};
use crate::telemetry::TelemetryError;
use crate::workflows::intake::IntakeError;
use crate::workflows::roster::{ExportError, RosterError};
use std::fmt;

/// Failure of a CLI command or of server startup. HTTP handlers answer with their own
/// per-operation notices instead.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Input(String),
    Auth(AuthError),
    Intake(IntakeError),
    Roster(RosterError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Input(message) => write!(f, "invalid input: {}", message),
            AppError::Auth(err) => write!(f, "authorization error: {}", err),
            AppError::Intake(err) => write!(f, "intake error: {}", err),
            AppError::Roster(err) => write!(f, "roster error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Input(_) => None,
            AppError::Auth(err) => Some(err),
            AppError::Intake(err) => Some(err),
            AppError::Roster(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<AuthError> for AppError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<IntakeError> for AppError {
    fn from(value: IntakeError) -> Self {
        Self::Intake(value)
    }
}

impl From<RosterError> for AppError {
    fn from(value: RosterError) -> Self {
        Self::Roster(value)
    }
}

impl From<GatewayError> for AppError {
    fn from(value: GatewayError) -> Self {
        Self::Roster(RosterError::Gateway(value))
    }
}

impl From<FieldValueError> for AppError {
    fn from(value: FieldValueError) -> Self {
        Self::Roster(RosterError::Field(value))
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Roster(RosterError::Export(value))
    }
}
