use async_trait::async_trait;

use super::domain::{NewProfile, Profile, ProfileId};

/// Boundary to the external Profile API. Every call is a single round trip.
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    async fn list(&self) -> Result<Vec<Profile>, GatewayError>;
    async fn create(&self, request: &NewProfile) -> Result<Profile, GatewayError>;
    async fn update(&self, profile: &Profile) -> Result<Profile, GatewayError>;
    async fn delete(&self, id: &ProfileId) -> Result<(), GatewayError>;
}

/// Failure talking to the Profile API.
///
/// Callers surface every variant as the same generic notice; the distinction only
/// exists for logs.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("profile API unreachable: {0}")]
    Transport(String),
    #[error("profile API responded with status {status}")]
    Status { status: u16, body: String },
    #[error("profile API returned an unreadable body: {0}")]
    Decode(String),
    #[error("invalid profile API url: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
