use std::sync::Arc;

use tracing::{info, warn};

use super::session::{IntakeError, IntakeSession};
use crate::profiles::{Profile, ProfileGateway};

/// Sends completed questionnaires to the Profile API.
pub struct IntakeService<G> {
    gateway: Arc<G>,
}

impl<G> IntakeService<G>
where
    G: ProfileGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Submit a session, returning the follow-up session alongside the outcome.
    ///
    /// Gate or validation failures never reach the gateway and hand back the session
    /// unchanged. A gateway failure hands back the session with every answer intact.
    pub async fn submit(
        &self,
        session: IntakeSession,
    ) -> (IntakeSession, Result<Profile, IntakeError>) {
        let (in_flight, request) = match session.begin_submission() {
            Ok(started) => started,
            Err(err) => return (session, Err(err)),
        };

        match self.gateway.create(&request).await {
            Ok(profile) => {
                info!(profile_id = %profile.id, taluk = %profile.fields.taluk, "profile submitted");
                (in_flight.complete(), Ok(profile))
            }
            Err(err) => {
                warn!(error = %err, "profile submission failed");
                (in_flight.fail(), Err(IntakeError::Gateway(err)))
            }
        }
    }
}

impl<G> Clone for IntakeService<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}
