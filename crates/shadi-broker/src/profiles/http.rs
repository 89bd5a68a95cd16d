use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use super::domain::{NewProfile, Profile, ProfileId};
use super::gateway::{GatewayError, ProfileGateway};
use crate::config::ProfileApiConfig;

/// `reqwest`-backed client for the Profile API's `/profiles` resource.
#[derive(Debug, Clone)]
pub struct HttpProfileGateway {
    client: Client,
    base_url: Url,
}

impl HttpProfileGateway {
    pub fn new(config: &ProfileApiConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        Self::with_client(client, &config.base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, GatewayError> {
        let parsed = Url::parse(base_url)
            .map_err(|err| GatewayError::InvalidUrl(format!("{base_url}: {err}")))?;
        if parsed.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    fn collection_url(&self) -> Url {
        self.profiles_url(None)
    }

    /// Ids are opaque, so each one becomes a single percent-encoded path segment.
    fn record_url(&self, id: &ProfileId) -> Url {
        self.profiles_url(Some(id.as_str()))
    }

    fn profiles_url(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        // `with_client` rejects bases that cannot carry a path.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("profiles");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }
}

#[async_trait]
impl ProfileGateway for HttpProfileGateway {
    async fn list(&self) -> Result<Vec<Profile>, GatewayError> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(transport)?;
        decode(check_status(response).await?).await
    }

    async fn create(&self, request: &NewProfile) -> Result<Profile, GatewayError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        decode(check_status(response).await?).await
    }

    async fn update(&self, profile: &Profile) -> Result<Profile, GatewayError> {
        let response = self
            .client
            .put(self.record_url(&profile.id))
            .json(profile)
            .send()
            .await
            .map_err(transport)?;
        decode(check_status(response).await?).await
    }

    async fn delete(&self, id: &ProfileId) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(self.record_url(id))
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;
        Ok(())
    }
}

fn transport(err: reqwest::Error) -> GatewayError {
    GatewayError::Transport(err.to_string())
}

async fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), %body, "profile API rejected request");
    Err(GatewayError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    response
        .json::<T>()
        .await
        .map_err(|err| GatewayError::Decode(err.to_string()))
}
