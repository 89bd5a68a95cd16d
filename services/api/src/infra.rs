use metrics_exporter_prometheus::PrometheusHandle;
use shadi_broker::config::AppConfig;
use shadi_broker::error::AppError;
use shadi_broker::profiles::{HttpProfileGateway, ProfileField};
use shadi_broker::telemetry::{self, LogSink};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Configuration plus a live gateway for one-shot operator commands.
pub(crate) struct OperatorContext {
    pub(crate) config: AppConfig,
    pub(crate) gateway: Arc<HttpProfileGateway>,
}

impl OperatorContext {
    pub(crate) fn load() -> Result<Self, AppError> {
        let config = AppConfig::load()?;
        telemetry::init(&config.telemetry, LogSink::Stderr)?;
        let gateway = Arc::new(HttpProfileGateway::new(&config.profile_api)?);
        Ok(Self { config, gateway })
    }
}

/// `field=value` pairs for `roster edit --set`.
pub(crate) fn parse_assignment(raw: &str) -> Result<(ProfileField, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = key.parse::<ProfileField>().map_err(|err| err.to_string())?;
    Ok((field, value.to_string()))
}
