use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use shadi_broker::auth::{JwtVerifier, TokenVerifier};
use shadi_broker::config::AppConfig;
use shadi_broker::error::AppError;
use shadi_broker::profiles::HttpProfileGateway;
use shadi_broker::telemetry::{self, LogSink};
use shadi_broker::workflows::intake::IntakeService;
use shadi_broker::workflows::roster::RosterService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, LogSink::Stdout)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let gateway = Arc::new(HttpProfileGateway::new(&config.profile_api)?);
    let verifier: Arc<dyn TokenVerifier> = Arc::new(JwtVerifier::new(&config.auth.jwt_secret));
    let intake_service = Arc::new(IntakeService::new(gateway.clone()));
    let roster_service = Arc::new(RosterService::new(gateway));

    let app = with_service_routes(
        intake_service,
        roster_service,
        verifier,
        config.export.clone(),
    )
    .layer(Extension(app_state))
    .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        profile_api = %config.profile_api.base_url,
        "shadi broker ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
