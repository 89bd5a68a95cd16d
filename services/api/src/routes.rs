use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use shadi_broker::auth::TokenVerifier;
use shadi_broker::config::ExportConfig;
use shadi_broker::profiles::ProfileGateway;
use shadi_broker::workflows::intake::{intake_router, IntakeService};
use shadi_broker::workflows::roster::{roster_router, RosterService};
use std::sync::Arc;

/// Public intake routes, admin roster routes, and the operational endpoints.
pub(crate) fn with_service_routes<G>(
    intake: Arc<IntakeService<G>>,
    roster: Arc<RosterService<G>>,
    verifier: Arc<dyn TokenVerifier>,
    export: ExportConfig,
) -> Router
where
    G: ProfileGateway + 'static,
{
    intake_router(intake)
        .merge(roster_router(roster, verifier, export))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use shadi_broker::auth::JwtVerifier;
    use shadi_broker::config::ProfileApiConfig;
    use shadi_broker::profiles::HttpProfileGateway;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app(ready: bool) -> (Router, Arc<AtomicBool>) {
        let gateway = Arc::new(
            HttpProfileGateway::new(&ProfileApiConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                timeout_secs: 1,
            })
            .expect("client builds"),
        );
        let readiness = Arc::new(AtomicBool::new(ready));
        let state = AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let verifier: Arc<dyn TokenVerifier> = Arc::new(JwtVerifier::new("routes-test"));
        let router = with_service_routes(
            Arc::new(IntakeService::new(gateway.clone())),
            Arc::new(RosterService::new(gateway)),
            verifier,
            ExportConfig::default(),
        )
        .layer(Extension(state));
        (router, readiness)
    }

    async fn call(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&body).unwrap_or_default())
    }

    #[tokio::test]
    async fn health_is_always_ok() {
        let (router, _) = app(false);
        let (status, body) = call(router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_follows_the_flag() {
        let (router, readiness) = app(false);
        let (status, body) = call(router.clone(), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        readiness.store(true, Ordering::Release);
        let (status, body) = call(router, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn questionnaire_is_public_and_roster_is_not() {
        let (router, _) = app(true);
        let (status, body) = call(router.clone(), "/api/v1/intake/questions?locale=kn").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["locale"], "kn");
        assert_eq!(body["total"], 17);

        let (status, _) = call(router, "/api/v1/roster/profiles").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
