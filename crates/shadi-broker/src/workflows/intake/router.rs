use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::locale::{Label, Locale};
use super::service::IntakeService;
use super::session::IntakeError;
use super::views::{QuestionnaireView, SubmissionRequest};
use crate::profiles::ProfileGateway;

/// Public questionnaire endpoints.
pub fn intake_router<G>(service: Arc<IntakeService<G>>) -> Router
where
    G: ProfileGateway + 'static,
{
    Router::new()
        .route("/api/v1/intake/questions", get(questions_handler))
        .route("/api/v1/intake/submissions", post(submit_handler::<G>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LocaleQuery {
    #[serde(default)]
    locale: Option<Locale>,
}

pub(crate) async fn questions_handler(Query(query): Query<LocaleQuery>) -> Response {
    let view = QuestionnaireView::new(query.locale.unwrap_or_default());
    (StatusCode::OK, Json(view)).into_response()
}

pub(crate) async fn submit_handler<G>(
    State(service): State<Arc<IntakeService<G>>>,
    Json(request): Json<SubmissionRequest>,
) -> Response
where
    G: ProfileGateway + 'static,
{
    let locale = request.locale;
    let session = match request.into_session() {
        Ok(session) => session,
        Err(err) => return error_response(locale, err),
    };

    match service.submit(session).await {
        (_, Ok(profile)) => {
            let payload = json!({
                "profile_id": profile.id,
                "message": locale.text(Label::Success),
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        (_, Err(err)) => error_response(locale, err),
    }
}

fn error_response(locale: Locale, error: IntakeError) -> Response {
    match error {
        IntakeError::VerificationRequired => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        IntakeError::Invalid(issues) => {
            let fields: Vec<_> = issues
                .iter()
                .map(|issue| {
                    json!({
                        "field": issue.field,
                        "problem": issue.problem,
                        "message": issue.problem.describe(),
                    })
                })
                .collect();
            let payload = json!({
                "error": locale.text(Label::Required),
                "fields": fields,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        IntakeError::NotAQuestion(_) | IntakeError::InvalidAnswer { .. } => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        IntakeError::SubmissionInFlight => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        IntakeError::Gateway(_) => {
            let payload = json!({ "error": locale.text(Label::Error) });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}
