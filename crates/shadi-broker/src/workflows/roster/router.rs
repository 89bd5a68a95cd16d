use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::export::{export_filename, CsvFormat};
use super::filter::RosterFilters;
use super::notice::RosterNotice;
use super::service::{RosterError, RosterService};
use super::view::RosterView;
use crate::auth::{bearer_token, AuthError, TokenVerifier};
use crate::config::ExportConfig;
use crate::profiles::{Profile, ProfileGateway, ProfileId};

/// Shared state for the admin roster routes.
pub struct RosterState<G> {
    pub service: Arc<RosterService<G>>,
    pub export: ExportConfig,
}

/// Admin endpoints. Every route sits behind bearer-token verification.
pub fn roster_router<G>(
    service: Arc<RosterService<G>>,
    verifier: Arc<dyn TokenVerifier>,
    export: ExportConfig,
) -> Router
where
    G: ProfileGateway + 'static,
{
    let state = Arc::new(RosterState { service, export });
    Router::new()
        .route("/api/v1/roster/profiles", get(list_handler::<G>))
        .route(
            "/api/v1/roster/profiles/:profile_id",
            get(profile_handler::<G>)
                .put(update_handler::<G>)
                .delete(delete_handler::<G>),
        )
        .route("/api/v1/roster/analytics", get(analytics_handler::<G>))
        .route("/api/v1/roster/taluks", get(taluks_handler::<G>))
        .route("/api/v1/roster/export", get(export_handler::<G>))
        .route_layer(middleware::from_fn_with_state(verifier, require_admin))
        .with_state(state)
}

pub(crate) async fn require_admin(
    State(verifier): State<Arc<dyn TokenVerifier>>,
    mut request: Request,
    next: Next,
) -> Response {
    let outcome = {
        let header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        bearer_token(header).and_then(|token| verifier.verify(token))
    };

    match outcome {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(err) => {
            warn!(error = %err, path = %request.uri().path(), "admin request rejected");
            let status = match err {
                AuthError::Forbidden => StatusCode::FORBIDDEN,
                _ => StatusCode::UNAUTHORIZED,
            };
            (status, Json(json!({ "error": err.to_string() }))).into_response()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RosterQuery {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    taluk: Option<String>,
    #[serde(default)]
    escape: Option<bool>,
    #[serde(default)]
    confirm: Option<bool>,
}

impl RosterQuery {
    fn filters(&self) -> RosterFilters {
        RosterFilters {
            search: self.search.clone(),
            gender: self.gender.clone(),
            taluk: self.taluk.clone(),
        }
    }
}

pub(crate) async fn list_handler<G>(
    State(state): State<Arc<RosterState<G>>>,
    Query(query): Query<RosterQuery>,
) -> Response
where
    G: ProfileGateway + 'static,
{
    match state.service.load(query.filters(), Utc::now()).await {
        Ok(view) => (StatusCode::OK, Json(view.listing())).into_response(),
        Err(err) => error_response(err, RosterNotice::LoadFailed),
    }
}

pub(crate) async fn profile_handler<G>(
    State(state): State<Arc<RosterState<G>>>,
    Path(profile_id): Path<String>,
) -> Response
where
    G: ProfileGateway + 'static,
{
    let id = ProfileId(profile_id);
    let view = match state.service.load(RosterFilters::default(), Utc::now()).await {
        Ok(view) => view,
        Err(err) => return error_response(err, RosterNotice::LoadFailed),
    };

    match state.service.begin_edit(&view, &id) {
        Ok(edit) => (StatusCode::OK, Json(edit.original())).into_response(),
        Err(err) => error_response(err, RosterNotice::LoadFailed),
    }
}

pub(crate) async fn analytics_handler<G>(State(state): State<Arc<RosterState<G>>>) -> Response
where
    G: ProfileGateway + 'static,
{
    match state.service.load(RosterFilters::default(), Utc::now()).await {
        Ok(view) => (StatusCode::OK, Json(view.analytics())).into_response(),
        Err(err) => error_response(err, RosterNotice::AnalyticsFailed),
    }
}

pub(crate) async fn taluks_handler<G>(State(state): State<Arc<RosterState<G>>>) -> Response
where
    G: ProfileGateway + 'static,
{
    match state.service.load(RosterFilters::default(), Utc::now()).await {
        Ok(view) => (StatusCode::OK, Json(view.taluk_options())).into_response(),
        Err(err) => error_response(err, RosterNotice::LoadFailed),
    }
}

pub(crate) async fn export_handler<G>(
    State(state): State<Arc<RosterState<G>>>,
    Query(query): Query<RosterQuery>,
) -> Response
where
    G: ProfileGateway + 'static,
{
    let now = Utc::now();
    let view = match state.service.load(query.filters(), now).await {
        Ok(view) => view,
        Err(err) => return error_response(err, RosterNotice::LoadFailed),
    };

    let format = CsvFormat::from_escape_flag(query.escape.unwrap_or(state.export.escape_csv));
    let body = match view.export(format) {
        Ok(body) => body,
        Err(err) => return error_response(RosterError::Export(err), RosterNotice::LoadFailed),
    };
    let filename = export_filename(&state.export.product_name, now.date_naive());
    info!(rows = view.visible().len(), filename = %filename, "roster exported");

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

pub(crate) async fn update_handler<G>(
    State(state): State<Arc<RosterState<G>>>,
    Path(profile_id): Path<String>,
    Query(query): Query<RosterQuery>,
    Json(profile): Json<Profile>,
) -> Response
where
    G: ProfileGateway + 'static,
{
    let id = ProfileId(profile_id);
    if profile.id != id {
        let err = RosterError::IdMismatch {
            expected: id,
            found: profile.id,
        };
        return error_response(err, RosterNotice::UpdateFailed);
    }

    let now = Utc::now();
    let view = match state.service.load(query.filters(), now).await {
        Ok(view) => view,
        Err(err) => return error_response(err, RosterNotice::LoadFailed),
    };
    let edit = match state
        .service
        .begin_edit(&view, &id)
        .and_then(|edit| edit.replace(profile))
    {
        Ok(edit) => edit,
        Err(err) => return error_response(err, RosterNotice::UpdateFailed),
    };

    match state.service.save(&view, edit, now).await {
        Ok(applied) => {
            let mut payload = json!({
                "message": RosterNotice::Updated.message(),
                "profile": applied.value,
            });
            attach_reload(&mut payload, &applied.reload);
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err, RosterNotice::UpdateFailed),
    }
}

pub(crate) async fn delete_handler<G>(
    State(state): State<Arc<RosterState<G>>>,
    Path(profile_id): Path<String>,
    Query(query): Query<RosterQuery>,
) -> Response
where
    G: ProfileGateway + 'static,
{
    let id = ProfileId(profile_id);
    let now = Utc::now();
    let view = match state.service.load(query.filters(), now).await {
        Ok(view) => view,
        Err(err) => return error_response(err, RosterNotice::LoadFailed),
    };

    let confirmed = query.confirm.unwrap_or(false);
    match state.service.delete(&view, &id, confirmed, now).await {
        Ok(applied) => {
            let mut payload = json!({
                "message": RosterNotice::Deleted.message(),
                "profile_id": applied.value,
            });
            attach_reload(&mut payload, &applied.reload);
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err, RosterNotice::DeleteFailed),
    }
}

/// The mutation already landed upstream; a failed reload only adds a warning.
fn attach_reload(payload: &mut Value, reload: &Result<RosterView, RosterError>) {
    match reload {
        Ok(view) => payload["roster"] = json!(view.listing()),
        Err(_) => {
            payload["roster"] = Value::Null;
            payload["warning"] = json!(RosterNotice::LoadFailed.message());
        }
    }
}

fn error_response(error: RosterError, failure: RosterNotice) -> Response {
    let (status, message) = match &error {
        RosterError::Gateway(_) => (StatusCode::BAD_GATEWAY, failure.message().to_string()),
        RosterError::NotFound(_) => (StatusCode::NOT_FOUND, error.to_string()),
        RosterError::ConfirmationRequired => (
            StatusCode::BAD_REQUEST,
            RosterNotice::ConfirmDelete.message().to_string(),
        ),
        RosterError::Field(_) | RosterError::IdMismatch { .. } => {
            (StatusCode::BAD_REQUEST, error.to_string())
        }
        RosterError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
}
