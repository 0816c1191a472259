//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs its parameters and basic result info.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{instrument, warn};

use worksheet_backend::WorksheetError;

use crate::logic::{build_worksheet, score_worksheet};
use crate::protocol::*;
use crate::state::AppState;

/// Configuration errors become 400 with a JSON body.
pub struct ApiError(WorksheetError);

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0 {
            WorksheetError::InvalidConfiguration(_) => StatusCode::BAD_REQUEST,
            WorksheetError::VerbTable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorOut { error: self.0.to_string() })).into_response()
    }
}

/// A body that does not deserialize (wrong type, out-of-range count, bad
/// JSON) is a bad request like any other invalid configuration.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(target: "worksheet", status = %rejection.status(), error = %rejection.body_text(), "Rejected request body");
        ApiError(WorksheetError::InvalidConfiguration(rejection.body_text()))
    }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_worksheet(
    State(state): State<Arc<AppState>>,
    body: Result<Json<WorksheetIn>, JsonRejection>,
) -> Result<Json<WorksheetOut>, ApiError> {
    let Json(body) = body?;
    let out = build_worksheet(&state, &body, &mut rand::thread_rng()).map_err(ApiError)?;
    Ok(Json(out))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_evaluate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EvaluateIn>, JsonRejection>,
) -> Result<Json<EvaluateOut>, ApiError> {
    let Json(body) = body?;
    Ok(Json(score_worksheet(&state, &body)))
}
