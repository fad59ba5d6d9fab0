//! AI Doctor endpoints.
//!
//! - `GET /api/doctor/catalog`: diseases and their checklist labels
//! - `POST /api/doctor/sessions`: open a predictor screen
//! - `GET /api/doctor/sessions/:id`: current screen state
//! - `DELETE /api/doctor/sessions/:id`: close the screen
//! - `POST /api/doctor/sessions/:id/actions`: apply one user input
//! - `POST /api/doctor/sessions/:id/submit`: send the diagnosis request
//!
//! A failed prediction is not an API error: it comes back inside the view,
//! as the message the screen shows.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{parse_session_id, ApiContext};
use crate::catalog::{self, CatalogEntry};
use crate::doctor::{DoctorAction, DoctorView};

#[derive(Serialize)]
pub struct SessionOpened {
    pub session_id: Uuid,
    pub opened_at: String,
    pub view: DoctorView,
}

/// `GET /api/doctor/catalog`
pub async fn catalog() -> Json<Vec<CatalogEntry>> {
    Json(catalog::catalog_entries())
}

/// `POST /api/doctor/sessions`
pub async fn open(
    State(ctx): State<ApiContext>,
) -> Result<(StatusCode, Json<SessionOpened>), ApiError> {
    let (session_id, view) = ctx.core.open_doctor_session()?;
    Ok((
        StatusCode::CREATED,
        Json(SessionOpened {
            session_id,
            opened_at: chrono::Utc::now().to_rfc3339(),
            view,
        }),
    ))
}

/// `GET /api/doctor/sessions/:id`
pub async fn view(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<DoctorView>, ApiError> {
    let id = parse_session_id(&id)?;
    Ok(Json(ctx.core.doctor_view(&id)?))
}

/// `DELETE /api/doctor/sessions/:id`
pub async fn close(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_session_id(&id)?;
    ctx.core.close_doctor_session(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/doctor/sessions/:id/actions`
pub async fn apply(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    payload: Result<Json<DoctorAction>, JsonRejection>,
) -> Result<Json<DoctorView>, ApiError> {
    let id = parse_session_id(&id)?;
    let Json(action) = payload?;
    Ok(Json(ctx.core.apply_doctor_action(&id, action)?))
}

/// `POST /api/doctor/sessions/:id/submit`
///
/// Resolves once the prediction service has answered (or failed). The
/// session stays usable meanwhile; a second submit gets 409.
pub async fn submit(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<DoctorView>, ApiError> {
    let id = parse_session_id(&id)?;
    Ok(Json(ctx.core.submit_doctor_session(&id).await?))
}
