//! Profile endpoints.
//!
//! - `GET /api/profile`: current profile screen
//! - `POST /api/profile/actions`: apply one user input

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::profile::{ProfileAction, ProfileView};

/// `GET /api/profile`
pub async fn view(State(ctx): State<ApiContext>) -> Result<Json<ProfileView>, ApiError> {
    let profile = ctx.core.read_profile()?;
    Ok(Json(profile.view()))
}

/// `POST /api/profile/actions`
pub async fn apply(
    State(ctx): State<ApiContext>,
    payload: Result<Json<ProfileAction>, JsonRejection>,
) -> Result<Json<ProfileView>, ApiError> {
    let Json(action) = payload?;
    let mut profile = ctx.core.write_profile()?;
    profile.apply(action);
    Ok(Json(profile.view()))
}
