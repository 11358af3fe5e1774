//! Current-session endpoints.
//!
//! The session names the account (and optionally the profile) a client
//! last selected. There is at most one.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::Session;

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub phone: String,
    #[serde(default)]
    pub profile_id: Option<Uuid>,
}

/// `GET /api/session`
pub async fn get(State(ctx): State<ApiContext>) -> Result<Json<Session>, ApiError> {
    let conn = ctx.core.open_db()?;
    Ok(Json(repository::get_current_session(&conn)?))
}

/// `PUT /api/session`: the account and profile must exist.
pub async fn set(
    State(ctx): State<ApiContext>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<Json<Session>, ApiError> {
    let Json(request) = payload?;
    let conn = ctx.core.open_db()?;

    if repository::get_account(&conn, &request.phone)?.is_none() {
        return Err(ApiError::NotFound(format!(
            "Account {} not found",
            request.phone
        )));
    }
    if let Some(profile_id) = &request.profile_id {
        if repository::get_profile(&conn, &request.phone, profile_id)?.is_none() {
            return Err(ApiError::NotFound(format!("Profile {profile_id} not found")));
        }
    }

    repository::set_current_session(&conn, &request.phone, request.profile_id.as_ref())?;
    Ok(Json(repository::get_current_session(&conn)?))
}

/// `DELETE /api/session`
pub async fn clear(State(ctx): State<ApiContext>) -> Result<StatusCode, ApiError> {
    let conn = ctx.core.open_db()?;
    repository::clear_session(&conn)?;
    Ok(StatusCode::NO_CONTENT)
}
