//! Account endpoints.
//!
//! - `GET /api/accounts`: all accounts
//! - `PUT /api/accounts/:phone`: create or update name and email
//! - `GET /api/accounts/:phone`: one account with its profiles
//! - `POST /api/accounts/:phone/profiles`: append a profile

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{normalize_phone, Account, Profile, StoredProfile};

#[derive(Debug, Deserialize)]
pub struct AccountRequest {
    pub name: String,
    pub email: String,
}

/// `GET /api/accounts`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Account>>, ApiError> {
    let conn = ctx.core.open_db()?;
    Ok(Json(repository::list_accounts(&conn)?))
}

/// `PUT /api/accounts/:phone`
pub async fn save(
    State(ctx): State<ApiContext>,
    Path(phone): Path<String>,
    payload: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let Json(request) = payload?;
    if normalize_phone(&phone).is_empty() {
        return Err(ApiError::BadRequest("Phone number is required".into()));
    }

    let conn = ctx.core.open_db()?;
    let account =
        repository::save_account(&conn, &phone, request.name.trim(), request.email.trim())?;
    tracing::info!(profiles = account.profiles.len(), "Account saved");
    Ok(Json(account))
}

/// `GET /api/accounts/:phone`
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(phone): Path<String>,
) -> Result<Json<Account>, ApiError> {
    let conn = ctx.core.open_db()?;
    repository::get_account(&conn, &phone)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Account {phone} not found")))
}

/// `POST /api/accounts/:phone/profiles`
pub async fn add_profile(
    State(ctx): State<ApiContext>,
    Path(phone): Path<String>,
    payload: Result<Json<Profile>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredProfile>), ApiError> {
    let Json(profile) = payload?;
    let conn = ctx.core.open_db()?;
    repository::add_profile(&conn, &phone, &profile)?
        .map(|stored| (StatusCode::CREATED, Json(stored)))
        .ok_or_else(|| ApiError::NotFound(format!("Account {phone} not found")))
}
