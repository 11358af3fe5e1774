//! Scan endpoint.
//!
//! `POST /api/scan` evaluates two medicine names, optionally against a
//! profile given inline or referenced from the account store.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::Profile;
use crate::presentation::ScanView;
use crate::scanner::{InteractionScanner, ScanResult};

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub medicine_1: String,
    #[serde(default)]
    pub medicine_2: String,
    /// Inline profile. Takes precedence over `profile_ref`.
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub profile_ref: Option<ProfileRef>,
}

/// Reference to a stored profile.
#[derive(Debug, Deserialize)]
pub struct ProfileRef {
    pub phone: String,
    pub profile_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub result: ScanResult,
    pub view: ScanView,
}

/// `POST /api/scan`
pub async fn scan(
    State(ctx): State<ApiContext>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<ScanResponse>, ApiError> {
    let Json(request) = payload?;

    let profile = match (request.profile, request.profile_ref) {
        (Some(profile), _) => Some(profile),
        (None, Some(reference)) => {
            let conn = ctx.core.open_db()?;
            let stored = repository::get_profile(&conn, &reference.phone, &reference.profile_id)?
                .ok_or_else(|| {
                    ApiError::NotFound(format!("Profile {} not found", reference.profile_id))
                })?;
            Some(stored.profile)
        }
        (None, None) => None,
    };

    let result = ctx
        .core
        .scanner()
        .scan(&request.medicine_1, &request.medicine_2, profile.as_ref());
    let view = ScanView::from_result(&result, &request.medicine_1, &request.medicine_2);

    Ok(Json(ScanResponse { result, view }))
}
