//! Catalog endpoint.

use axum::extract::State;
use axum::Json;

use crate::api::types::ApiContext;
use crate::models::MedicineRecord;

/// `GET /api/medicines`: catalog records in load order.
pub async fn list(State(ctx): State<ApiContext>) -> Json<Vec<MedicineRecord>> {
    Json(ctx.core.knowledge().medicines().cloned().collect())
}
