use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use slotbook_core::{
    errors::SlotError,
    models::{
        auth::AuthContext,
        service::{Service, ServiceResponse},
    },
};

use crate::{handlers::slots::parse_id, middleware::error_handling::AppError, ApiState};

/// Query parameters for `GET /api/public/services`
#[derive(Debug, Deserialize)]
pub struct PublicServicesQuery {
    pub business_id: Option<String>,
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let business_id = auth.require_business()?;

    let services =
        slotbook_db::repositories::service::get_services_by_business_id(&state.db_pool, business_id)
            .await
            .map_err(SlotError::Database)?;

    Ok(Json(to_responses(services)))
}

#[axum::debug_handler]
pub async fn public_services(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<PublicServicesQuery>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let business_id = query
        .business_id
        .as_deref()
        .ok_or_else(|| SlotError::Validation("business_id is required".to_string()))?;
    let business_id = parse_id("business_id", business_id)?;

    let services =
        slotbook_db::repositories::service::get_services_by_business_id(&state.db_pool, business_id)
            .await
            .map_err(SlotError::Database)?;

    Ok(Json(to_responses(services)))
}

fn to_responses(services: Vec<slotbook_db::models::DbService>) -> Vec<ServiceResponse> {
    services
        .into_iter()
        .map(|row| ServiceResponse::from(Service::from(row)))
        .collect()
}
