use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use slotbook_core::{
    errors::SlotError,
    models::{
        auth::AuthContext,
        time_slot::{BusinessSlot, GenerateSlotsRequest, GenerateSlotsResponse, PublicTimeSlot},
    },
};
use uuid::Uuid;

use crate::{generation, middleware::error_handling::AppError, ApiState};

/// Query parameters for `GET /api/public/slots`
#[derive(Debug, Deserialize)]
pub struct PublicSlotsQuery {
    pub business_id: Option<String>,
    pub service_id: Option<String>,
    /// Optional `YYYY-MM-DD` filter on the slot's UTC start date
    pub date: Option<String>,
}

#[axum::debug_handler]
pub async fn generate_slots(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<GenerateSlotsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GenerateSlotsResponse>), AppError> {
    let Json(request) = payload
        .map_err(|rejection| SlotError::Validation(format!("Invalid input: {}", rejection.body_text())))?;

    let slots = generation::generate_slots(state.slot_repo.as_ref(), &auth, &request).await?;

    Ok((StatusCode::CREATED, Json(GenerateSlotsResponse::new(slots))))
}

#[axum::debug_handler]
pub async fn list_business_slots(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<BusinessSlot>>, AppError> {
    let business_id = auth.require_business()?;

    let slots = slotbook_db::repositories::time_slot::get_time_slots_by_business_id(
        &state.db_pool,
        business_id,
    )
    .await
    .map_err(SlotError::Database)?;

    Ok(Json(slots.into_iter().map(BusinessSlot::from).collect()))
}

#[axum::debug_handler]
pub async fn public_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<PublicSlotsQuery>,
) -> Result<Json<Vec<PublicTimeSlot>>, AppError> {
    let (Some(business_id), Some(service_id)) = (&query.business_id, &query.service_id) else {
        return Err(AppError(SlotError::Validation(
            "business_id and service_id are required".to_string(),
        )));
    };
    let business_id = parse_id("business_id", business_id)?;
    let service_id = parse_id("service_id", service_id)?;
    let date = query
        .date
        .as_deref()
        .filter(|date| !date.is_empty())
        .map(|date| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| SlotError::Validation(format!("Invalid date: {date}")))
        })
        .transpose()?;

    let slots = slotbook_db::repositories::time_slot::get_public_slots(
        &state.db_pool,
        business_id,
        service_id,
        date,
    )
    .await
    .map_err(SlotError::Database)?;

    Ok(Json(slots.into_iter().map(PublicTimeSlot::from).collect()))
}

pub(crate) fn parse_id(field: &str, value: &str) -> Result<Uuid, SlotError> {
    Uuid::parse_str(value).map_err(|_| SlotError::Validation(format!("Invalid {field}")))
}
