//! # Slot Generation Pipeline
//!
//! Request validation, then synthesis, then one transactional write. A request either
//! persists every slot it produced or none of them.

use slotbook_core::{
    errors::{SlotError, SlotResult},
    models::{
        auth::AuthContext,
        time_slot::{GenerateSlotsRequest, NewTimeSlot, TimeSlot},
    },
    slots::synthesize,
};
use slotbook_db::repositories::SlotRepository;
use tracing::{info, warn};

/// Generates and stores the slots described by `request` for the caller's business.
///
/// The service duration is read from the stored service, never from the request.
/// An unknown business timezone falls back to UTC.
///
/// # Errors
///
/// * `SlotError::Authorization` - the principal has no business
/// * `SlotError::Validation` - malformed request; nothing is looked up
/// * `SlotError::NotFound` - the service does not belong to the business
/// * `SlotError::Database` - lookup or write failure; nothing is persisted
pub async fn generate_slots(
    repo: &dyn SlotRepository,
    auth: &AuthContext,
    request: &GenerateSlotsRequest,
) -> SlotResult<Vec<TimeSlot>> {
    let business_id = auth.require_business()?;
    request.validate()?;

    let service = repo
        .service_for_business(request.service_id, business_id)
        .await
        .map_err(SlotError::Database)?
        .ok_or_else(|| SlotError::NotFound("Service not found or access denied".to_string()))?;

    let timezone = match repo.business_timezone(business_id).await {
        Ok(timezone) => timezone,
        Err(e) => {
            warn!("Timezone lookup failed for business {}, using UTC: {}", business_id, e);
            None
        }
    };

    let candidates: Vec<NewTimeSlot> = synthesize(request, service.duration, timezone.as_deref())?
        .into_iter()
        .map(|interval| NewTimeSlot::from_interval(interval, service.id, business_id))
        .collect();

    let persisted = repo
        .persist_slots(candidates)
        .await
        .map_err(SlotError::Database)?;

    info!(
        "Generated {} slots for service {} of business {}",
        persisted.len(),
        service.id,
        business_id
    );

    Ok(persisted.into_iter().map(TimeSlot::from).collect())
}
