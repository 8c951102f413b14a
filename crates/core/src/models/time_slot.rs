use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted, bookable interval belonging to one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_available: bool,
    pub service_id: Uuid,
    pub business_id: Uuid,
}

/// A slot produced by synthesis that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTimeSlot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_available: bool,
    pub service_id: Uuid,
    pub business_id: Uuid,
}

/// Half-open `[start, end)` interval in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl NewTimeSlot {
    pub fn from_interval(interval: SlotInterval, service_id: Uuid, business_id: Uuid) -> Self {
        Self {
            start_time: interval.start,
            end_time: interval.end,
            is_available: true,
            service_id,
            business_id,
        }
    }
}

/// Body of `POST /api/slots/generate`.
///
/// Dates accept either `YYYY-MM-DD` or an RFC 3339 timestamp. Times of day accept
/// `HH:MM` or `HH:MM:SS`. Parsing happens in [`GenerateSlotsRequest::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSlotsRequest {
    pub service_id: Uuid,
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
    /// Gap in minutes between the end of one slot and the start of the next.
    #[serde(default)]
    pub interval: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSlotsResponse {
    pub message: String,
    pub slots: Vec<TimeSlot>,
}

impl GenerateSlotsResponse {
    pub fn new(slots: Vec<TimeSlot>) -> Self {
        Self {
            message: format!("Generated {} time slots", slots.len()),
            slots,
        }
    }
}

/// Admin listing row, joined with the owning service's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessSlot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_available: bool,
    pub service_id: Uuid,
    pub service_name: String,
}

/// Customer-facing slot listing row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicTimeSlot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub service_id: Uuid,
    pub service_name: String,
    pub duration: i32,
}
