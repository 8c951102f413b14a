use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slotbook_core::models::{
    service::Service,
    time_slot::{BusinessSlot, PublicTimeSlot, TimeSlot},
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_available: bool,
    pub service_id: Uuid,
    pub business_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBusinessSlot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_available: bool,
    pub service_id: Uuid,
    pub service_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPublicSlot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub service_id: Uuid,
    pub service_name: String,
    pub duration: i32,
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Self {
            id: row.id,
            business_id: row.business_id,
            name: row.name,
            description: row.description,
            duration: row.duration,
        }
    }
}

impl From<DbTimeSlot> for TimeSlot {
    fn from(row: DbTimeSlot) -> Self {
        Self {
            id: row.id,
            start_time: row.start_time,
            end_time: row.end_time,
            is_available: row.is_available,
            service_id: row.service_id,
            business_id: row.business_id,
        }
    }
}

impl From<DbBusinessSlot> for BusinessSlot {
    fn from(row: DbBusinessSlot) -> Self {
        Self {
            id: row.id,
            start_time: row.start_time,
            end_time: row.end_time,
            is_available: row.is_available,
            service_id: row.service_id,
            service_name: row.service_name,
        }
    }
}

impl From<DbPublicSlot> for PublicTimeSlot {
    fn from(row: DbPublicSlot) -> Self {
        Self {
            id: row.id,
            start_time: row.start_time,
            end_time: row.end_time,
            service_id: row.service_id,
            service_name: row.service_name,
            duration: row.duration,
        }
    }
}
