pub mod business;
pub mod service;
pub mod time_slot;

use async_trait::async_trait;
use eyre::Result;
use slotbook_core::models::time_slot::NewTimeSlot;
use uuid::Uuid;

use crate::{
    models::{DbService, DbTimeSlot},
    DbPool,
};

/// Lookups and the batch write used by slot generation.
///
/// The generation pipeline only sees this trait, so it can be driven by
/// [`PgSlotRepository`] in production and by mocks in tests.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Timezone of the business, `None` when the business is unknown.
    async fn business_timezone(&self, business_id: Uuid) -> Result<Option<String>>;

    /// The service, only when it belongs to `business_id`.
    async fn service_for_business(
        &self,
        service_id: Uuid,
        business_id: Uuid,
    ) -> Result<Option<DbService>>;

    /// Writes all slots in one transaction, returning them in input order.
    async fn persist_slots(&self, slots: Vec<NewTimeSlot>) -> Result<Vec<DbTimeSlot>>;
}

#[derive(Debug, Clone)]
pub struct PgSlotRepository {
    pool: DbPool,
}

impl PgSlotRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for PgSlotRepository {
    async fn business_timezone(&self, business_id: Uuid) -> Result<Option<String>> {
        business::get_business_timezone(&self.pool, business_id).await
    }

    async fn service_for_business(
        &self,
        service_id: Uuid,
        business_id: Uuid,
    ) -> Result<Option<DbService>> {
        service::get_service_for_business(&self.pool, service_id, business_id).await
    }

    async fn persist_slots(&self, slots: Vec<NewTimeSlot>) -> Result<Vec<DbTimeSlot>> {
        time_slot::create_time_slots(&self.pool, &slots).await
    }
}
