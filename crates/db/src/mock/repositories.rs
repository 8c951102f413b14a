use async_trait::async_trait;
use mockall::mock;
use slotbook_core::models::time_slot::NewTimeSlot;
use uuid::Uuid;

use crate::{
    models::{DbService, DbTimeSlot},
    repositories::SlotRepository,
};

// Mock repositories for testing
mock! {
    pub SlotRepo {}

    #[async_trait]
    impl SlotRepository for SlotRepo {
        async fn business_timezone(&self, business_id: Uuid) -> eyre::Result<Option<String>>;

        async fn service_for_business(
            &self,
            service_id: Uuid,
            business_id: Uuid,
        ) -> eyre::Result<Option<DbService>>;

        async fn persist_slots(&self, slots: Vec<NewTimeSlot>) -> eyre::Result<Vec<DbTimeSlot>>;
    }
}
