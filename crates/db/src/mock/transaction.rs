use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use eyre::{eyre, Result};
use slotbook_core::models::time_slot::NewTimeSlot;
use uuid::Uuid;

use crate::{models::DbTimeSlot, repositories::time_slot::SlotTransaction};

#[derive(Debug, Default)]
struct StoreState {
    rows: Vec<DbTimeSlot>,
    commits: usize,
    rollbacks: usize,
}

/// In-memory slot table with transactional writes.
///
/// Rows only become visible through [`InMemorySlotStore::rows`] once a
/// transaction commits.
#[derive(Debug, Clone, Default)]
pub struct InMemorySlotStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> InMemoryTransaction {
        InMemoryTransaction {
            store: self.clone(),
            pending: Vec::new(),
            fail_on_insert: None,
        }
    }

    /// Starts a transaction whose `n`th insert (1-based) fails.
    pub fn begin_failing_at(&self, n: usize) -> InMemoryTransaction {
        InMemoryTransaction {
            fail_on_insert: Some(n),
            ..self.begin()
        }
    }

    pub fn rows(&self) -> Vec<DbTimeSlot> {
        self.lock().rows.clone()
    }

    pub fn commits(&self) -> usize {
        self.lock().commits
    }

    pub fn rollbacks(&self) -> usize {
        self.lock().rollbacks
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug)]
pub struct InMemoryTransaction {
    store: InMemorySlotStore,
    pending: Vec<DbTimeSlot>,
    fail_on_insert: Option<usize>,
}

#[async_trait]
impl SlotTransaction for InMemoryTransaction {
    async fn insert_slot(&mut self, slot: &NewTimeSlot) -> Result<DbTimeSlot> {
        if self.fail_on_insert == Some(self.pending.len() + 1) {
            return Err(eyre!("simulated failure on insert {}", self.pending.len() + 1));
        }

        let row = DbTimeSlot {
            id: Uuid::new_v4(),
            start_time: slot.start_time,
            end_time: slot.end_time,
            is_available: slot.is_available,
            service_id: slot.service_id,
            business_id: slot.business_id,
            created_at: Utc::now(),
        };
        self.pending.push(row.clone());
        Ok(row)
    }

    async fn commit(self) -> Result<()> {
        let mut state = self.store.lock();
        state.rows.extend(self.pending);
        state.commits += 1;
        Ok(())
    }

    async fn rollback(self) -> Result<()> {
        self.store.lock().rollbacks += 1;
        Ok(())
    }
}
