use crate::models::{DbBusinessSlot, DbPublicSlot, DbTimeSlot};
use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use slotbook_core::models::time_slot::NewTimeSlot;
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

/// A write scope that slot rows are inserted into before being committed together.
///
/// Dropping an implementation without calling [`SlotTransaction::commit`] must
/// discard every row inserted through it.
#[async_trait]
pub trait SlotTransaction: Send {
    async fn insert_slot(&mut self, slot: &NewTimeSlot) -> Result<DbTimeSlot>;

    async fn commit(self) -> Result<()>;

    async fn rollback(self) -> Result<()>;
}

#[async_trait]
impl SlotTransaction for Transaction<'static, Postgres> {
    async fn insert_slot(&mut self, slot: &NewTimeSlot) -> Result<DbTimeSlot> {
        let time_slot = sqlx::query_as::<_, DbTimeSlot>(
            r#"
            INSERT INTO appointment_slots (start_time, end_time, is_available, service_id, business_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, start_time, end_time, is_available, service_id, business_id, created_at
            "#,
        )
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.is_available)
        .bind(slot.service_id)
        .bind(slot.business_id)
        .fetch_one(&mut **self)
        .await?;

        Ok(time_slot)
    }

    async fn commit(self) -> Result<()> {
        Transaction::commit(self).await?;
        Ok(())
    }

    async fn rollback(self) -> Result<()> {
        Transaction::rollback(self).await?;
        Ok(())
    }
}

/// Inserts `slots` in order inside `tx`, committing only if every insert succeeds.
///
/// On the first failed insert the transaction is rolled back and the insert error is
/// returned, so none of the batch is ever visible.
pub async fn insert_slot_batch<T: SlotTransaction>(
    mut tx: T,
    slots: &[NewTimeSlot],
) -> Result<Vec<DbTimeSlot>> {
    let mut created = Vec::with_capacity(slots.len());

    for (index, slot) in slots.iter().enumerate() {
        match tx.insert_slot(slot).await {
            Ok(time_slot) => created.push(time_slot),
            Err(err) => {
                tracing::warn!(
                    "Slot insert {} of {} failed, rolling back batch: {}",
                    index + 1,
                    slots.len(),
                    err
                );
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!("Rollback after failed slot insert also failed: {}", rollback_err);
                }
                return Err(err.wrap_err(format!(
                    "Failed to insert slot {} of {}",
                    index + 1,
                    slots.len()
                )));
            }
        }
    }

    tx.commit().await?;
    tracing::debug!("Committed {} slots", created.len());

    Ok(created)
}

pub async fn create_time_slots(
    pool: &Pool<Postgres>,
    slots: &[NewTimeSlot],
) -> Result<Vec<DbTimeSlot>> {
    let tx = pool.begin().await?;
    insert_slot_batch(tx, slots).await
}

pub async fn get_time_slots_by_business_id(
    pool: &Pool<Postgres>,
    business_id: Uuid,
) -> Result<Vec<DbBusinessSlot>> {
    let time_slots = sqlx::query_as::<_, DbBusinessSlot>(
        r#"
        SELECT s.id, s.start_time, s.end_time, s.is_available, s.service_id, sv.name AS service_name
        FROM appointment_slots s
        JOIN services sv ON s.service_id = sv.id
        WHERE s.business_id = $1
        ORDER BY s.start_time ASC
        "#,
    )
    .bind(business_id)
    .fetch_all(pool)
    .await?;

    Ok(time_slots)
}

/// Available slots for customers.
///
/// With a `date`, returns the slots starting on that UTC calendar day. Without one,
/// returns every slot that has not started yet.
pub async fn get_public_slots(
    pool: &Pool<Postgres>,
    business_id: Uuid,
    service_id: Uuid,
    date: Option<NaiveDate>,
) -> Result<Vec<DbPublicSlot>> {
    let time_slots = match date {
        Some(date) => {
            sqlx::query_as::<_, DbPublicSlot>(
                r#"
                SELECT s.id, s.start_time, s.end_time, s.service_id, sv.name AS service_name, sv.duration
                FROM appointment_slots s
                JOIN services sv ON s.service_id = sv.id
                WHERE s.business_id = $1 AND s.service_id = $2
                AND s.is_available = TRUE
                AND (s.start_time AT TIME ZONE 'UTC')::date = $3
                ORDER BY s.start_time ASC
                "#,
            )
            .bind(business_id)
            .bind(service_id)
            .bind(date)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, DbPublicSlot>(
                r#"
                SELECT s.id, s.start_time, s.end_time, s.service_id, sv.name AS service_name, sv.duration
                FROM appointment_slots s
                JOIN services sv ON s.service_id = sv.id
                WHERE s.business_id = $1 AND s.service_id = $2
                AND s.is_available = TRUE
                AND s.start_time > NOW()
                ORDER BY s.start_time ASC
                "#,
            )
            .bind(business_id)
            .bind(service_id)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(time_slots)
}
