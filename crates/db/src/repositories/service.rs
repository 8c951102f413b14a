use crate::models::DbService;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_service_for_business(
    pool: &Pool<Postgres>,
    service_id: Uuid,
    business_id: Uuid,
) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, business_id, name, description, duration, created_at
        FROM services
        WHERE id = $1 AND business_id = $2
        "#,
    )
    .bind(service_id)
    .bind(business_id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn get_services_by_business_id(
    pool: &Pool<Postgres>,
    business_id: Uuid,
) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, business_id, name, description, duration, created_at
        FROM services
        WHERE business_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(business_id)
    .fetch_all(pool)
    .await?;

    Ok(services)
}
