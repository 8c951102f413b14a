use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_business_timezone(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<String>> {
    let timezone = sqlx::query_scalar::<_, String>(
        r#"
        SELECT timezone
        FROM businesses
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if timezone.is_none() {
        tracing::debug!("Business not found when resolving timezone: id={}", id);
    }

    Ok(timezone)
}
