use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create businesses table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS businesses (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            timezone VARCHAR(64) NOT NULL DEFAULT 'UTC',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            business_id UUID NOT NULL REFERENCES businesses(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            description TEXT NULL,
            duration INTEGER NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_duration CHECK (duration > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointment_slots table. Overlapping rows for the same service are allowed.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointment_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            is_available BOOLEAN NOT NULL DEFAULT TRUE,
            service_id UUID NOT NULL REFERENCES services(id) ON DELETE CASCADE,
            business_id UUID NOT NULL REFERENCES businesses(id) ON DELETE CASCADE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_services_business_id ON services(business_id)",
        "CREATE INDEX IF NOT EXISTS idx_appointment_slots_business_id ON appointment_slots(business_id)",
        "CREATE INDEX IF NOT EXISTS idx_appointment_slots_service_start ON appointment_slots(service_id, start_time)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
