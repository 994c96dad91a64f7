use sqlx::{PgPool, migrate::MigrateError, postgres::PgPoolOptions};

/// Connect to PostgreSQL and bring the schema up to date.
pub async fn configure_postgresql(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pg_pool = get_postgres_pool(url, max_connections).await?;

    run_migrations(&pg_pool).await?;

    Ok(pg_pool)
}

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

async fn run_migrations(pg_pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pg_pool).await
}
