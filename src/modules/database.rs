use crate::config::database::PostgresSettings;
use anyhow::Context;
use sqlx::{migrate, PgConnection};
use tracing::info;

pub use sqlx::PgPool;

/// Connection paired with the payload a set of domain queries operates on.
///
/// Domain modules implement their queries on `PgQuery<'c, Domain>`; the connection
/// may be a pooled connection or a transaction.
pub struct PgQuery<'c, T> {
    pub payload: T,
    pub conn: &'c mut PgConnection,
}

impl<'c, T> PgQuery<'c, T> {
    pub fn new(payload: T, conn: &'c mut PgConnection) -> Self {
        Self { payload, conn }
    }

    /// Runs another domain's queries on the same connection.
    pub fn rebind<U>(&mut self, payload: U) -> PgQuery<'_, U> {
        PgQuery {
            payload,
            conn: &mut *self.conn,
        }
    }
}

pub async fn get_postgres_pool(config: PostgresSettings) -> anyhow::Result<PgPool> {
    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Cannot establish postgres connection")?;
    if config.is_migrating {
        info!("Running migrations");
        migrate!("./migrations")
            .run(&pool)
            .await
            .context("Auto migration failed")?;
    }
    Ok(pool)
}
