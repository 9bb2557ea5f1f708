use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

pub fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(10)
        .min_idle(Some(2))
        .test_on_check_out(true)
        .build(manager)?;

    tracing::info!("database connection pool created");
    Ok(pool)
}

/// Builds a pool without opening any connection up front. Checkouts fail
/// after `timeout` if the database can't be reached.
pub fn create_lazy_pool(database_url: &str, timeout: Duration) -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(2)
        .min_idle(Some(0))
        .connection_timeout(timeout)
        .build_unchecked(manager)
}
