use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::sync::OnceLock;
use std::time::Duration;

static SHARED_POOL: OnceLock<PgPool> = OnceLock::new();

pub fn connect_options(settings: &DatabaseSettings) -> PgConnectOptions {
    let options = PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.username)
        .database(&settings.database_name);
    if settings.password.is_empty() {
        options
    } else {
        options.password(&settings.password)
    }
}

fn pool_options(settings: &DatabaseSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.pool_size)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
}

/// Builds a pool that opens connections on first use.
///
/// Nothing touches the network here, so a process can start (and serve static
/// content) while the store is down. An unreachable store surfaces as an
/// error on the first query once the acquire timeout elapses.
pub fn connect_lazy(settings: &DatabaseSettings) -> PgPool {
    pool_options(settings).connect_lazy_with(connect_options(settings))
}

/// Establishes a connection pool and verifies the store is reachable.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    if settings.pool_size == 0 {
        return Err(DbError::ConnectionConfigError(
            "pool_size must be at least 1".to_string(),
        ));
    }
    let pool = pool_options(settings)
        .connect_with(connect_options(settings))
        .await?;
    Ok(pool)
}

/// Returns the process-wide pool, creating it on the first call.
///
/// Later calls return the same instance and ignore their argument. Callers
/// hand the returned pool to `DbRepository::new`; data access code never
/// reaches for this accessor itself.
pub fn shared_pool(settings: &DatabaseSettings) -> &'static PgPool {
    SHARED_POOL.get_or_init(|| {
        tracing::info!(target = %settings.display_target(), pool_size = settings.pool_size, "Creating shared connection pool");
        connect_lazy(settings)
    })
}
