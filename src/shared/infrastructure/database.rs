use crate::log_info;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager, Pool};
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Connection settings read from the environment (`.env` is honoured).
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_size: u32,
    pub min_idle: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    /// Reads `DATABASE_URL` plus the optional pool overrides
    /// `DATABASE_MAX_CONNECTIONS`, `DATABASE_MIN_IDLE` and
    /// `DATABASE_CONNECT_TIMEOUT_SECS`.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let url = env::var("DATABASE_URL").map_err(|_| {
            AppError::ConfigurationError("DATABASE_URL environment variable not found".to_string())
        })?;
        Self::validate_url(&url)?;

        let defaults = PoolSizing::for_host();
        let max_size = read_u32("DATABASE_MAX_CONNECTIONS")?.unwrap_or(defaults.max_size);
        let min_idle = read_u32("DATABASE_MIN_IDLE")?
            .unwrap_or(defaults.min_idle)
            .min(max_size);
        let connect_timeout =
            Duration::from_secs(read_u32("DATABASE_CONNECT_TIMEOUT_SECS")?.unwrap_or(10) as u64);

        Ok(Self {
            url,
            max_size,
            min_idle,
            connect_timeout,
        })
    }

    fn validate_url(url: &str) -> AppResult<()> {
        if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
            return Err(AppError::ConfigurationError(
                "Invalid database URL format. Must start with postgres:// or postgresql://"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn read_u32(key: &str) -> AppResult<Option<u32>> {
    match env::var(key) {
        Ok(raw) => Ok(Some(raw.trim().parse::<u32>().map_err(|e| {
            AppError::ConfigurationError(format!("{} is not a valid number: {}", key, e))
        })?)),
        Err(_) => Ok(None),
    }
}

#[derive(Debug)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    pub fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(config.url.clone());

        let pool = r2d2::Pool::builder()
            .max_size(config.max_size)
            .min_idle(Some(config.min_idle))
            .connection_timeout(config.connect_timeout)
            .idle_timeout(Some(Duration::from_secs(300)))
            .max_lifetime(Some(Duration::from_secs(1800)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to create connection pool: {}", e))
            })?;

        // Log the host only, never the credentials
        log_info!(
            "Database connection pool initialized for {} with max_size: {}, min_idle: {}",
            config.url.split('@').last().unwrap_or("unknown_host"),
            pool.max_size(),
            config.min_idle
        );

        Ok(Self { pool })
    }

    pub fn from_env() -> AppResult<Self> {
        Self::new(&DatabaseConfig::from_env()?)
    }

    /// Create a Database instance from an existing pool (useful for testing)
    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn get_connection(&self) -> AppResult<DbConnection> {
        let start = std::time::Instant::now();

        match self.pool.get() {
            Ok(conn) => {
                let duration = start.elapsed().as_millis() as u64;
                if duration > 100 {
                    LogContext::performance_metric("db_connection_acquire", duration, Some("slow"));
                }
                Ok(conn)
            }
            Err(e) => {
                LogContext::error_with_context(
                    &e,
                    "Failed to acquire database connection from pool",
                );
                Err(AppError::from(e))
            }
        }
    }

    /// Apply any embedded migrations that have not run yet.
    pub fn run_migrations(&self) -> AppResult<usize> {
        let mut conn = self.get_connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {}", e)))?;

        log_info!("Applied {} pending database migrations", applied.len());
        Ok(applied.len())
    }

    /// Run `work` on a pooled connection inside a single transaction.
    ///
    /// Any `Err` returned by `work` rolls back every write it made.
    pub async fn with_transaction<T, F>(self: Arc<Self>, work: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
    {
        task::spawn_blocking(move || -> AppResult<T> {
            let mut conn = self.get_connection()?;
            conn.transaction::<T, AppError, _>(|conn| work(conn))
        })
        .await?
    }
}

#[derive(Debug)]
struct PoolSizing {
    max_size: u32,
    min_idle: u32,
}

impl PoolSizing {
    /// Base pool size on CPU count, capped at 20
    fn for_host() -> Self {
        let cpu_count = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        let max_size = std::cmp::min(cpu_count * 2, 20);
        let min_idle = std::cmp::max(2, max_size / 4);

        Self {
            max_size: max_size as u32,
            min_idle: min_idle as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_postgres_urls() {
        assert!(DatabaseConfig::validate_url("mysql://user@localhost/db").is_err());
        assert!(DatabaseConfig::validate_url("postgres://user@localhost/db").is_ok());
        assert!(DatabaseConfig::validate_url("postgresql://user@localhost/db").is_ok());
    }

    #[test]
    fn pool_sizing_stays_within_bounds() {
        let sizing = PoolSizing::for_host();
        assert!(sizing.max_size <= 20);
        assert!(sizing.min_idle >= 2);
    }
}
