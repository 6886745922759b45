/// Database test utilities with singleton pattern
///
/// Provides thread-safe access to test database with proper isolation
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, Pool};
use diesel::sql_types;
use diesel_migrations::MigrationHarness;
use manga_lists::shared::infrastructure::database::MIGRATIONS;
use std::sync::{Arc, Mutex, OnceLock};
use uuid::Uuid;

type PgPool = Pool<ConnectionManager<PgConnection>>;

static DB_POOL: OnceLock<Arc<PgPool>> = OnceLock::new();

/// Get or create singleton database pool for tests, migrated on first use
pub fn get_test_db_pool() -> Arc<PgPool> {
    DB_POOL
        .get_or_init(|| {
            dotenvy::dotenv().ok();
            let test_db_url = std::env::var("TEST_DATABASE_URL")
                .expect("TEST_DATABASE_URL must be set in .env for tests");

            let manager = ConnectionManager::<PgConnection>::new(test_db_url);
            let pool = r2d2::Pool::builder()
                .max_size(10)
                .build(manager)
                .expect("Failed to create test database pool");

            let mut conn = pool.get().expect("Failed to get DB connection");
            conn.run_pending_migrations(MIGRATIONS)
                .expect("Failed to run migrations");

            Arc::new(pool)
        })
        .clone()
}

/// Clean all test tables - use at the start of each test
pub fn clean_test_db() {
    let pool = get_test_db_pool();
    let mut conn = pool.get().expect("Failed to get DB connection");

    diesel::sql_query(
        "TRUNCATE TABLE manga_list_likes, manga_list_items, manga_lists, \
         manga_translations, manga RESTART IDENTITY CASCADE",
    )
    .execute(&mut conn)
    .expect("Failed to clean manga list tables");
}

/// Insert a catalog manga with one English title
pub fn insert_catalog_manga(title: &str) -> Uuid {
    let pool = get_test_db_pool();
    let mut conn = pool.get().expect("Failed to get DB connection");
    let id = Uuid::new_v4();

    diesel::sql_query("INSERT INTO manga (id, cover) VALUES ($1, $2)")
        .bind::<sql_types::Uuid, _>(id)
        .bind::<sql_types::Text, _>(format!("https://example.com/{}.jpg", id))
        .execute(&mut conn)
        .expect("Failed to insert manga");

    diesel::sql_query(
        "INSERT INTO manga_translations (id, manga_id, language, name) VALUES ($1, $2, 'en', $3)",
    )
    .bind::<sql_types::Uuid, _>(Uuid::new_v4())
    .bind::<sql_types::Uuid, _>(id)
    .bind::<sql_types::Text, _>(title)
    .execute(&mut conn)
    .expect("Failed to insert manga translation");

    id
}

pub fn insert_like(list_id: Uuid) {
    let pool = get_test_db_pool();
    let mut conn = pool.get().expect("Failed to get DB connection");

    diesel::sql_query("INSERT INTO manga_list_likes (list_id, user_id) VALUES ($1, $2)")
        .bind::<sql_types::Uuid, _>(list_id)
        .bind::<sql_types::Uuid, _>(Uuid::new_v4())
        .execute(&mut conn)
        .expect("Failed to insert like");
}

/// Membership rows across every list, counted by the store
pub fn count_all_items() -> i64 {
    #[derive(QueryableByName)]
    struct Count {
        #[diesel(sql_type = sql_types::BigInt)]
        count: i64,
    }

    let pool = get_test_db_pool();
    let mut conn = pool.get().expect("Failed to get DB connection");
    diesel::sql_query("SELECT COUNT(*) AS count FROM manga_list_items")
        .get_result::<Count>(&mut conn)
        .expect("Failed to count items")
        .count
}

/// Global test mutex for serialization
static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Acquire test lock to ensure tests run serially
/// Returns a guard that releases the lock when dropped
pub fn acquire_test_lock() -> std::sync::MutexGuard<'static, ()> {
    // Handle poisoned mutex by recovering from panic
    match TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
