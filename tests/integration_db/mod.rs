use dotenv::dotenv;
use hahornah_server::db;
use lazy_static::lazy_static;
use sqlx::migrate::Migrate;
use sqlx::{migrate::Migrator, postgres::PgConnectOptions, PgPool};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{debug, span};

lazy_static! {
    // CREATE/DROP DATABASE cannot run concurrently on one template connection
    static ref DDL_MUTEX: Mutex<()> = Mutex::new(());
}

/// A throwaway, fully migrated database for one test. Fixture data is
/// created in code by the test itself, never loaded from SQL files.
pub struct IntegrationTestDb {
    db_name: String,
    pool: PgPool,
    template_connect_options: PgConnectOptions,
}

impl IntegrationTestDb {
    /// Returns `None` when DATABASE_URL is not set, so the suite degrades to
    /// the pure tests on machines without Postgres.
    pub async fn try_new() -> Option<Self> {
        dotenv().ok();
        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("DATABASE_URL not set, skipping database-backed test");
                return None;
            }
        };
        let template_connect_options: PgConnectOptions = database_url
            .parse()
            .expect("DATABASE_URL could not be parsed");

        // Random name so parallel test binaries never collide
        let db_name = format!("integration_{}", uuid::Uuid::new_v4().to_simple());
        let span = span!(tracing::Level::DEBUG, "test_db", test_db = db_name.as_str());
        let _enter = span.enter();

        {
            let _lock = DDL_MUTEX.lock().await;
            debug!("Creating test db");
            let template_pool = db::new_pool_with(template_connect_options.clone())
                .await
                .unwrap();
            sqlx::query(&format!("DROP DATABASE IF EXISTS {}", db_name))
                .execute(&template_pool)
                .await
                .unwrap();
            sqlx::query(&format!("CREATE DATABASE {}", db_name))
                .execute(&template_pool)
                .await
                .unwrap();
        }

        let pool = db::new_pool_with(template_connect_options.clone().database(&db_name))
            .await
            .unwrap();
        migrate(&pool).await;

        Some(Self {
            db_name,
            pool,
            template_connect_options,
        })
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }
}

/// Applies every migration to the fresh database, the same way sqlx-cli's
/// `migrate run` does.
async fn migrate(pool: &PgPool) {
    let migrator = Migrator::new(Path::new("migrations")).await.unwrap();
    let mut conn = pool.acquire().await.unwrap();
    conn.ensure_migrations_table().await.unwrap();
    for migration in migrator.iter() {
        conn.apply(migration).await.unwrap();
    }
}

impl Drop for IntegrationTestDb {
    fn drop(&mut self) {
        let db_name = self.db_name.clone();
        let template_connect_options = self.template_connect_options.clone();
        // Not the cleanest way to run async code in drop, but it works
        tokio::task::spawn_blocking(move || {
            let span = span!(tracing::Level::DEBUG, "test_db", test_db = db_name.as_str());
            let _enter = span.enter();
            actix_rt::System::new("Cleanup").block_on(async move {
                let _lock = DDL_MUTEX.lock().await;
                let template_pool = db::new_pool_with(template_connect_options)
                    .await
                    .unwrap();
                sqlx::query(&format!("DROP DATABASE {}", db_name))
                    .execute(&template_pool)
                    .await
                    .unwrap();
                debug!("Dropped test db");
            });
        });
    }
}
