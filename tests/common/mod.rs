use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use taskboard_activity::db;

/// A dedicated, migrated test database.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
}

impl TestDb {
    /// Insert a user and return its id.
    pub async fn create_user(&self, username: &str, avatar_url: Option<&str>) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (username, avatar_url) VALUES ($1, $2) RETURNING id",
        )
        .bind(username)
        .bind(avatar_url)
        .fetch_one(&self.pool)
        .await
        .expect("create user failed")
    }

    /// Insert a board owned by `owner`, who also becomes its admin.
    pub async fn create_board(&self, owner: Uuid, title: &str) -> Uuid {
        let board_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO boards (title, owner_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(title)
        .bind(owner)
        .fetch_one(&self.pool)
        .await
        .expect("create board failed");

        db::board_members::add(&self.pool, board_id, owner, "admin")
            .await
            .expect("add board owner failed");

        board_id
    }

    pub async fn count_activities(&self) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activities")
            .fetch_one(&self.pool)
            .await
            .expect("count activities failed")
    }
}

fn admin_url(base_url: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.to_string())
}

/// Create a fresh database from `DATABASE_URL` and apply migrations.
pub async fn spawn_db() -> TestDb {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let db_name = format!("taskboard_test_{}", Uuid::now_v7().to_string().replace('-', ""));

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    TestDb { pool, db_name }
}

/// Drop the test database.
pub async fn cleanup(db: TestDb) {
    let db_name = db.db_name.clone();
    db.pool.close().await;

    let base_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
