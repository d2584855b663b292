//! SQLite Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::entity::ApiKeyRecord;
use crate::domain::repository::ApiKeyRepository;
use crate::domain::value_object::mask_key;
use crate::error::AuthResult;

/// Dev-only key inserted when seeding an empty table
const SEED_KEY: &str = "testkey123";
const SEED_CLIENT: &str = "local-dev";
const SEED_RATE_LIMIT: i64 = 60;

/// SQLite-backed repository
#[derive(Clone)]
pub struct SqliteApiKeyRepository {
    pool: SqlitePool,
}

impl SqliteApiKeyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the schema if missing and optionally seed a dev key.
    ///
    /// Idempotent; safe to run on every startup. The seed key is only
    /// inserted when the table is empty.
    pub async fn ensure_schema(&self, seed: bool) -> AuthResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS api_keys (
                api_key TEXT PRIMARY KEY,
                client_name TEXT NOT NULL,
                created_at TEXT NOT NULL,
                rate_limit INTEGER NOT NULL DEFAULT 60,
                active INTEGER NOT NULL DEFAULT 1,
                last_used_at TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        if seed {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM api_keys")
                .fetch_one(&self.pool)
                .await?;
            if count == 0 {
                sqlx::query(
                    r#"
                    INSERT OR IGNORE INTO api_keys (api_key, client_name, created_at, rate_limit)
                    VALUES (?1, ?2, ?3, ?4)
                    "#,
                )
                .bind(SEED_KEY)
                .bind(SEED_CLIENT)
                .bind(Utc::now())
                .bind(SEED_RATE_LIMIT)
                .execute(&self.pool)
                .await?;

                tracing::info!(client = SEED_CLIENT, "Seeded development API key");
            }
        }

        Ok(())
    }
}

impl ApiKeyRepository for SqliteApiKeyRepository {
    async fn find(&self, api_key: &str) -> AuthResult<Option<ApiKeyRecord>> {
        let row = sqlx::query_as::<_, ApiKeyRow>(
            r#"
            SELECT api_key, client_name, created_at, rate_limit, active, last_used_at
            FROM api_keys
            WHERE api_key = ?1
            LIMIT 1
            "#,
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ApiKeyRow::into_record))
    }

    async fn touch_last_used(&self, api_key: &str) -> AuthResult<()> {
        sqlx::query("UPDATE api_keys SET last_used_at = ?1 WHERE api_key = ?2")
            .bind(Utc::now())
            .bind(api_key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list(&self) -> AuthResult<Vec<ApiKeyRecord>> {
        let rows = sqlx::query_as::<_, ApiKeyRow>(
            r#"
            SELECT api_key, client_name, created_at, rate_limit, active, last_used_at
            FROM api_keys
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ApiKeyRow::into_record).collect())
    }

    async fn insert(&self, record: &ApiKeyRecord) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO api_keys (api_key, client_name, created_at, rate_limit, active, last_used_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&record.api_key)
        .bind(&record.client_name)
        .bind(record.created_at)
        .bind(record.rate_limit as i64)
        .bind(record.active)
        .bind(record.last_used_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(
            key = %mask_key(&record.api_key),
            client = %record.client_name,
            rate_limit = record.rate_limit,
            "API key created"
        );

        Ok(())
    }

    async fn set_active(&self, api_key: &str, active: bool) -> AuthResult<bool> {
        let affected = sqlx::query("UPDATE api_keys SET active = ?1 WHERE api_key = ?2")
            .bind(active)
            .bind(api_key)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected > 0 {
            tracing::info!(key = %mask_key(api_key), active, "API key active flag changed");
        }
        Ok(affected > 0)
    }

    async fn delete(&self, api_key: &str) -> AuthResult<bool> {
        let affected = sqlx::query("DELETE FROM api_keys WHERE api_key = ?1")
            .bind(api_key)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected > 0 {
            tracing::info!(key = %mask_key(api_key), "API key revoked");
        }
        Ok(affected > 0)
    }

    async fn replace_key(&self, api_key: &str, new_key: &str) -> AuthResult<bool> {
        let affected = sqlx::query("UPDATE api_keys SET api_key = ?1 WHERE api_key = ?2")
            .bind(new_key)
            .bind(api_key)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected > 0 {
            tracing::info!(key = %mask_key(api_key), "API key rotated");
        }
        Ok(affected > 0)
    }
}

/// Row shape as stored; converted to the domain entity on read
#[derive(sqlx::FromRow)]
struct ApiKeyRow {
    api_key: String,
    client_name: String,
    created_at: DateTime<Utc>,
    rate_limit: i64,
    active: bool,
    last_used_at: Option<DateTime<Utc>>,
}

impl ApiKeyRow {
    fn into_record(self) -> ApiKeyRecord {
        ApiKeyRecord {
            api_key: self.api_key,
            client_name: self.client_name,
            created_at: self.created_at,
            rate_limit: self.rate_limit.max(0) as u32,
            active: self.active,
            last_used_at: self.last_used_at,
        }
    }
}
