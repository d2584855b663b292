//! SQLite Repository Implementation
//!
//! The dataset is pre-built and opened read-only by the application;
//! this repository never writes.

use sqlx::SqlitePool;

use crate::domain::entity::Coupon;
use crate::domain::repository::CouponRepository;
use crate::error::CouponResult;

/// SQLite-backed read-only repository
#[derive(Clone)]
pub struct SqliteCouponRepository {
    pool: SqlitePool,
}

impl SqliteCouponRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CouponRepository for SqliteCouponRepository {
    async fn find_by_drug(&self, drug_name: &str) -> CouponResult<Option<Coupon>> {
        // Exact match wins over the substring fallback.
        let exact = sqlx::query_as::<_, CouponRow>(
            r#"
            SELECT id, drug_name, ai_extraction
            FROM manufacturer_coupons
            WHERE LOWER(drug_name) = LOWER(?1)
            LIMIT 1
            "#,
        )
        .bind(drug_name)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = exact {
            return Ok(Some(row.into_coupon()));
        }

        let fuzzy = sqlx::query_as::<_, CouponRow>(
            r#"
            SELECT id, drug_name, ai_extraction
            FROM manufacturer_coupons
            WHERE LOWER(drug_name) LIKE LOWER(?1)
            LIMIT 1
            "#,
        )
        .bind(format!("%{drug_name}%"))
        .fetch_optional(&self.pool)
        .await?;

        Ok(fuzzy.map(CouponRow::into_coupon))
    }

    async fn list(
        &self,
        limit: u32,
        offset: u32,
        drug_name: Option<&str>,
    ) -> CouponResult<Vec<Coupon>> {
        let rows = match drug_name {
            Some(name) => {
                sqlx::query_as::<_, CouponRow>(
                    r#"
                    SELECT id, drug_name, ai_extraction
                    FROM manufacturer_coupons
                    WHERE LOWER(drug_name) LIKE LOWER(?1)
                    ORDER BY id
                    LIMIT ?2 OFFSET ?3
                    "#,
                )
                .bind(format!("%{name}%"))
                .bind(limit as i64)
                .bind(offset as i64)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, CouponRow>(
                    r#"
                    SELECT id, drug_name, ai_extraction
                    FROM manufacturer_coupons
                    ORDER BY id
                    LIMIT ?1 OFFSET ?2
                    "#,
                )
                .bind(limit as i64)
                .bind(offset as i64)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(CouponRow::into_coupon).collect())
    }

    async fn count(&self, drug_name: Option<&str>) -> CouponResult<i64> {
        let total: i64 = match drug_name {
            Some(name) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM manufacturer_coupons WHERE LOWER(drug_name) LIKE LOWER(?1)",
                )
                .bind(format!("%{name}%"))
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM manufacturer_coupons")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(total)
    }
}

/// Row shape as stored; converted to the domain entity on read
#[derive(sqlx::FromRow)]
struct CouponRow {
    id: i64,
    drug_name: String,
    ai_extraction: Option<String>,
}

impl CouponRow {
    fn into_coupon(self) -> Coupon {
        Coupon {
            id: self.id,
            drug_name: self.drug_name,
            ai_extraction: self.ai_extraction,
        }
    }
}
