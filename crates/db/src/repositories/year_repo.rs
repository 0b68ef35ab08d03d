//! Repository for the `years` table.

use sqlx::PgPool;

use scholaris_core::lifecycle::PeriodStatus;
use scholaris_core::types::DbId;

use crate::models::year::{Year, YearOverview};

const COLUMNS: &str = "id, name, status, created_at, updated_at";

/// Provides CRUD and lifecycle operations for academic years.
pub struct YearRepo;

impl YearRepo {
    /// Insert a new year in the `active` state.
    ///
    /// The `uq_years_single_active` partial index rejects this while
    /// another year is still active.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Year, sqlx::Error> {
        let query = format!("INSERT INTO years (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Year>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Year>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM years WHERE id = $1");
        sqlx::query_as::<_, Year>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the single active year, if any.
    pub async fn find_active(pool: &PgPool) -> Result<Option<Year>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM years WHERE status = 'active'");
        sqlx::query_as::<_, Year>(&query).fetch_optional(pool).await
    }

    /// List all years with their student, term, and sequence counts,
    /// newest first.
    pub async fn list_with_overview(pool: &PgPool) -> Result<Vec<YearOverview>, sqlx::Error> {
        sqlx::query_as::<_, YearOverview>(
            "SELECT y.id, y.name, y.status,
                    (SELECT COUNT(*) FROM students s
                     JOIN school_classes c ON s.class_id = c.id
                     WHERE c.year_id = y.id) AS students,
                    (SELECT COUNT(*) FROM terms t WHERE t.year_id = y.id) AS terms,
                    (SELECT COUNT(*) FROM sequences q
                     JOIN terms t ON q.term_id = t.id
                     WHERE t.year_id = y.id) AS sequences
             FROM years y
             ORDER BY y.created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Rename a year. Returns `None` if no row with the given `id` exists.
    pub async fn rename(pool: &PgPool, id: DbId, name: &str) -> Result<Option<Year>, sqlx::Error> {
        let query = format!(
            "UPDATE years SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Year>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Count the terms and sequences under a year. Used to enforce the
    /// minimum-children rule before closing.
    pub async fn child_counts(pool: &PgPool, id: DbId) -> Result<(i64, i64), sqlx::Error> {
        let (terms, sequences): (i64, i64) = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM terms WHERE year_id = $1),
                    (SELECT COUNT(*) FROM sequences q
                     JOIN terms t ON q.term_id = t.id
                     WHERE t.year_id = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok((terms, sequences))
    }

    /// Close a year and cascade the closure to every term and sequence
    /// under it, in one transaction.
    ///
    /// Returns `false` if the year was not active.
    pub async fn close_cascade(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let closed = PeriodStatus::Closed.as_str();
        let mut tx = pool.begin().await?;

        let result = sqlx::query("UPDATE years SET status = $2, updated_at = NOW() WHERE id = $1 AND status = 'active'")
            .bind(id)
            .bind(closed)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "UPDATE sequences SET status = $2, updated_at = NOW()
             WHERE status <> $2 AND term_id IN (SELECT id FROM terms WHERE year_id = $1)",
        )
        .bind(id)
        .bind(closed)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE terms SET status = $2, updated_at = NOW() WHERE year_id = $1 AND status <> $2",
        )
        .bind(id)
        .bind(closed)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Delete a year. Classes, terms, and everything below them cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM years WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
