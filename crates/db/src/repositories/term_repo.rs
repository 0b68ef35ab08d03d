//! Repository for the `terms` table.

use sqlx::PgPool;

use scholaris_core::lifecycle::PeriodStatus;
use scholaris_core::types::DbId;

use crate::models::term::{Term, TermOverview};

const COLUMNS: &str = "id, year_id, name, status, created_at, updated_at";

/// Provides CRUD and lifecycle operations for terms.
pub struct TermRepo;

impl TermRepo {
    /// Insert a new active term under a year.
    ///
    /// The `uq_terms_single_active` partial index rejects this while
    /// another term is still active.
    pub async fn create(pool: &PgPool, year_id: DbId, name: &str) -> Result<Term, sqlx::Error> {
        let query =
            format!("INSERT INTO terms (year_id, name) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Term>(&query)
            .bind(year_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Term>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM terms WHERE id = $1");
        sqlx::query_as::<_, Term>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the single active term, if any.
    pub async fn find_active(pool: &PgPool) -> Result<Option<Term>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM terms WHERE status = 'active'");
        sqlx::query_as::<_, Term>(&query).fetch_optional(pool).await
    }

    /// List every term with its year name and sequence count, newest first.
    pub async fn list_with_overview(pool: &PgPool) -> Result<Vec<TermOverview>, sqlx::Error> {
        sqlx::query_as::<_, TermOverview>(
            "SELECT t.id, t.name, y.name AS year_name, t.status,
                    (SELECT COUNT(*) FROM sequences q WHERE q.term_id = t.id) AS sequences_count
             FROM terms t
             JOIN years y ON t.year_id = y.id
             ORDER BY t.created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Rename a term. Returns `None` if no row with the given `id` exists.
    pub async fn rename(pool: &PgPool, id: DbId, name: &str) -> Result<Option<Term>, sqlx::Error> {
        let query = format!(
            "UPDATE terms SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Term>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Count the sequences under a term.
    pub async fn sequence_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sequences WHERE term_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Close a term and every sequence under it, in one transaction.
    ///
    /// Returns `false` if the term was not active.
    pub async fn close_cascade(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let closed = PeriodStatus::Closed.as_str();
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE terms SET status = $2, updated_at = NOW() WHERE id = $1 AND status = 'active'",
        )
        .bind(id)
        .bind(closed)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "UPDATE sequences SET status = $2, updated_at = NOW() WHERE term_id = $1 AND status <> $2",
        )
        .bind(id)
        .bind(closed)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM terms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
