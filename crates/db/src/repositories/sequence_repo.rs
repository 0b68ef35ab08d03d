//! Repository for the `sequences` table.

use sqlx::PgPool;

use scholaris_core::types::DbId;

use crate::models::sequence::Sequence;

const COLUMNS: &str = "id, term_id, name, short_name, status, created_at, updated_at";

/// Provides CRUD and lifecycle operations for sequences.
pub struct SequenceRepo;

impl SequenceRepo {
    /// Insert a new active sequence under a term.
    ///
    /// The `uq_sequences_single_active` partial index rejects this while
    /// another sequence is still active.
    pub async fn create(
        pool: &PgPool,
        term_id: DbId,
        name: &str,
        short_name: &str,
    ) -> Result<Sequence, sqlx::Error> {
        let query = format!(
            "INSERT INTO sequences (term_id, name, short_name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sequence>(&query)
            .bind(term_id)
            .bind(name)
            .bind(short_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sequence>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sequences WHERE id = $1");
        sqlx::query_as::<_, Sequence>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the single active sequence, if any.
    pub async fn find_active(pool: &PgPool) -> Result<Option<Sequence>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sequences WHERE status = 'active'");
        sqlx::query_as::<_, Sequence>(&query)
            .fetch_optional(pool)
            .await
    }

    /// List every sequence, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Sequence>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sequences ORDER BY created_at DESC");
        sqlx::query_as::<_, Sequence>(&query).fetch_all(pool).await
    }

    /// List the sequences of every term under one year, oldest first.
    pub async fn list_for_year(pool: &PgPool, year_id: DbId) -> Result<Vec<Sequence>, sqlx::Error> {
        sqlx::query_as::<_, Sequence>(
            "SELECT q.id, q.term_id, q.name, q.short_name, q.status, q.created_at, q.updated_at
             FROM sequences q
             JOIN terms t ON q.term_id = t.id
             WHERE t.year_id = $1
             ORDER BY q.created_at ASC",
        )
            .bind(year_id)
            .fetch_all(pool)
            .await
    }

    /// List the sequences of one term, oldest first.
    pub async fn list_for_term(pool: &PgPool, term_id: DbId) -> Result<Vec<Sequence>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM sequences WHERE term_id = $1 ORDER BY created_at ASC");
        sqlx::query_as::<_, Sequence>(&query)
            .bind(term_id)
            .fetch_all(pool)
            .await
    }

    /// Update name and short name. Returns `None` if the row is missing.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
        short_name: &str,
    ) -> Result<Option<Sequence>, sqlx::Error> {
        let query = format!(
            "UPDATE sequences SET name = $2, short_name = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sequence>(&query)
            .bind(id)
            .bind(name)
            .bind(short_name)
            .fetch_optional(pool)
            .await
    }

    /// Close a sequence. Returns `false` if it was not active.
    pub async fn close(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sequences SET status = 'closed', updated_at = NOW()
             WHERE id = $1 AND status = 'active'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sequences WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
