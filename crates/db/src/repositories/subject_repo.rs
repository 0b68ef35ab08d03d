//! Repository for the `subjects` table.

use sqlx::PgPool;

use scholaris_core::types::DbId;

use crate::models::subject::{CreateSubject, Subject};

const COLUMNS: &str = "id, name, short_name, coefficient, level, created_at, updated_at";

/// Provides CRUD operations for subjects.
pub struct SubjectRepo;

impl SubjectRepo {
    pub async fn create(pool: &PgPool, input: &CreateSubject) -> Result<Subject, sqlx::Error> {
        let query = format!(
            "INSERT INTO subjects (name, short_name, coefficient, level)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(&input.name)
            .bind(&input.short_name)
            .bind(input.coefficient)
            .bind(&input.level)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE id = $1");
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every subject ordered by name, then level.
    pub async fn list(pool: &PgPool) -> Result<Vec<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects ORDER BY name ASC, level ASC");
        sqlx::query_as::<_, Subject>(&query).fetch_all(pool).await
    }

    /// Replace every descriptive field. Returns `None` if the row is missing.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateSubject,
    ) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!(
            "UPDATE subjects SET name = $2, short_name = $3, coefficient = $4, level = $5,
                    updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.short_name)
            .bind(input.coefficient)
            .bind(&input.level)
            .fetch_optional(pool)
            .await
    }

    /// Delete a subject. Its periods and marks cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
