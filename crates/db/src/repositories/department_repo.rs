//! Repository for the `departments` table.

use sqlx::PgPool;

use scholaris_core::types::DbId;

use crate::models::department::{Department, DepartmentOverview};

const COLUMNS: &str = "id, name, hod_id, created_at, updated_at";

/// Provides CRUD operations for departments.
pub struct DepartmentRepo;

impl DepartmentRepo {
    pub async fn create(pool: &PgPool, name: &str) -> Result<Department, sqlx::Error> {
        let query = format!("INSERT INTO departments (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Department>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments WHERE id = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every department with its teacher head-count split by gender.
    pub async fn list_with_overview(pool: &PgPool) -> Result<Vec<DepartmentOverview>, sqlx::Error> {
        sqlx::query_as::<_, DepartmentOverview>(
            "SELECT d.id, d.name, d.hod_id,
                    COUNT(tp.id) AS teachers,
                    COUNT(tp.id) FILTER (WHERE a.gender = 'Male') AS male_teachers,
                    COUNT(tp.id) FILTER (WHERE a.gender = 'Female') AS female_teachers
             FROM departments d
             LEFT JOIN teacher_profiles tp ON tp.department_id = d.id
             LEFT JOIN accounts a ON tp.account_id = a.id
             GROUP BY d.id
             ORDER BY d.name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Rename a department. Returns `None` if the row is missing.
    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query = format!(
            "UPDATE departments SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Make a teacher head of the department, demoting the previous HOD.
    ///
    /// The teacher must already belong to the department; the caller
    /// checks that before invoking this.
    pub async fn set_hod(pool: &PgPool, id: DbId, teacher_id: DbId) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE teacher_profiles SET is_hod = FALSE, updated_at = NOW()
             WHERE id = (SELECT hod_id FROM departments WHERE id = $1) AND is_hod = TRUE",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE teacher_profiles SET is_hod = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(teacher_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE departments SET hod_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(teacher_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete a department. Teacher profiles under it cascade, which also
    /// removes those teachers from classes they mastered via SET NULL.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
