//! Repository for the `school_classes` table.

use sqlx::PgPool;

use scholaris_core::types::DbId;

use crate::models::school_class::{SchoolClass, SchoolClassOverview};

const COLUMNS: &str =
    "id, year_id, name, short_name, level, master_id, prefect_id, created_at, updated_at";

/// Provides CRUD operations for classes, plus the class-master and
/// prefect reassignment transactions.
pub struct SchoolClassRepo;

impl SchoolClassRepo {
    pub async fn create(
        pool: &PgPool,
        year_id: DbId,
        name: &str,
        short_name: &str,
        level: &str,
    ) -> Result<SchoolClass, sqlx::Error> {
        let query = format!(
            "INSERT INTO school_classes (year_id, name, short_name, level)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SchoolClass>(&query)
            .bind(year_id)
            .bind(name)
            .bind(short_name)
            .bind(level)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SchoolClass>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM school_classes WHERE id = $1");
        sqlx::query_as::<_, SchoolClass>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the classes of one year with their enrolment gender split.
    pub async fn list_with_overview(
        pool: &PgPool,
        year_id: DbId,
    ) -> Result<Vec<SchoolClassOverview>, sqlx::Error> {
        sqlx::query_as::<_, SchoolClassOverview>(
            "SELECT c.id, c.name, c.short_name, c.level,
                    COUNT(s.id) AS total,
                    COUNT(s.id) FILTER (WHERE s.gender = 'Male') AS males,
                    COUNT(s.id) FILTER (WHERE s.gender = 'Female') AS females
             FROM school_classes c
             LEFT JOIN students s ON s.class_id = c.id
             WHERE c.year_id = $1
             GROUP BY c.id
             ORDER BY c.name ASC",
        )
        .bind(year_id)
        .fetch_all(pool)
        .await
    }

    /// Update the descriptive fields. Returns `None` if the row is missing.
    pub async fn update_info(
        pool: &PgPool,
        id: DbId,
        name: &str,
        short_name: &str,
        level: &str,
    ) -> Result<Option<SchoolClass>, sqlx::Error> {
        let query = format!(
            "UPDATE school_classes SET name = $2, short_name = $3, level = $4, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SchoolClass>(&query)
            .bind(id)
            .bind(name)
            .bind(short_name)
            .bind(level)
            .fetch_optional(pool)
            .await
    }

    /// Make a teacher the class master, releasing the previous one.
    ///
    /// Clears `is_class_master` on the outgoing master (unless they still
    /// master another class) and sets it on the incoming one. The caller
    /// verifies the teacher actually teaches a period in this class.
    pub async fn assign_master(pool: &PgPool, id: DbId, teacher_id: DbId) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE teacher_profiles SET is_class_master = FALSE, updated_at = NOW()
             WHERE id = (SELECT master_id FROM school_classes WHERE id = $1)
               AND NOT EXISTS (
                   SELECT 1 FROM school_classes
                   WHERE master_id = teacher_profiles.id AND id <> $1
               )",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE teacher_profiles SET is_class_master = TRUE, updated_at = NOW() WHERE id = $1",
        )
        .bind(teacher_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE school_classes SET master_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(teacher_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Make a student the class prefect, releasing the previous one.
    ///
    /// The caller verifies the student is enrolled in this class.
    pub async fn assign_prefect(pool: &PgPool, id: DbId, student_id: DbId) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE students SET is_prefect = FALSE, updated_at = NOW()
             WHERE id = (SELECT prefect_id FROM school_classes WHERE id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE students SET is_prefect = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(student_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE school_classes SET prefect_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(student_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete a class. Students and periods under it cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM school_classes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
