//! Repository for the `students` table.

use sqlx::PgPool;

use scholaris_core::types::DbId;

use crate::models::student::{CreateStudent, SequenceScoreTotals, Student};

const COLUMNS: &str = "id, class_id, name, student_id, gender, date_of_birth, place_of_birth, \
                       address, parent_name, parent_phone, is_prefect, is_repeater, \
                       created_at, updated_at";

/// Provides CRUD operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student with an already-generated external identifier.
    pub async fn create(
        pool: &PgPool,
        class_id: DbId,
        student_id: &str,
        input: &CreateStudent,
    ) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (class_id, name, student_id, gender, date_of_birth,
                                   place_of_birth, address, parent_name, parent_phone, is_repeater)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(class_id)
            .bind(&input.name)
            .bind(student_id)
            .bind(&input.gender)
            .bind(input.date_of_birth)
            .bind(&input.place_of_birth)
            .bind(&input.address)
            .bind(&input.parent_name)
            .bind(&input.parent_phone)
            .bind(input.is_repeater)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a student by external identifier (the one used in URLs).
    pub async fn find_by_student_id(
        pool: &PgPool,
        student_id: &str,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE student_id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(student_id)
            .fetch_optional(pool)
            .await
    }

    /// List the students of one class, ordered by name.
    pub async fn list_for_class(pool: &PgPool, class_id: DbId) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE class_id = $1 ORDER BY name ASC");
        sqlx::query_as::<_, Student>(&query)
            .bind(class_id)
            .fetch_all(pool)
            .await
    }

    /// List every student enrolled in a year's classes, ordered by name.
    pub async fn list_for_year(pool: &PgPool, year_id: DbId) -> Result<Vec<Student>, sqlx::Error> {
        sqlx::query_as::<_, Student>(
            "SELECT s.id, s.class_id, s.name, s.student_id, s.gender, s.date_of_birth,
                    s.place_of_birth, s.address, s.parent_name, s.parent_phone,
                    s.is_prefect, s.is_repeater, s.created_at, s.updated_at
             FROM students s
             JOIN school_classes c ON s.class_id = c.id
             WHERE c.year_id = $1
             ORDER BY s.name ASC",
        )
            .bind(year_id)
            .fetch_all(pool)
            .await
    }

    /// Whether a student with this name is already enrolled in the class.
    pub async fn name_exists_in_class(
        pool: &PgPool,
        class_id: DbId,
        name: &str,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM students WHERE class_id = $1 AND name = $2)")
                .bind(class_id)
                .bind(name)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Move a student to another class.
    pub async fn set_class(pool: &PgPool, id: DbId, class_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE students SET class_id = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(class_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Collect every external identifier starting with a prefix. Feeds the
    /// identifier generator so it can avoid collisions up front.
    pub async fn list_ids_with_prefix(
        pool: &PgPool,
        prefix: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT student_id FROM students WHERE student_id LIKE $1 || '%'")
                .bind(prefix)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(sid,)| sid).collect())
    }

    /// Update a student's descriptive fields (the identifier never changes).
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET name = $2, gender = $3, date_of_birth = $4,
                    place_of_birth = $5, address = $6, parent_name = $7, parent_phone = $8,
                    is_repeater = $9, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.gender)
            .bind(input.date_of_birth)
            .bind(&input.place_of_birth)
            .bind(&input.address)
            .bind(&input.parent_name)
            .bind(&input.parent_phone)
            .bind(input.is_repeater)
            .fetch_optional(pool)
            .await
    }

    /// Per-sequence weighted score totals for one student within a term.
    /// The averages themselves are computed in `scholaris_core::stats`.
    pub async fn sequence_totals_for_term(
        pool: &PgPool,
        student_id: DbId,
        term_id: DbId,
    ) -> Result<Vec<SequenceScoreTotals>, sqlx::Error> {
        sqlx::query_as::<_, SequenceScoreTotals>(
            "SELECT q.id AS sequence_id, q.short_name,
                    COALESCE(SUM(m.score * s.coefficient), 0) AS weighted_score,
                    COALESCE(SUM(s.coefficient), 0) AS total_coefficient
             FROM sequences q
             LEFT JOIN marks m ON m.sequence_id = q.id AND m.student_id = $1
             LEFT JOIN subjects s ON m.subject_id = s.id
             WHERE q.term_id = $2
             GROUP BY q.id
             ORDER BY q.created_at ASC",
        )
        .bind(student_id)
        .bind(term_id)
        .fetch_all(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
