//! Repository for the `periods` table (timetable slots).

use sqlx::PgPool;

use scholaris_core::types::DbId;

use crate::models::period::{CreatePeriod, Period, PeriodDetail};

const COLUMNS: &str = "id, subject_id, teacher_id, class_id, day, start_time, end_time, \
                       number_of_periods, created_at, updated_at";

/// Weekday ordering for timetable listings.
const DAY_ORDER: &str = "CASE day
    WHEN 'Monday' THEN 1 WHEN 'Tuesday' THEN 2 WHEN 'Wednesday' THEN 3
    WHEN 'Thursday' THEN 4 WHEN 'Friday' THEN 5 WHEN 'Saturday' THEN 6
    ELSE 7 END";

/// Provides CRUD operations for timetable periods.
pub struct PeriodRepo;

impl PeriodRepo {
    pub async fn create(
        pool: &PgPool,
        class_id: DbId,
        input: &CreatePeriod,
    ) -> Result<Period, sqlx::Error> {
        let query = format!(
            "INSERT INTO periods (subject_id, teacher_id, class_id, day, start_time, end_time, number_of_periods)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Period>(&query)
            .bind(input.subject_id)
            .bind(input.teacher_id)
            .bind(class_id)
            .bind(&input.day)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.number_of_periods)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Period>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM periods WHERE id = $1");
        sqlx::query_as::<_, Period>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a class's periods in weekday then start-time order.
    pub async fn list_for_class(
        pool: &PgPool,
        class_id: DbId,
    ) -> Result<Vec<PeriodDetail>, sqlx::Error> {
        let query = format!(
            "SELECT p.id, s.name AS subject_name, c.name AS class_name, p.day,
                    p.start_time, p.end_time, p.number_of_periods
             FROM periods p
             JOIN subjects s ON p.subject_id = s.id
             JOIN school_classes c ON p.class_id = c.id
             WHERE p.class_id = $1
             ORDER BY {DAY_ORDER}, p.start_time ASC"
        );
        sqlx::query_as::<_, PeriodDetail>(&query)
            .bind(class_id)
            .fetch_all(pool)
            .await
    }

    /// List a teacher's periods across all classes in timetable order.
    pub async fn list_for_teacher(
        pool: &PgPool,
        teacher_id: DbId,
    ) -> Result<Vec<PeriodDetail>, sqlx::Error> {
        let query = format!(
            "SELECT p.id, s.name AS subject_name, c.name AS class_name, p.day,
                    p.start_time, p.end_time, p.number_of_periods
             FROM periods p
             JOIN subjects s ON p.subject_id = s.id
             JOIN school_classes c ON p.class_id = c.id
             WHERE p.teacher_id = $1
             ORDER BY {DAY_ORDER}, p.start_time ASC"
        );
        sqlx::query_as::<_, PeriodDetail>(&query)
            .bind(teacher_id)
            .fetch_all(pool)
            .await
    }

    /// Whether the teacher holds at least one period in the class.
    /// Gate for class-master assignment.
    pub async fn teacher_has_period_in_class(
        pool: &PgPool,
        teacher_id: DbId,
        class_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM periods WHERE teacher_id = $1 AND class_id = $2)",
        )
        .bind(teacher_id)
        .bind(class_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Whether the teacher teaches the subject in the class. Gate for
    /// mark entry.
    pub async fn teacher_teaches_subject_in_class(
        pool: &PgPool,
        teacher_id: DbId,
        subject_id: DbId,
        class_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM periods
             WHERE teacher_id = $1 AND subject_id = $2 AND class_id = $3)",
        )
        .bind(teacher_id)
        .bind(subject_id)
        .bind(class_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM periods WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
