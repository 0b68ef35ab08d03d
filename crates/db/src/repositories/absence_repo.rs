//! Repository for student and teacher absences.

use chrono::NaiveDate;
use sqlx::PgPool;

use scholaris_core::types::DbId;

use crate::models::absence::{AbsenceWrite, StudentAbsence, TeacherAbsence};

const STUDENT_COLUMNS: &str = "id, student_id, sequence_id, date, created_at";
const TEACHER_COLUMNS: &str = "id, teacher_id, period_id, date, created_at";

/// Provides absence recording and listing for students and teachers.
pub struct AbsenceRepo;

impl AbsenceRepo {
    /// Apply a validated roster of absence marks and clears for one date,
    /// in one transaction.
    ///
    /// Marks are idempotent against `uq_student_absences_student_date`;
    /// clears are no-ops when nothing was recorded.
    pub async fn apply_student_roster(
        pool: &PgPool,
        sequence_id: DbId,
        date: NaiveDate,
        writes: &[AbsenceWrite],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for write in writes {
            match *write {
                AbsenceWrite::Mark { student_id } => {
                    sqlx::query(
                        "INSERT INTO student_absences (student_id, sequence_id, date)
                         VALUES ($1, $2, $3)
                         ON CONFLICT (student_id, date) DO NOTHING",
                    )
                    .bind(student_id)
                    .bind(sequence_id)
                    .bind(date)
                    .execute(&mut *tx)
                    .await?;
                }
                AbsenceWrite::Clear { student_id } => {
                    sqlx::query("DELETE FROM student_absences WHERE student_id = $1 AND date = $2")
                        .bind(student_id)
                        .bind(date)
                        .execute(&mut *tx)
                        .await?;
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// A student's absences within a sequence, newest first.
    pub async fn list_for_student_sequence(
        pool: &PgPool,
        student_id: DbId,
        sequence_id: DbId,
    ) -> Result<Vec<StudentAbsence>, sqlx::Error> {
        let query = format!(
            "SELECT {STUDENT_COLUMNS} FROM student_absences
             WHERE student_id = $1 AND sequence_id = $2
             ORDER BY date DESC"
        );
        sqlx::query_as::<_, StudentAbsence>(&query)
            .bind(student_id)
            .bind(sequence_id)
            .fetch_all(pool)
            .await
    }

    /// A student's absences across every sequence of a term, newest first.
    pub async fn list_for_student_term(
        pool: &PgPool,
        student_id: DbId,
        term_id: DbId,
    ) -> Result<Vec<StudentAbsence>, sqlx::Error> {
        sqlx::query_as::<_, StudentAbsence>(
            "SELECT sa.id, sa.student_id, sa.sequence_id, sa.date, sa.created_at
             FROM student_absences sa
             JOIN sequences q ON sa.sequence_id = q.id
             WHERE sa.student_id = $1 AND q.term_id = $2
             ORDER BY sa.date DESC",
        )
        .bind(student_id)
        .bind(term_id)
        .fetch_all(pool)
        .await
    }

    /// How many days a student was absent within a sequence.
    pub async fn count_for_student_sequence(
        pool: &PgPool,
        student_id: DbId,
        sequence_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM student_absences WHERE student_id = $1 AND sequence_id = $2",
        )
        .bind(student_id)
        .bind(sequence_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// How many days a teacher has been recorded absent.
    pub async fn count_for_teacher(pool: &PgPool, teacher_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM teacher_absences WHERE teacher_id = $1")
                .bind(teacher_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// The set of students of a class recorded absent on a date.
    pub async fn absent_student_ids_on(
        pool: &PgPool,
        class_id: DbId,
        date: NaiveDate,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT sa.student_id FROM student_absences sa
             JOIN students s ON sa.student_id = s.id
             WHERE s.class_id = $1 AND sa.date = $2",
        )
        .bind(class_id)
        .bind(date)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Record a teacher absent on a date. Idempotent.
    pub async fn mark_teacher(
        pool: &PgPool,
        teacher_id: DbId,
        period_id: Option<DbId>,
        date: NaiveDate,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO teacher_absences (teacher_id, period_id, date)
             VALUES ($1, $2, $3)
             ON CONFLICT (teacher_id, date) DO NOTHING",
        )
        .bind(teacher_id)
        .bind(period_id)
        .bind(date)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Clear a teacher's absence on a date. Returns `true` if one existed.
    pub async fn clear_teacher(
        pool: &PgPool,
        teacher_id: DbId,
        date: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teacher_absences WHERE teacher_id = $1 AND date = $2")
            .bind(teacher_id)
            .bind(date)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// A teacher's absences, newest first.
    pub async fn list_for_teacher(
        pool: &PgPool,
        teacher_id: DbId,
    ) -> Result<Vec<TeacherAbsence>, sqlx::Error> {
        let query = format!(
            "SELECT {TEACHER_COLUMNS} FROM teacher_absences
             WHERE teacher_id = $1
             ORDER BY date DESC"
        );
        sqlx::query_as::<_, TeacherAbsence>(&query)
            .bind(teacher_id)
            .fetch_all(pool)
            .await
    }
}
