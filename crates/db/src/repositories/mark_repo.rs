//! Repository for the `marks` table.

use sqlx::PgPool;

use scholaris_core::types::DbId;

use crate::models::mark::{MarkDetail, MarkWrite, ReportMark, RosterEntry};

/// Provides mark entry, listing, and report queries.
pub struct MarkRepo;

impl MarkRepo {
    /// Apply a validated batch of upserts and deletes in one transaction.
    ///
    /// Upserts land against `uq_marks_student_subject_sequence`, so
    /// re-submitting a roster overwrites previous scores. Any failure
    /// rolls the whole batch back.
    pub async fn apply_batch(
        pool: &PgPool,
        subject_id: DbId,
        sequence_id: DbId,
        teacher_id: DbId,
        competency: Option<&str>,
        writes: &[MarkWrite],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for write in writes {
            match write {
                MarkWrite::Upsert {
                    student_id,
                    score,
                    grade,
                    remark,
                } => {
                    sqlx::query(
                        "INSERT INTO marks (student_id, subject_id, sequence_id, teacher_id,
                                            score, grade, remark, competency)
                         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                         ON CONFLICT (student_id, subject_id, sequence_id) DO UPDATE SET
                             score = EXCLUDED.score,
                             grade = EXCLUDED.grade,
                             remark = EXCLUDED.remark,
                             competency = EXCLUDED.competency,
                             teacher_id = EXCLUDED.teacher_id,
                             updated_at = NOW()",
                    )
                    .bind(student_id)
                    .bind(subject_id)
                    .bind(sequence_id)
                    .bind(teacher_id)
                    .bind(score)
                    .bind(grade)
                    .bind(remark)
                    .bind(competency)
                    .execute(&mut *tx)
                    .await?;
                }
                MarkWrite::Delete { student_id } => {
                    sqlx::query(
                        "DELETE FROM marks
                         WHERE student_id = $1 AND subject_id = $2 AND sequence_id = $3",
                    )
                    .bind(student_id)
                    .bind(subject_id)
                    .bind(sequence_id)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// The mark-entry roster: every student of the class plus any score
    /// already recorded for the subject and sequence.
    pub async fn roster_for_class(
        pool: &PgPool,
        class_id: DbId,
        subject_id: DbId,
        sequence_id: DbId,
    ) -> Result<Vec<RosterEntry>, sqlx::Error> {
        sqlx::query_as::<_, RosterEntry>(
            "SELECT s.name, s.student_id, s.gender, m.score, m.competency
             FROM students s
             LEFT JOIN marks m ON m.student_id = s.id
                  AND m.subject_id = $2 AND m.sequence_id = $3
             WHERE s.class_id = $1
             ORDER BY s.name ASC",
        )
        .bind(class_id)
        .bind(subject_id)
        .bind(sequence_id)
        .fetch_all(pool)
        .await
    }

    /// One student's marks for a sequence, joined with subject details.
    pub async fn list_for_student_sequence(
        pool: &PgPool,
        student_id: DbId,
        sequence_id: DbId,
    ) -> Result<Vec<MarkDetail>, sqlx::Error> {
        sqlx::query_as::<_, MarkDetail>(
            "SELECT m.id, s.name AS subject_name, s.coefficient, q.name AS sequence_name,
                    m.score, m.grade, m.remark, m.competency
             FROM marks m
             JOIN subjects s ON m.subject_id = s.id
             JOIN sequences q ON m.sequence_id = q.id
             WHERE m.student_id = $1 AND m.sequence_id = $2
             ORDER BY s.name ASC",
        )
        .bind(student_id)
        .bind(sequence_id)
        .fetch_all(pool)
        .await
    }

    /// Every mark of a class for one subject and sequence, joined with the
    /// student. Feeds the pass/fail report.
    pub async fn report_marks(
        pool: &PgPool,
        class_id: DbId,
        subject_id: DbId,
        sequence_id: DbId,
    ) -> Result<Vec<ReportMark>, sqlx::Error> {
        sqlx::query_as::<_, ReportMark>(
            "SELECT m.id, s.name, s.student_id, s.gender, m.score
             FROM marks m
             JOIN students s ON m.student_id = s.id
             WHERE s.class_id = $1 AND m.subject_id = $2 AND m.sequence_id = $3
             ORDER BY m.score DESC, s.name ASC",
        )
        .bind(class_id)
        .bind(subject_id)
        .bind(sequence_id)
        .fetch_all(pool)
        .await
    }

    /// Enrolment gender split for a class. Denominators for the report.
    pub async fn class_enrolment(
        pool: &PgPool,
        class_id: DbId,
    ) -> Result<(i64, i64, i64), sqlx::Error> {
        let (total, males, females): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*),
                    COUNT(*) FILTER (WHERE gender = 'Male'),
                    COUNT(*) FILTER (WHERE gender = 'Female')
             FROM students WHERE class_id = $1",
        )
        .bind(class_id)
        .fetch_one(pool)
        .await?;
        Ok((total, males, females))
    }
}
