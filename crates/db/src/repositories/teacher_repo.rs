//! Repository for teachers: `accounts` rows composed with
//! `teacher_profiles` rows.

use sqlx::PgPool;

use scholaris_core::roles::ROLE_TEACHER;
use scholaris_core::types::DbId;

use crate::models::teacher::{Teacher, TeacherBrief, UpdateTeacher};

/// Joined column list; `id` is the profile id.
const COLUMNS: &str = "tp.id, tp.account_id, a.name, a.email, a.phone, a.gender, \
                       a.date_of_birth, a.address, tp.department_id, tp.is_hod, tp.is_class_master";

/// Provides CRUD operations for teachers.
pub struct TeacherRepo;

impl TeacherRepo {
    /// Insert the account and profile rows for a new teacher in one
    /// transaction, returning the joined shape.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        department_id: DbId,
        name: &str,
        email: &str,
        phone: &str,
        gender: &str,
        date_of_birth: Option<chrono::NaiveDate>,
        address: Option<&str>,
        password_hash: &str,
    ) -> Result<Teacher, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (account_id,): (DbId,) = sqlx::query_as(
            "INSERT INTO accounts (name, email, phone, gender, date_of_birth, address, password_hash, role)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(gender)
        .bind(date_of_birth)
        .bind(address)
        .bind(password_hash)
        .bind(ROLE_TEACHER)
        .fetch_one(&mut *tx)
        .await?;

        let (profile_id,): (DbId,) = sqlx::query_as(
            "INSERT INTO teacher_profiles (account_id, department_id)
             VALUES ($1, $2)
             RETURNING id",
        )
        .bind(account_id)
        .bind(department_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        // The profile was just inserted, so the join row must exist.
        Self::find_by_id(pool, profile_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a teacher by profile ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teacher_profiles tp
             JOIN accounts a ON tp.account_id = a.id
             WHERE tp.id = $1"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a teacher by their account ID (e.g. from a JWT subject).
    pub async fn find_by_account_id(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teacher_profiles tp
             JOIN accounts a ON tp.account_id = a.id
             WHERE tp.account_id = $1"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// List every teacher, ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Teacher>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teacher_profiles tp
             JOIN accounts a ON tp.account_id = a.id
             ORDER BY a.name ASC"
        );
        sqlx::query_as::<_, Teacher>(&query).fetch_all(pool).await
    }

    /// List the teachers of one department, ordered by name.
    pub async fn list_for_department(
        pool: &PgPool,
        department_id: DbId,
    ) -> Result<Vec<Teacher>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teacher_profiles tp
             JOIN accounts a ON tp.account_id = a.id
             WHERE tp.department_id = $1
             ORDER BY a.name ASC"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(department_id)
            .fetch_all(pool)
            .await
    }

    /// List the distinct teachers holding at least one period in a class.
    pub async fn list_for_class(pool: &PgPool, class_id: DbId) -> Result<Vec<Teacher>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT {COLUMNS} FROM teacher_profiles tp
             JOIN accounts a ON tp.account_id = a.id
             JOIN periods p ON p.teacher_id = tp.id
             WHERE p.class_id = $1
             ORDER BY a.name ASC"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(class_id)
            .fetch_all(pool)
            .await
    }

    /// Whether a teacher with this name already exists in the department.
    pub async fn name_exists_in_department(
        pool: &PgPool,
        department_id: DbId,
        name: &str,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM teacher_profiles tp
             JOIN accounts a ON tp.account_id = a.id
             WHERE tp.department_id = $1 AND a.name = $2)",
        )
        .bind(department_id)
        .bind(name)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Compact listing used by class-master pickers.
    pub async fn list_brief(pool: &PgPool) -> Result<Vec<TeacherBrief>, sqlx::Error> {
        sqlx::query_as::<_, TeacherBrief>(
            "SELECT tp.id, a.name, tp.is_class_master
             FROM teacher_profiles tp
             JOIN accounts a ON tp.account_id = a.id
             ORDER BY a.name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a teacher's account fields. Only non-`None` values apply.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeacher,
    ) -> Result<Option<Teacher>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE accounts SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                gender = COALESCE($5, gender),
                date_of_birth = COALESCE($6, date_of_birth),
                address = COALESCE($7, address),
                updated_at = NOW()
             WHERE id = (SELECT account_id FROM teacher_profiles WHERE id = $1)",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.gender)
        .bind(input.date_of_birth)
        .bind(&input.address)
        .execute(pool)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    /// Move a teacher to another department.
    pub async fn set_department(
        pool: &PgPool,
        id: DbId,
        department_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE teacher_profiles SET department_id = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(department_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a teacher entirely: removing the account cascades to the
    /// profile, and the profile's FKs release any mastered class.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM accounts WHERE id = (SELECT account_id FROM teacher_profiles WHERE id = $1)",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
