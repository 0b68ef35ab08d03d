//! Repository for the `accounts` table.

use sqlx::PgPool;

use scholaris_core::types::DbId;

use crate::models::account::Account;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, phone, email, name, password_hash, role, gender, \
                       date_of_birth, address, is_active, created_at, updated_at";

/// Provides CRUD operations for accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account with an already-hashed password.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        name: &str,
        email: &str,
        phone: &str,
        gender: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<Account, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (name, email, phone, gender, password_hash, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(name)
            .bind(email)
            .bind(phone)
            .bind(gender)
            .bind(password_hash)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Find an account by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by phone or email. Login accepts either.
    pub async fn find_by_identifier(
        pool: &PgPool,
        identifier: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE phone = $1 OR email = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(identifier)
            .fetch_optional(pool)
            .await
    }

    /// List all accounts with the given role, newest first.
    pub async fn list_by_role(pool: &PgPool, role: &str) -> Result<Vec<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE role = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Account>(&query)
            .bind(role)
            .fetch_all(pool)
            .await
    }

    /// Update profile fields. Only non-`None` values are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        gender: Option<&str>,
        date_of_birth: Option<chrono::NaiveDate>,
        address: Option<&str>,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!(
            "UPDATE accounts SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                gender = COALESCE($5, gender),
                date_of_birth = COALESCE($6, date_of_birth),
                address = COALESCE($7, address),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .bind(name)
            .bind(email)
            .bind(phone)
            .bind(gender)
            .bind(date_of_birth)
            .bind(address)
            .fetch_optional(pool)
            .await
    }

    /// Delete an account. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Update an account's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE accounts SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count accounts with the given role.
    pub async fn count_by_role(pool: &PgPool, role: &str) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts WHERE role = $1")
            .bind(role)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
