//! First-run provisioning.
//!
//! A fresh database has no accounts, so nobody could log in to create one.
//! On startup, if no superuser exists and the `SUPERUSER_*` environment
//! variables are set, one is created.

use scholaris_core::roles::ROLE_SUPERUSER;
use scholaris_db::repositories::AccountRepo;
use scholaris_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Create the initial superuser account if none exists.
///
/// Reads `SUPERUSER_NAME`, `SUPERUSER_EMAIL`, `SUPERUSER_PHONE`, and
/// `SUPERUSER_PASSWORD`; does nothing when they are absent or a superuser
/// is already present.
pub async fn ensure_superuser(pool: &DbPool) -> AppResult<()> {
    if AccountRepo::count_by_role(pool, ROLE_SUPERUSER).await? > 0 {
        return Ok(());
    }

    let (Ok(name), Ok(email), Ok(phone), Ok(password)) = (
        std::env::var("SUPERUSER_NAME"),
        std::env::var("SUPERUSER_EMAIL"),
        std::env::var("SUPERUSER_PHONE"),
        std::env::var("SUPERUSER_PASSWORD"),
    ) else {
        tracing::warn!("No superuser account exists and SUPERUSER_* env vars are not set");
        return Ok(());
    };

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let account = AccountRepo::create(
        pool,
        &name,
        &email,
        &phone,
        "Male",
        &password_hash,
        ROLE_SUPERUSER,
    )
    .await?;
    tracing::info!(account_id = account.id, "Bootstrap superuser created");
    Ok(())
}
