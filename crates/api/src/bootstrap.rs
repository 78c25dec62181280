//! First-run setup.

use anyhow::Context;
use uuid::Uuid;
use wosmap_core::roles::Role;
use wosmap_db::models::user::CreateUser;
use wosmap_db::repositories::UserRepo;
use wosmap_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::ServerConfig;

/// Seed an admin account from configuration when no user exists yet.
///
/// Returns `true` if an account was created.
pub async fn ensure_default_admin(pool: &DbPool, config: &ServerConfig) -> anyhow::Result<bool> {
    if UserRepo::count(pool).await.context("Failed to count users")? > 0 {
        return Ok(false);
    }

    let password_hash = hash_password(&config.admin_password)
        .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {e}"))?;
    let user = UserRepo::upsert(
        pool,
        &CreateUser {
            id: Uuid::new_v4().to_string(),
            username: config.admin_username.clone(),
            password_hash,
            role: Role::Admin,
        },
    )
    .await
    .context("Failed to create default admin")?;

    tracing::warn!(
        username = %user.username,
        "Created default admin account; change its password"
    );
    Ok(true)
}
