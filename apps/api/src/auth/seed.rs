use anyhow::Result;
use tracing::info;

use crate::auth::password::hash_password;
use crate::config::Config;
use crate::models::user::{NewUser, Role};
use crate::store::Store;

/// Creates the configured administrator if no user with that name exists yet.
/// An existing account is left untouched, including its password and role.
pub async fn seed_admin(store: &dyn Store, config: &Config) -> Result<()> {
    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) else {
        info!("ADMIN_USERNAME/ADMIN_PASSWORD not set; skipping admin seeding");
        return Ok(());
    };

    if store.find_user_by_username(username).await?.is_some() {
        info!("Admin account '{username}' already present");
        return Ok(());
    }

    let digest = hash_password(password);
    let user = store
        .insert_user(NewUser {
            username: username.clone(),
            password_hash: digest.hash,
            password_salt: digest.salt,
            role: Role::Admin,
        })
        .await?;
    info!("Seeded admin account '{}' (id {})", user.username, user.id);
    Ok(())
}
