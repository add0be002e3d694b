use tracing::{info, warn};
use uuid::Uuid;

use super::{
    jwt::JwtKeys,
    password::{hash_password, verify_password},
};
use crate::{
    error::{AppError, AppResult},
    users::{
        repo::{StoreError, UserStore},
        repo_types::{NewUser, User},
    },
};

/// Creates the account and mints its first token.
///
/// The token is signed for the pre-generated id before the insert, so a
/// failed insert leaves neither a user row nor a usable token behind.
pub async fn register(
    store: &dyn UserStore,
    keys: &JwtKeys,
    email: &str,
    password: &str,
    name: &str,
) -> AppResult<(String, User)> {
    if store.find_by_email(email).await?.is_some() {
        warn!("email already registered");
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let password_hash = hash_password(password)?;
    let id = Uuid::new_v4();
    let token = keys.issue(id)?;

    let user = store
        .insert(NewUser {
            id,
            email: email.to_string(),
            password_hash,
            name: name.to_string(),
        })
        .await
        .map_err(|e| match e {
            StoreError::Duplicate => AppError::Conflict("Email already exists".into()),
            other => AppError::Storage(other),
        })?;

    info!(user_id = %user.id, "user registered");
    Ok((token, user))
}

pub async fn login(
    store: &dyn UserStore,
    keys: &JwtKeys,
    email: &str,
    password: &str,
) -> AppResult<(String, User)> {
    let user = store
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound("Email does not exist".into()))?;

    if !verify_password(password, &user.password_hash) {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized("Invalid Credentials".into()));
    }

    let token = keys.issue(user.id)?;
    info!(user_id = %user.id, "user logged in");
    Ok((token, user))
}
