use tracing::debug;
use uuid::Uuid;

use super::{repo::UserStore, repo_types::User};
use crate::error::{AppError, AppResult};

pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total_count: i64,
    pub next_cursor: Option<Uuid>,
}

/// One page of users in ascending id order, strictly after `cursor`.
///
/// An empty page is reported as `NotFound`, including the page requested
/// with the cursor of the last user.
pub async fn list_users(
    store: &dyn UserStore,
    cursor: Option<Uuid>,
    limit: i64,
) -> AppResult<UserPage> {
    if limit > MAX_PAGE_SIZE {
        return Err(AppError::InvalidArgument(format!(
            "limit must not exceed {}",
            MAX_PAGE_SIZE
        )));
    }
    if limit < 1 {
        return Err(AppError::InvalidArgument("limit must be at least 1".into()));
    }

    let users = store.list(cursor, limit).await?;
    if users.is_empty() {
        return Err(AppError::NotFound("No users found".into()));
    }
    let total_count = store.count().await?;
    let next_cursor = users.last().map(|u| u.id);

    debug!(returned = users.len(), total_count, "user page");
    Ok(UserPage {
        users,
        total_count,
        next_cursor,
    })
}

pub async fn get_user(store: &dyn UserStore, id: Uuid) -> AppResult<User> {
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("There is no user with id: {}", id)))
}
