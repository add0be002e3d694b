use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{ListUsersQuery, PaginatedUsers, PublicUser, UserResponse},
    services,
};
use crate::{
    auth::extractors::AuthUser,
    error::{AppError, AppResult},
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(current_user))
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user))
}

#[instrument(skip(state))]
pub async fn current_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Could not validate credentials".into()))?;
    Ok(Json(UserResponse { user: user.into() }))
}

#[instrument(skip(state, id))]
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<UserResponse>> {
    let Path(id) = id?;
    let user = services::get_user(state.users.as_ref(), id).await?;
    Ok(Json(UserResponse { user: user.into() }))
}

#[instrument(skip(state, query))]
pub async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> AppResult<Json<PaginatedUsers>> {
    let Query(q) = query?;
    let page = services::list_users(state.users.as_ref(), q.cursor, q.limit).await?;
    Ok(Json(PaginatedUsers {
        users: page.users.into_iter().map(PublicUser::from).collect(),
        total_count: page.total_count,
        next_cursor: page.next_cursor,
    }))
}
