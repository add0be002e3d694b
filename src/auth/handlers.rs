use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RegisterRequest},
        services,
    },
    error::{AppError, AppResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let Json(mut payload) = payload?;
    payload.validate().map_err(AppError::Validation)?;

    let (token, user) = services::register(
        state.users.as_ref(),
        &state.keys,
        &payload.email,
        &payload.password,
        &payload.name,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::bearer(token, user.into())),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<AuthResponse>> {
    let Json(mut payload) = payload?;
    payload.validate().map_err(AppError::Validation)?;

    let (token, user) = services::login(
        state.users.as_ref(),
        &state.keys,
        &payload.email,
        &payload.password,
    )
    .await?;

    Ok(Json(AuthResponse::bearer(token, user.into())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::extractors::AuthUser, users::handlers::current_user};
    use axum::response::IntoResponse;

    async fn read<T: serde::de::DeserializeOwned>(res: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn register_body(email: &str, password: &str, name: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }

    #[tokio::test]
    async fn register_then_login_end_to_end() {
        let state = AppState::fake();

        let res = register(
            State(state.clone()),
            Ok(Json(register_body("a@x.com", "secret123", "A"))),
        )
        .await
        .into_response();
        assert_eq!(res.status(), StatusCode::CREATED);
        let registered: AuthResponse = read(res).await;
        assert!(!registered.access_token.is_empty());
        assert_eq!(registered.token_type, "bearer");
        assert_eq!(registered.user.email, "a@x.com");

        let res = login(
            State(state.clone()),
            Ok(Json(LoginRequest {
                email: "a@x.com".into(),
                password: "secret123".into(),
            })),
        )
        .await
        .into_response();
        assert_eq!(res.status(), StatusCode::OK);
        let logged_in: AuthResponse = read(res).await;
        assert_ne!(logged_in.access_token, registered.access_token);
        assert_eq!(logged_in.user.id, registered.user.id);

        let user_id = state.keys.verify(&logged_in.access_token).unwrap();
        let Json(me) = current_user(State(state), AuthUser(user_id)).await.unwrap();
        assert_eq!(me.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn duplicate_registration_is_conflict() {
        let state = AppState::fake();
        let first = register(
            State(state.clone()),
            Ok(Json(register_body("a@x.com", "secret123", "A"))),
        )
        .await
        .into_response();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = register(
            State(state),
            Ok(Json(register_body("A@X.com", "secret456", "B"))),
        )
        .await
        .into_response();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let body: serde_json::Value = read(second).await;
        assert_eq!(body["detail"], "Email already exists");
    }

    #[tokio::test]
    async fn invalid_email_is_unprocessable() {
        let state = AppState::fake();
        let res = register(
            State(state),
            Ok(Json(register_body("not-an-email", "secret123", "A"))),
        )
        .await
        .into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = read(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["errors"][0]["field"], "body → email");
    }

    #[tokio::test]
    async fn login_status_codes() {
        let state = AppState::fake();
        let res = login(
            State(state.clone()),
            Ok(Json(LoginRequest {
                email: "ghost@x.com".into(),
                password: "secret123".into(),
            })),
        )
        .await
        .into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let created = register(
            State(state.clone()),
            Ok(Json(register_body("a@x.com", "secret123", "A"))),
        )
        .await
        .into_response();
        assert_eq!(created.status(), StatusCode::CREATED);
        let res = login(
            State(state),
            Ok(Json(LoginRequest {
                email: "a@x.com".into(),
                password: "wrong-password".into(),
            })),
        )
        .await
        .into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
