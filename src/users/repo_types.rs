use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String, // Argon2 PHC string
    pub name: String,
    pub user_name: Option<String>,
    pub profile_img: Option<String>,
    pub followers: i32,
    pub followings: i32,
    pub posts: i32,
    pub created_at: OffsetDateTime,
}

/// Values supplied by the service when inserting a user. The store assigns
/// the counters and `created_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
}
