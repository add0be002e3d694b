use std::{
    collections::BTreeMap,
    ops::Bound,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    repo::{StoreError, UserStore},
    repo_types::{NewUser, User},
};

/// `UserStore` over a `BTreeMap`, so iteration follows the same id order as
/// the database.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<BTreeMap<Uuid, User>>,
    fail_writes: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `insert` fail with a backend error.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, new: NewUser) -> Result<User, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(sqlx::Error::PoolTimedOut));
        }
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&new.id) || users.values().any(|u| u.email == new.email) {
            return Err(StoreError::Duplicate);
        }
        let user = User {
            id: new.id,
            email: new.email,
            password_hash: new.password_hash,
            name: new.name,
            user_name: None,
            profile_img: None,
            followers: 0,
            followings: 0,
            posts: 0,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self, after: Option<Uuid>, limit: i64) -> Result<Vec<User>, StoreError> {
        let users = self.users.lock().unwrap();
        let lower = match after {
            Some(cursor) => Bound::Excluded(cursor),
            None => Bound::Unbounded,
        };
        Ok(users
            .range((lower, Bound::Unbounded))
            .take(limit.max(0) as usize)
            .map(|(_, u)| u.clone())
            .collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}
