use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::models::{User, UserUpdate};

/// Failure signals surfaced by the store layer.
///
/// A closed set: whatever the backing store raises natively is reduced to
/// one of these before it leaves the repository. The error classifier is
/// the only consumer; handlers never pattern-match store failures directly.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record matched (the caller-triggered "require non-empty" sentinel)
    #[error("no record matched")]
    NotFound,

    /// The requested id is not a well-formed identifier
    #[error("malformed identifier '{0}'")]
    MalformedId(String),

    /// The record failed field validation
    #[error("record failed validation: {0}")]
    Validation(String),

    /// Unique-email constraint violation
    #[error("email '{0}' is already registered")]
    DuplicateEmail(String),

    /// Anything else the store raised, opaque
    #[error("{0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Repository trait for User persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, user: User) -> StoreResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Get a user by email (case-insensitive)
    async fn get_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// List all users
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Atomically merge partial changes into the record with the given id,
    /// validating the merged state and returning it. The merge happens
    /// entirely inside the store, so concurrent updates to the same record
    /// cannot clobber each other's fields.
    async fn update(&self, id: Uuid, changes: UserUpdate) -> StoreResult<User>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn validate_record(user: &User) -> StoreResult<()> {
    user.validate()
        .map_err(|e| StoreError::Validation(e.to_string()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> StoreResult<User> {
        validate_record(&user)?;

        let mut users = self.users.write().await;

        let email_exists = users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email));

        if email_exists {
            return Err(StoreError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        let user = users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned();
        Ok(user)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();

        // Oldest first, stable listing order
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(result)
    }

    async fn update(&self, id: Uuid, changes: UserUpdate) -> StoreResult<User> {
        let mut users = self.users.write().await;

        let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;

        // Merge and validate under the write lock; a rejected merge leaves
        // the stored record untouched.
        let mut updated = user.clone();
        updated.apply(changes);
        validate_record(&updated)?;

        *user = updated.clone();

        tracing::info!(user_id = %id, "Updated user");
        Ok(updated)
    }
}
