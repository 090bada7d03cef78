use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Context, UserError, UserResult, classify};
use crate::models::{CreateUser, UpdateAvatar, UpdateProfile, User, UserResponse, UserUpdate};
use crate::repository::{StoreError, StoreResult, UserRepository};

fn parse_id(raw_id: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(raw_id).map_err(|_| StoreError::MalformedId(raw_id.to_string()))
}

/// Service layer for user account logic.
///
/// Pure orchestration over the repository and the hasher: every store
/// failure is classified exactly once, at this boundary, and leaves as a
/// taxonomy member.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user with password hashing
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        let password_hash = self.hash_password(&input.password)?;

        let user = User::new(
            input.name,
            input.about,
            input.avatar,
            input.email,
            password_hash,
        );

        let created = self
            .repository
            .create(user)
            .await
            .map_err(|e| classify(e, Context::Create))?;

        Ok(created.into())
    }

    /// Get a user by its raw (unparsed) identifier
    pub async fn get_user(&self, raw_id: &str) -> UserResult<UserResponse> {
        let user = self
            .find_by_id(raw_id)
            .await
            .map_err(|e| classify(e, Context::LookupById))?;

        Ok(user.into())
    }

    /// List all users
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list().await.map_err(UserError::server)?;

        Ok(users.into_iter().map(|u| u.into()).collect())
    }

    /// Verify user credentials (for login).
    ///
    /// A missing record and a wrong password raise the same "no match"
    /// sentinel, so both surface as the same 401.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> UserResult<UserResponse> {
        let outcome = async {
            let user = self
                .repository
                .get_by_email(email)
                .await?
                .ok_or(StoreError::NotFound)?;

            if !self.verify_password(password, &user.password_hash)? {
                return Err(StoreError::NotFound);
            }

            Ok(user)
        }
        .await;

        let user = outcome.map_err(|e| classify(e, Context::Login))?;
        Ok(user.into())
    }

    /// Update the profile (name, about) of the given user
    pub async fn update_profile(
        &self,
        raw_id: &str,
        input: UpdateProfile,
    ) -> UserResult<UserResponse> {
        self.apply_update(raw_id, input.into()).await
    }

    /// Update the avatar of the given user
    pub async fn update_avatar(
        &self,
        raw_id: &str,
        input: UpdateAvatar,
    ) -> UserResult<UserResponse> {
        self.apply_update(raw_id, input.into()).await
    }

    /// Hand partial changes to the store, which merges them atomically
    async fn apply_update(&self, raw_id: &str, changes: UserUpdate) -> UserResult<UserResponse> {
        let outcome = async {
            let id = parse_id(raw_id)?;
            self.repository.update(id, changes).await
        }
        .await;

        let updated = outcome.map_err(|e| classify(e, Context::Update))?;
        Ok(updated.into())
    }

    /// Parse the identifier and demand a non-empty lookup result
    async fn find_by_id(&self, raw_id: &str) -> StoreResult<User> {
        let id = parse_id(raw_id)?;

        self.repository
            .get_by_id(id)
            .await?
            .ok_or(StoreError::NotFound)
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(UserError::server)
    }

    fn verify_password(&self, password: &str, hash: &str) -> StoreResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::new())
    }

    fn create_input(email: &str, password: &str) -> CreateUser {
        CreateUser {
            name: Some("Test User".to_string()),
            about: None,
            avatar: None,
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_created_password_is_hashed_and_verifiable() {
        let service = service();
        let created = service
            .create_user(create_input("a@b.com", "secret1"))
            .await
            .unwrap();

        // The stored hash verifies against the plaintext and never equals it
        let verified = service.verify_credentials("a@b.com", "secret1").await.unwrap();
        assert_eq!(verified.id, created.id);

        let repo_user = service.repository.get_by_email("a@b.com").await.unwrap().unwrap();
        assert_ne!(repo_user.password_hash, "secret1");
    }

    #[tokio::test]
    async fn test_wrong_password_is_authorisation_error() {
        let service = service();
        service
            .create_user(create_input("a@b.com", "secret1"))
            .await
            .unwrap();

        let err = service
            .verify_credentials("a@b.com", "wrong")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            UserError::Authorisation("Wrong email or password".to_string())
        );
    }

    #[tokio::test]
    async fn test_unknown_email_is_authorisation_error_never_server() {
        let service = service();

        let err = service
            .verify_credentials("ghost@b.com", "whatever")
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Authorisation(_)));
    }

    #[tokio::test]
    async fn test_get_user_distinguishes_missing_from_malformed() {
        let service = service();

        let err = service.get_user(&Uuid::now_v7().to_string()).await.unwrap_err();
        assert_eq!(err, UserError::NotFound("User not found".to_string()));

        let err = service.get_user("definitely-not-a-uuid").await.unwrap_err();
        assert_eq!(err, UserError::Cast("Wrong user Id".to_string()));
    }

    #[tokio::test]
    async fn test_update_profile() {
        let service = service();
        let created = service
            .create_user(create_input("a@b.com", "secret1"))
            .await
            .unwrap();

        let updated = service
            .update_profile(
                &created.id.to_string(),
                UpdateProfile {
                    name: Some("Renamed".to_string()),
                    about: Some("New bio".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.about, "New bio");
    }

    #[tokio::test]
    async fn test_out_of_bounds_update_is_rejected_and_leaves_record_unchanged() {
        let service = service();
        let created = service
            .create_user(create_input("a@b.com", "secret1"))
            .await
            .unwrap();

        let err = service
            .update_profile(
                &created.id.to_string(),
                UpdateProfile {
                    name: Some("x".to_string()),
                    about: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, UserError::Validation("Validation error".to_string()));

        let unchanged = service.get_user(&created.id.to_string()).await.unwrap();
        assert_eq!(unchanged.name, "Test User");
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let service = service();

        let err = service
            .update_avatar(
                &Uuid::now_v7().to_string(),
                UpdateAvatar {
                    avatar: "https://example.com/a.png".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, UserError::NotFound("User not found".to_string()));
    }

    #[tokio::test]
    async fn test_update_avatar_is_idempotent() {
        let service = service();
        let created = service
            .create_user(create_input("a@b.com", "secret1"))
            .await
            .unwrap();

        let input = UpdateAvatar {
            avatar: "https://example.com/me.png".to_string(),
        };

        let first = service
            .update_avatar(&created.id.to_string(), input.clone())
            .await
            .unwrap();
        let second = service
            .update_avatar(&created.id.to_string(), input)
            .await
            .unwrap();

        assert_eq!(first.avatar, second.avatar);
        assert_eq!(second.avatar, "https://example.com/me.png");
    }

    #[tokio::test]
    async fn test_concurrent_profile_and_avatar_updates_both_land() {
        let service = service();
        let created = service
            .create_user(create_input("a@b.com", "secret1"))
            .await
            .unwrap();
        let id = created.id.to_string();

        let (profile, avatar) = tokio::join!(
            service.update_profile(
                &id,
                UpdateProfile {
                    name: Some("Renamed".to_string()),
                    about: None,
                },
            ),
            service.update_avatar(
                &id,
                UpdateAvatar {
                    avatar: "https://example.com/me.png".to_string(),
                },
            )
        );
        profile.unwrap();
        avatar.unwrap();

        let user = service.get_user(&id).await.unwrap();
        assert_eq!(user.name, "Renamed");
        assert_eq!(user.avatar, "https://example.com/me.png");
    }

    #[tokio::test]
    async fn test_duplicate_email_surfaces_as_server_error() {
        let service = service();
        service
            .create_user(create_input("a@b.com", "secret1"))
            .await
            .unwrap();

        let err = service
            .create_user(create_input("a@b.com", "secret2"))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Server(_)));
    }
}
