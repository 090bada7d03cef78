use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Profile defaults applied when a creation payload omits the field
pub const DEFAULT_NAME: &str = "New User";
pub const DEFAULT_ABOUT: &str = "Explorer";
pub const DEFAULT_AVATAR: &str = "https://pictures.example.com/default-avatar.png";

/// User entity.
///
/// The field bounds double as the store's record validation: the repository
/// re-checks them on every write, mirroring a schema-validating document
/// store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    /// Unique identifier (store-assigned, immutable)
    pub id: Uuid,
    /// Display name
    #[validate(length(min = 2, max = 30))]
    pub name: String,
    /// Short bio text
    #[validate(length(min = 2, max = 200))]
    pub about: String,
    /// Avatar URI
    #[validate(url)]
    pub avatar: String,
    /// User email (unique, case-insensitive)
    #[validate(email)]
    pub email: String,
    /// Argon2 password hash (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// User response DTO (without password_hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub about: String,
    pub avatar: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            about: user.about,
            avatar: user.avatar,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 2, max = 30))]
    pub name: Option<String>,
    #[validate(length(min = 2, max = 200))]
    pub about: Option<String>,
    #[validate(url)]
    pub avatar: Option<String>,
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// DTO for updating the caller's profile
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(min = 2, max = 30))]
    pub name: Option<String>,
    #[validate(length(min = 2, max = 200))]
    pub about: Option<String>,
}

/// DTO for updating the caller's avatar
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAvatar {
    #[validate(url)]
    pub avatar: String,
}

/// Partial record changes, merged into the stored record by the repository
/// under a single write lock. Absent fields are left untouched; email and
/// identity are not updatable.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub about: Option<String>,
    pub avatar: Option<String>,
}

impl From<UpdateProfile> for UserUpdate {
    fn from(update: UpdateProfile) -> Self {
        Self {
            name: update.name,
            about: update.about,
            avatar: None,
        }
    }
}

impl From<UpdateAvatar> for UserUpdate {
    fn from(update: UpdateAvatar) -> Self {
        Self {
            name: None,
            about: None,
            avatar: Some(update.avatar),
        }
    }
}

/// DTO for user login.
///
/// Deliberately unvalidated beyond its shape: a malformed email is just a
/// set of credentials that matches no record.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl User {
    /// Create a new user (password already hashed by the service layer),
    /// applying profile defaults for omitted fields.
    pub fn new(
        name: Option<String>,
        about: Option<String>,
        avatar: Option<String>,
        email: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            about: about.unwrap_or_else(|| DEFAULT_ABOUT.to_string()),
            avatar: avatar.unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge partial changes into the record and touch `updated_at`
    pub fn apply(&mut self, changes: UserUpdate) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(about) = changes.about {
            self.about = about;
        }
        if let Some(avatar) = changes.avatar {
            self.avatar = avatar;
        }
        self.updated_at = Utc::now();
    }
}
