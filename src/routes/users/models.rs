use crate::utils::auth::additions::is_valid_username;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Public face of a user embedded in other payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, FromRow)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub profile_img: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub profile_img: Option<String>,
    pub bio: String,
    pub link: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub followers: i64,
    pub following: i64,
    pub is_followed: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FollowToggled {
    pub message: String,
    pub following: bool,
}

/// Profile changes. Absent or blank fields keep their current value.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateProfile {
    #[validate(length(min = 3, max = 30), custom = "is_valid_username")]
    pub username: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub full_name: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub bio: Option<String>,
    pub link: Option<String>,
    pub profile_img: Option<String>,
}

impl UpdateProfile {
    /// Trims every field and drops the blank ones. Passwords are kept verbatim.
    pub fn normalized(self) -> Self {
        fn trimmed(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            username: trimmed(self.username),
            full_name: trimmed(self.full_name),
            current_password: present(self.current_password),
            new_password: present(self.new_password),
            bio: trimmed(self.bio),
            link: trimmed(self.link),
            profile_img: trimmed(self.profile_img),
        }
    }
}

/// Stored account fields an update merges into.
#[derive(Debug, FromRow)]
pub struct AccountRow {
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub bio: String,
    pub link: String,
    pub profile_img: Option<String>,
}
