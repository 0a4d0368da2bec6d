use crate::routes::users::models::UserSummary;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostView {
    pub id: Uuid,
    pub user: UserSummary,
    pub text: Option<String>,
    pub images: Vec<String>,
    pub likes: Vec<Uuid>,
    pub comments: Vec<CommentView>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentView {
    pub id: Uuid,
    pub user: UserSummary,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePost {
    pub text: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl CreatePost {
    pub fn new(text: Option<&str>, images: &[&str]) -> Self {
        Self {
            text: text.map(String::from),
            images: images.iter().map(|i| i.to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateComment {
    pub text: String,
}

impl CreateComment {
    pub fn new(text: &str) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LikeToggled {
    pub message: String,
    pub likes: Vec<Uuid>,
}
