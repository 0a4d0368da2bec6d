use crate::routes::posts::models::PostView;
use crate::routes::users::models::UserSummary;
use crate::utils::vacations::models::{VacationDetails, VacationStatus};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateVacation {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    pub start_date: Date,
    pub end_date: Date,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub invited_users: Vec<Uuid>,
}

impl CreateVacation {
    pub fn new(name: &str, location: &str, start_date: Date, end_date: Date) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            location: location.into(),
            start_date,
            end_date,
            images: Vec::new(),
            is_private: false,
            invited_users: Vec::new(),
        }
    }

    pub fn details(&self) -> VacationDetails {
        VacationDetails {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            location: self.location.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            images: self.images.clone(),
            is_private: self.is_private,
        }
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateVacation {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub images: Option<Vec<String>>,
    pub is_private: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VacationView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: Date,
    pub end_date: Date,
    pub images: Vec<String>,
    pub is_private: bool,
    pub status: VacationStatus,
    pub creator: UserSummary,
    pub participants: Vec<UserSummary>,
    pub invited_users: Vec<UserSummary>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VacationCreated {
    pub message: String,
    pub vacation: VacationView,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InviteUser {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddPost {
    pub post_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VacationPosts {
    pub posts: Vec<PostView>,
}
