use crate::routes::users::models::UserSummary;
use crate::utils::notifications::models::NotificationKind;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationView {
    pub id: Uuid,
    pub from: UserSummary,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub vacation: Option<VacationSummary>,
    pub read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VacationSummary {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub start_date: Date,
    pub end_date: Date,
}
