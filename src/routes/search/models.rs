use crate::routes::users::models::UserSummary;
use crate::utils::search::QueryVacation;
use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    #[serde(default)]
    pub search_query: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SearchVacationsResult {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub images: Vec<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub creator: UserSummary,
}

impl From<QueryVacation> for SearchVacationsResult {
    fn from(val: QueryVacation) -> Self {
        Self {
            id: val.id,
            name: val.name,
            location: val.location,
            images: val.images,
            start_date: val.start_date,
            end_date: val.end_date,
            creator: UserSummary {
                id: val.creator_id,
                username: val.username,
                full_name: val.full_name,
                profile_img: val.profile_img,
            },
        }
    }
}
