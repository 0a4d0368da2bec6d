pub mod models;

use crate::modules::extractors::QueryParams;
use crate::modules::AppState;
use crate::routes::search::models::{SearchQuery, SearchVacationsResult};
use crate::routes::users::models::UserSummary;
use crate::utils::auth::models::Claims;
use crate::utils::search::errors::SearchError;
use crate::utils::search::{get_users, get_vacations};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use sqlx::PgPool;
use tracing::debug;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(search_users))
        .route("/vacations", get(search_vacations))
}

/// Search users by username or full name
#[utoipa::path(get, path = "/api/search/users", tag = "search", params(SearchQuery), responses((status = 200, description = "Matching users", body = [UserSummary])))]
pub async fn search_users(
    _claims: Claims,
    State(pool): State<PgPool>,
    QueryParams(q): QueryParams<SearchQuery>,
) -> Result<Json<Vec<UserSummary>>, SearchError> {
    let users = get_users(&pool, &q.search_query).await?;

    if users.is_empty() {
        debug!("Found no users with user search");
    } else {
        debug!("Found {} user(s) with user search", users.len());
    }

    Ok(Json(users))
}

/// Search public vacations by name
#[utoipa::path(get, path = "/api/search/vacations", tag = "search", params(SearchQuery), responses((status = 200, description = "Matching public vacations", body = [SearchVacationsResult])))]
pub async fn search_vacations(
    _claims: Claims,
    State(pool): State<PgPool>,
    QueryParams(q): QueryParams<SearchQuery>,
) -> Result<Json<Vec<SearchVacationsResult>>, SearchError> {
    let vacations = get_vacations(&pool, &q.search_query).await?;
    debug!("Found {} vacation(s) with vacation search", vacations.len());
    Ok(Json(vacations))
}
