pub mod models;

use crate::modules::extractors::{JsonBody, PathParam};
use crate::modules::AppState;
use crate::routes::users::models::{FollowToggled, UpdateProfile, UserProfile, UserSummary};
use crate::utils::auth::models::Claims;
use crate::utils::users::errors::UserError;
use crate::utils::users::exe::{
    get_followers, get_following, get_profile, get_suggested, toggle_follow, update_profile,
};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile/:username", get(get_user_profile))
        .route("/suggested", get(get_suggested_users))
        .route("/following", get(get_my_following))
        .route("/following/:username", get(get_user_following))
        .route("/followers/:username", get(get_user_followers))
        .route("/follow/:id", post(post_toggle_follow))
        .route("/update", post(post_update_profile))
}

/// Profile of a user
#[utoipa::path(get, path = "/api/users/profile/{username}", tag = "users", params(("username" = String, Path, description = "Username")), responses((status = 200, body = UserProfile), (status = 404)))]
pub async fn get_user_profile(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(username): PathParam<String>,
) -> Result<Json<UserProfile>, UserError> {
    Ok(Json(get_profile(&pool, claims.user_id, &username).await?))
}

/// Users the requester might want to follow
#[utoipa::path(get, path = "/api/users/suggested", tag = "users", responses((status = 200, body = [UserSummary])))]
pub async fn get_suggested_users(
    claims: Claims,
    State(pool): State<PgPool>,
) -> Result<Json<Vec<UserSummary>>, UserError> {
    Ok(Json(get_suggested(&pool, claims.user_id).await?))
}

/// Users followed by the requester
#[utoipa::path(get, path = "/api/users/following", tag = "users", responses((status = 200, body = [UserSummary])))]
pub async fn get_my_following(
    claims: Claims,
    State(pool): State<PgPool>,
) -> Result<Json<Vec<UserSummary>>, UserError> {
    Ok(Json(get_following(&pool, claims.user_id, None).await?))
}

/// Users followed by a user
#[utoipa::path(get, path = "/api/users/following/{username}", tag = "users", params(("username" = String, Path, description = "Username")), responses((status = 200, body = [UserSummary]), (status = 404)))]
pub async fn get_user_following(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(username): PathParam<String>,
) -> Result<Json<Vec<UserSummary>>, UserError> {
    Ok(Json(
        get_following(&pool, claims.user_id, Some(&username)).await?,
    ))
}

/// Followers of a user
#[utoipa::path(get, path = "/api/users/followers/{username}", tag = "users", params(("username" = String, Path, description = "Username")), responses((status = 200, body = [UserSummary]), (status = 404)))]
pub async fn get_user_followers(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(username): PathParam<String>,
) -> Result<Json<Vec<UserSummary>>, UserError> {
    Ok(Json(get_followers(&pool, claims.user_id, &username).await?))
}

/// Follow or unfollow a user
#[utoipa::path(post, path = "/api/users/follow/{id}", tag = "users", params(("id" = Uuid, Path, description = "User to follow")), responses((status = 200, body = FollowToggled), (status = 400), (status = 404)))]
pub async fn post_toggle_follow(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(target_id): PathParam<Uuid>,
) -> Result<Json<FollowToggled>, UserError> {
    let toggled = toggle_follow(&pool, claims.user_id, target_id).await?;
    debug!("{}", toggled.message);
    Ok(Json(toggled))
}

/// Update the requester's profile
#[utoipa::path(post, path = "/api/users/update", tag = "users", request_body = UpdateProfile, responses((status = 200, body = UserProfile), (status = 400)))]
pub async fn post_update_profile(
    claims: Claims,
    State(pool): State<PgPool>,
    JsonBody(body): JsonBody<UpdateProfile>,
) -> Result<Json<UserProfile>, UserError> {
    Ok(Json(update_profile(&pool, claims.user_id, body).await?))
}
