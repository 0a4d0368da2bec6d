pub mod models;

use crate::modules::extractors::{JsonBody, PathParam};
use crate::modules::AppState;
use crate::routes::posts::models::{CreateComment, CreatePost, LikeToggled, PostView};
use crate::routes::Message;
use crate::utils::auth::models::Claims;
use crate::utils::posts::errors::PostError;
use crate::utils::posts::exe::{
    comment_on_post, create_new_post, delete_own_post, get_all_posts, get_following_posts,
    get_liked_posts, get_user_posts, get_vacation_feed, toggle_post_like,
};
use axum::extract::State;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use http::StatusCode;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/all", get(get_all))
        .route("/following", get(get_following))
        .route("/vacations", get(get_vacations_feed))
        .route("/user/:username", get(get_by_user))
        .route("/likes/:id", get(get_liked))
        .route("/create", post(create_post))
        .route("/like/:id", post(like_post))
        .route("/comment/:id", post(comment_post))
        .route("/:id", delete(delete_post))
}

/// Posts linked to the requester's vacations, newest first
#[utoipa::path(get, path = "/api/posts/vacations", tag = "posts", responses((status = 200, body = [PostView])))]
pub async fn get_vacations_feed(
    claims: Claims,
    State(pool): State<PgPool>,
) -> Result<Json<Vec<PostView>>, PostError> {
    Ok(Json(get_vacation_feed(&pool, claims.user_id).await?))
}

/// Comment on a post
#[utoipa::path(post, path = "/api/posts/comment/{id}", tag = "posts", request_body = CreateComment, params(("id" = Uuid, Path, description = "Post id")), responses((status = 200, body = PostView), (status = 400), (status = 404)))]
pub async fn comment_post(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(post_id): PathParam<Uuid>,
    JsonBody(body): JsonBody<CreateComment>,
) -> Result<Json<PostView>, PostError> {
    Ok(Json(comment_on_post(&pool, claims.user_id, post_id, body).await?))
}

/// All posts, newest first
#[utoipa::path(get, path = "/api/posts/all", tag = "posts", responses((status = 200, body = [PostView])))]
pub async fn get_all(
    claims: Claims,
    State(pool): State<PgPool>,
) -> Result<Json<Vec<PostView>>, PostError> {
    Ok(Json(get_all_posts(&pool, claims.user_id).await?))
}

/// Posts of followed users
#[utoipa::path(get, path = "/api/posts/following", tag = "posts", responses((status = 200, body = [PostView])))]
pub async fn get_following(
    claims: Claims,
    State(pool): State<PgPool>,
) -> Result<Json<Vec<PostView>>, PostError> {
    Ok(Json(get_following_posts(&pool, claims.user_id).await?))
}

/// Posts of a user
#[utoipa::path(get, path = "/api/posts/user/{username}", tag = "posts", params(("username" = String, Path, description = "Username")), responses((status = 200, body = [PostView]), (status = 404)))]
pub async fn get_by_user(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(username): PathParam<String>,
) -> Result<Json<Vec<PostView>>, PostError> {
    Ok(Json(get_user_posts(&pool, claims.user_id, &username).await?))
}

/// Posts liked by a user
#[utoipa::path(get, path = "/api/posts/likes/{id}", tag = "posts", params(("id" = Uuid, Path, description = "User id")), responses((status = 200, body = [PostView]), (status = 404)))]
pub async fn get_liked(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(liker_id): PathParam<Uuid>,
) -> Result<Json<Vec<PostView>>, PostError> {
    Ok(Json(get_liked_posts(&pool, claims.user_id, liker_id).await?))
}

/// Create a post with text and/or image URLs
#[utoipa::path(post, path = "/api/posts/create", tag = "posts", request_body = CreatePost, responses((status = 201, body = PostView), (status = 400)))]
pub async fn create_post(
    claims: Claims,
    State(pool): State<PgPool>,
    JsonBody(body): JsonBody<CreatePost>,
) -> Result<(StatusCode, Json<PostView>), PostError> {
    let post = create_new_post(&pool, claims.user_id, body).await?;
    debug!("Post {} created", post.id);
    Ok((StatusCode::CREATED, Json(post)))
}

/// Like or unlike a post
#[utoipa::path(post, path = "/api/posts/like/{id}", tag = "posts", params(("id" = Uuid, Path, description = "Post id")), responses((status = 200, body = LikeToggled), (status = 404)))]
pub async fn like_post(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(post_id): PathParam<Uuid>,
) -> Result<Json<LikeToggled>, PostError> {
    Ok(Json(toggle_post_like(&pool, claims.user_id, post_id).await?))
}

/// Delete own post
#[utoipa::path(delete, path = "/api/posts/{id}", tag = "posts", params(("id" = Uuid, Path, description = "Post id")), responses((status = 200, body = Message), (status = 403), (status = 404)))]
pub async fn delete_post(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(post_id): PathParam<Uuid>,
) -> Result<Json<Message>, PostError> {
    delete_own_post(&pool, claims.user_id, post_id).await?;
    Ok(Json(Message::new("Post deleted successfully")))
}
