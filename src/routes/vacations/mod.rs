pub mod models;

use crate::modules::extractors::{JsonBody, PathParam};
use crate::modules::AppState;
use crate::routes::vacations::models::{
    AddPost, CreateVacation, InviteUser, UpdateVacation, VacationCreated, VacationPosts,
    VacationView,
};
use crate::routes::Message;
use crate::utils::auth::models::Claims;
use crate::utils::vacations::errors::VacationError;
use crate::utils::vacations::exe::*;
use axum::extract::State;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use http::StatusCode;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vacation))
        .route("/user", get(get_my_vacations))
        .route("/available", get(get_available))
        .route(
            "/:vacation_id",
            get(get_vacation).put(update_vacation).delete(delete_vacation),
        )
        .route("/:vacation_id/invite", post(invite_to_vacation))
        .route("/:vacation_id/accept", post(accept_vacation_invitation))
        .route("/:vacation_id/decline", post(decline_vacation_invitation))
        .route("/:vacation_id/leave", post(leave))
        .route(
            "/:vacation_id/participants/:user_id",
            delete(kick_from_vacation),
        )
        .route(
            "/:vacation_id/posts",
            get(get_vacation_posts).post(add_post_to_vacation),
        )
        .route(
            "/:vacation_id/posts/:post_id",
            delete(remove_post_from_vacation),
        )
}

/// Create a vacation; the requester becomes its creator
#[utoipa::path(post, path = "/api/vacations", tag = "vacations", request_body = CreateVacation, responses((status = 201, body = VacationCreated), (status = 400), (status = 404, description = "Invited user not found")))]
pub async fn create_vacation(
    claims: Claims,
    State(pool): State<PgPool>,
    JsonBody(body): JsonBody<CreateVacation>,
) -> Result<(StatusCode, Json<VacationCreated>), VacationError> {
    let vacation = create_new_vacation(&pool, claims.user_id, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(VacationCreated {
            message: "Vacation created successfully".to_string(),
            vacation,
        }),
    ))
}

/// Vacations the requester created, joined or is invited to
#[utoipa::path(get, path = "/api/vacations/user", tag = "vacations", responses((status = 200, body = [VacationView])))]
pub async fn get_my_vacations(
    claims: Claims,
    State(pool): State<PgPool>,
) -> Result<Json<Vec<VacationView>>, VacationError> {
    Ok(Json(get_user_vacations(&pool, claims.user_id).await?))
}

/// Ongoing and upcoming vacations the requester can add posts to
#[utoipa::path(get, path = "/api/vacations/available", tag = "vacations", responses((status = 200, body = [VacationView])))]
pub async fn get_available(
    claims: Claims,
    State(pool): State<PgPool>,
) -> Result<Json<Vec<VacationView>>, VacationError> {
    Ok(Json(get_available_vacations(&pool, claims.user_id).await?))
}

/// Vacation details
#[utoipa::path(get, path = "/api/vacations/{vacation_id}", tag = "vacations", params(("vacation_id" = Uuid, Path, description = "Vacation id")), responses((status = 200, body = VacationView), (status = 403), (status = 404)))]
pub async fn get_vacation(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(vacation_id): PathParam<Uuid>,
) -> Result<Json<VacationView>, VacationError> {
    Ok(Json(get_one_vacation(&pool, claims.user_id, vacation_id).await?))
}

/// Update vacation details
#[utoipa::path(put, path = "/api/vacations/{vacation_id}", tag = "vacations", params(("vacation_id" = Uuid, Path, description = "Vacation id")), request_body = UpdateVacation, responses((status = 200, body = VacationView), (status = 400), (status = 403), (status = 404)))]
pub async fn update_vacation(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(vacation_id): PathParam<Uuid>,
    JsonBody(body): JsonBody<UpdateVacation>,
) -> Result<Json<VacationView>, VacationError> {
    Ok(Json(
        update_one_vacation(&pool, claims.user_id, vacation_id, body).await?,
    ))
}

/// Delete a vacation with its post links and memberships
#[utoipa::path(delete, path = "/api/vacations/{vacation_id}", tag = "vacations", params(("vacation_id" = Uuid, Path, description = "Vacation id")), responses((status = 200, body = Message), (status = 403), (status = 404)))]
pub async fn delete_vacation(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(vacation_id): PathParam<Uuid>,
) -> Result<Json<Message>, VacationError> {
    delete_one_vacation(&pool, claims.user_id, vacation_id).await?;
    Ok(Json(Message::new("Vacation deleted successfully")))
}

/// Invite a user by username
#[utoipa::path(post, path = "/api/vacations/{vacation_id}/invite", tag = "vacations", params(("vacation_id" = Uuid, Path, description = "Vacation id")), request_body = InviteUser, responses((status = 200, body = Message), (status = 400), (status = 403), (status = 404)))]
pub async fn invite_to_vacation(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(vacation_id): PathParam<Uuid>,
    JsonBody(body): JsonBody<InviteUser>,
) -> Result<Json<Message>, VacationError> {
    invite_user(&pool, claims.user_id, vacation_id, body.username.trim()).await?;
    Ok(Json(Message::new("Invitation sent successfully")))
}

/// Accept a pending invitation
#[utoipa::path(post, path = "/api/vacations/{vacation_id}/accept", tag = "vacations", params(("vacation_id" = Uuid, Path, description = "Vacation id")), responses((status = 200, body = Message), (status = 403), (status = 404)))]
pub async fn accept_vacation_invitation(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(vacation_id): PathParam<Uuid>,
) -> Result<Json<Message>, VacationError> {
    accept_invitation(&pool, claims.user_id, vacation_id).await?;
    debug!("Invitation to {vacation_id} accepted");
    Ok(Json(Message::new("Invitation accepted")))
}

/// Decline a pending invitation
#[utoipa::path(post, path = "/api/vacations/{vacation_id}/decline", tag = "vacations", params(("vacation_id" = Uuid, Path, description = "Vacation id")), responses((status = 200, body = Message), (status = 403), (status = 404)))]
pub async fn decline_vacation_invitation(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(vacation_id): PathParam<Uuid>,
) -> Result<Json<Message>, VacationError> {
    decline_invitation(&pool, claims.user_id, vacation_id).await?;
    debug!("Invitation to {vacation_id} declined");
    Ok(Json(Message::new("Invitation declined")))
}

/// Leave a vacation as a non-creator participant
#[utoipa::path(post, path = "/api/vacations/{vacation_id}/leave", tag = "vacations", params(("vacation_id" = Uuid, Path, description = "Vacation id")), responses((status = 200, body = Message), (status = 400), (status = 403), (status = 404)))]
pub async fn leave(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(vacation_id): PathParam<Uuid>,
) -> Result<Json<Message>, VacationError> {
    leave_vacation(&pool, claims.user_id, vacation_id).await?;
    Ok(Json(Message::new("You left the vacation")))
}

/// Remove a participant
#[utoipa::path(delete, path = "/api/vacations/{vacation_id}/participants/{user_id}", tag = "vacations", params(("vacation_id" = Uuid, Path, description = "Vacation id"), ("user_id" = Uuid, Path, description = "Participant id")), responses((status = 200, body = Message), (status = 400), (status = 403), (status = 404)))]
pub async fn kick_from_vacation(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam((vacation_id, user_id)): PathParam<(Uuid, Uuid)>,
) -> Result<Json<Message>, VacationError> {
    kick_participant(&pool, claims.user_id, vacation_id, user_id).await?;
    Ok(Json(Message::new("Participant removed")))
}

/// Posts linked to a vacation, newest link first
#[utoipa::path(get, path = "/api/vacations/{vacation_id}/posts", tag = "vacations", params(("vacation_id" = Uuid, Path, description = "Vacation id")), responses((status = 200, body = VacationPosts), (status = 403), (status = 404)))]
pub async fn get_vacation_posts(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(vacation_id): PathParam<Uuid>,
) -> Result<Json<VacationPosts>, VacationError> {
    let posts = list_posts(&pool, claims.user_id, vacation_id).await?;
    Ok(Json(VacationPosts { posts }))
}

/// Link a post to a vacation
#[utoipa::path(post, path = "/api/vacations/{vacation_id}/posts", tag = "vacations", params(("vacation_id" = Uuid, Path, description = "Vacation id")), request_body = AddPost, responses((status = 200, body = Message), (status = 400), (status = 403), (status = 404)))]
pub async fn add_post_to_vacation(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(vacation_id): PathParam<Uuid>,
    JsonBody(body): JsonBody<AddPost>,
) -> Result<Json<Message>, VacationError> {
    add_post(&pool, claims.user_id, vacation_id, body.post_id).await?;
    Ok(Json(Message::new("Post added to vacation")))
}

/// Unlink a post from a vacation
#[utoipa::path(delete, path = "/api/vacations/{vacation_id}/posts/{post_id}", tag = "vacations", params(("vacation_id" = Uuid, Path, description = "Vacation id"), ("post_id" = Uuid, Path, description = "Post id")), responses((status = 200, body = Message), (status = 403), (status = 404)))]
pub async fn remove_post_from_vacation(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam((vacation_id, post_id)): PathParam<(Uuid, Uuid)>,
) -> Result<Json<Message>, VacationError> {
    remove_post(&pool, claims.user_id, vacation_id, post_id).await?;
    Ok(Json(Message::new("Post removed from vacation")))
}
