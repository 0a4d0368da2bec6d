pub mod models;

use crate::modules::extractors::PathParam;
use crate::modules::AppState;
use crate::routes::notifications::models::NotificationView;
use crate::routes::Message;
use crate::utils::auth::models::Claims;
use crate::utils::notifications::errors::NotificationError;
use crate::utils::notifications::exe::{
    delete_all_notifications, delete_one_notification, list_notifications,
};
use axum::extract::State;
use axum::routing::{delete, get};
use axum::{Json, Router};
use sqlx::PgPool;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_notifications).delete(delete_notifications))
        .route("/:id", delete(delete_notification))
}

/// List notifications, newest first; listed unread notifications become read
#[utoipa::path(get, path = "/api/notifications", tag = "notifications", responses((status = 200, body = [NotificationView])))]
pub async fn get_notifications(
    claims: Claims,
    State(pool): State<PgPool>,
) -> Result<Json<Vec<NotificationView>>, NotificationError> {
    let notifications = list_notifications(&pool, claims.user_id).await?;
    Ok(Json(notifications))
}

/// Delete all notifications of the requester
#[utoipa::path(delete, path = "/api/notifications", tag = "notifications", responses((status = 200, body = Message)))]
pub async fn delete_notifications(
    claims: Claims,
    State(pool): State<PgPool>,
) -> Result<Json<Message>, NotificationError> {
    delete_all_notifications(&pool, claims.user_id).await?;
    Ok(Json(Message::new("Notifications deleted successfully")))
}

/// Delete one notification addressed to the requester
#[utoipa::path(delete, path = "/api/notifications/{id}", tag = "notifications", params(("id" = Uuid, Path, description = "Notification id")), responses((status = 200, body = Message), (status = 403), (status = 404)))]
pub async fn delete_notification(
    claims: Claims,
    State(pool): State<PgPool>,
    PathParam(notification_id): PathParam<Uuid>,
) -> Result<Json<Message>, NotificationError> {
    delete_one_notification(&pool, claims.user_id, notification_id).await?;
    Ok(Json(Message::new("Notification deleted successfully")))
}
