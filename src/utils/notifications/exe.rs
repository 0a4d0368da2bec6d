use crate::modules::database::PgQuery;
use crate::routes::notifications::models::NotificationView;
use crate::utils::notifications::errors::NotificationError;
use crate::utils::notifications::NotificationQuery;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// Lists the user's notifications and marks the unread ones among them as read.
pub async fn list_notifications(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<NotificationView>, NotificationError> {
    let mut tx = pool.begin().await?;
    let mut q = PgQuery::new(NotificationQuery::new(user_id), &mut tx);

    let notifications = q.list().await?;
    let unread: Vec<Uuid> = notifications
        .iter()
        .filter(|n| !n.read)
        .map(|n| n.id)
        .collect();
    let marked = q.mark_read(&unread).await?;
    tx.commit().await?;

    debug!("Listed {} notification(s), {marked} marked as read", notifications.len());
    Ok(notifications.into_iter().map(NotificationView::from).collect())
}

pub async fn delete_all_notifications(pool: &PgPool, user_id: Uuid) -> Result<(), NotificationError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(NotificationQuery::new(user_id), &mut conn);
    let deleted = q.delete_all().await?;
    debug!("Deleted {deleted} notification(s)");
    Ok(())
}

pub async fn delete_one_notification(
    pool: &PgPool,
    user_id: Uuid,
    notification_id: Uuid,
) -> Result<(), NotificationError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(NotificationQuery::new(user_id), &mut conn);

    match q.recipient_of(notification_id).await? {
        None => Err(NotificationError::NotFound),
        Some(to_id) if to_id != user_id => Err(NotificationError::Forbidden),
        Some(_) => q.delete(notification_id).await,
    }
}
