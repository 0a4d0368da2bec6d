pub mod errors;
pub mod exe;
pub mod models;

use self::errors::NotificationError;
use self::models::{NotificationEvent, NotificationKind};
use crate::modules::database::PgQuery;
use crate::routes::notifications::models::{NotificationView, VacationSummary};
use crate::routes::users::models::UserSummary;
use sqlx::{query, query_as, query_scalar, FromRow};
use time::{Date, OffsetDateTime};
use tracing::trace;
use uuid::Uuid;

#[derive(FromRow)]
pub struct QNotification {
    id: Uuid,
    kind: NotificationKind,
    read: bool,
    created_at: OffsetDateTime,
    from_id: Uuid,
    from_username: String,
    from_full_name: String,
    from_profile_img: Option<String>,
    vacation_id: Option<Uuid>,
    vacation_name: Option<String>,
    vacation_location: Option<String>,
    vacation_start_date: Option<Date>,
    vacation_end_date: Option<Date>,
}

impl From<QNotification> for NotificationView {
    fn from(n: QNotification) -> Self {
        let vacation = match (
            n.vacation_id,
            n.vacation_name,
            n.vacation_location,
            n.vacation_start_date,
            n.vacation_end_date,
        ) {
            (Some(id), Some(name), Some(location), Some(start_date), Some(end_date)) => {
                Some(VacationSummary {
                    id,
                    name,
                    location,
                    start_date,
                    end_date,
                })
            }
            _ => None,
        };

        Self {
            id: n.id,
            from: UserSummary {
                id: n.from_id,
                username: n.from_username,
                full_name: n.from_full_name,
                profile_img: n.from_profile_img,
            },
            kind: n.kind,
            vacation,
            read: n.read,
            created_at: n.created_at,
        }
    }
}

/// Notification queries on behalf of `user_id`, who sends new notifications
/// and owns the listed ones.
pub struct NotificationQuery {
    user_id: Uuid,
}

impl NotificationQuery {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

impl<'c> PgQuery<'c, NotificationQuery> {
    pub async fn notify(
        &mut self,
        to: Uuid,
        event: NotificationEvent,
    ) -> Result<Uuid, NotificationError> {
        let id: Uuid = query_scalar(
            r#"
                INSERT INTO notifications (from_id, to_id, kind, vacation_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id
            "#,
        )
        .bind(self.payload.user_id)
        .bind(to)
        .bind(event.kind())
        .bind(event.vacation_id())
        .fetch_one(&mut *self.conn)
        .await?;

        trace!("Notification {id} ({:?}) sent to {to}", event.kind());
        Ok(id)
    }

    pub async fn list(&mut self) -> Result<Vec<QNotification>, NotificationError> {
        let notifications = query_as::<_, QNotification>(
            r#"
                SELECT n.id, n.kind, n.read, n.created_at,
                    u.id AS from_id, u.username AS from_username,
                    u.full_name AS from_full_name, u.profile_img AS from_profile_img,
                    v.id AS vacation_id, v.name AS vacation_name, v.location AS vacation_location,
                    v.start_date AS vacation_start_date, v.end_date AS vacation_end_date
                FROM notifications n
                JOIN users u ON u.id = n.from_id
                LEFT JOIN vacations v ON v.id = n.vacation_id
                WHERE n.to_id = $1
                ORDER BY n.created_at DESC
            "#,
        )
        .bind(self.payload.user_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(notifications)
    }

    pub async fn mark_read(&mut self, ids: &[Uuid]) -> Result<u64, NotificationError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let updated = query(
            r#"
                UPDATE notifications SET read = TRUE
                WHERE to_id = $1 AND id = ANY($2)
            "#,
        )
        .bind(self.payload.user_id)
        .bind(ids)
        .execute(&mut *self.conn)
        .await?
        .rows_affected();

        Ok(updated)
    }

    pub async fn delete_all(&mut self) -> Result<u64, NotificationError> {
        let deleted = query("DELETE FROM notifications WHERE to_id = $1")
            .bind(self.payload.user_id)
            .execute(&mut *self.conn)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    pub async fn recipient_of(
        &mut self,
        notification_id: Uuid,
    ) -> Result<Option<Uuid>, NotificationError> {
        let to_id: Option<Uuid> = query_scalar("SELECT to_id FROM notifications WHERE id = $1")
            .bind(notification_id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(to_id)
    }

    pub async fn delete(&mut self, notification_id: Uuid) -> Result<(), NotificationError> {
        query("DELETE FROM notifications WHERE id = $1")
            .bind(notification_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(())
    }

    /// Removes the oldest pending invitation of `user_id` to the vacation.
    pub async fn remove_invitation(&mut self, vacation_id: Uuid) -> Result<bool, NotificationError> {
        let deleted = query(
            r#"
                DELETE FROM notifications
                WHERE id = (
                    SELECT id FROM notifications
                    WHERE to_id = $1 AND vacation_id = $2 AND kind = $3
                    ORDER BY created_at
                    LIMIT 1
                )
            "#,
        )
        .bind(self.payload.user_id)
        .bind(vacation_id)
        .bind(NotificationKind::VacationInvitation)
        .execute(&mut *self.conn)
        .await?
        .rows_affected();

        Ok(deleted > 0)
    }
}
