use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Follow,
    Like,
    VacationInvitation,
}

/// What triggered a notification. Invitations always reference their vacation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationEvent {
    Follow,
    Like,
    VacationInvitation { vacation_id: Uuid },
}

impl NotificationEvent {
    pub fn kind(&self) -> NotificationKind {
        match self {
            NotificationEvent::Follow => NotificationKind::Follow,
            NotificationEvent::Like => NotificationKind::Like,
            NotificationEvent::VacationInvitation { .. } => NotificationKind::VacationInvitation,
        }
    }

    pub fn vacation_id(&self) -> Option<Uuid> {
        match self {
            NotificationEvent::VacationInvitation { vacation_id } => Some(*vacation_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_invitations_reference_a_vacation() {
        let vacation_id = Uuid::new_v4();
        assert_eq!(NotificationEvent::Follow.vacation_id(), None);
        assert_eq!(NotificationEvent::Like.vacation_id(), None);
        let invitation = NotificationEvent::VacationInvitation { vacation_id };
        assert_eq!(invitation.vacation_id(), Some(vacation_id));
        assert_eq!(invitation.kind(), NotificationKind::VacationInvitation);
    }

    #[test]
    fn kind_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_value(NotificationKind::VacationInvitation).unwrap(),
            serde_json::json!("vacation_invitation")
        );
    }
}
