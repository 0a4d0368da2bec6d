use super::models::Vacation;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Edit,
    Delete,
    Invite,
    Kick,
    ManagePosts,
    RespondToInvitation,
    Leave,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{reason}")]
pub struct Denial {
    pub action: Action,
    pub reason: &'static str,
}

/// Single authorization point for every vacation operation.
pub fn authorize(actor: Uuid, vacation: &Vacation, action: Action) -> Result<(), Denial> {
    let members = &vacation.members;
    let (allowed, reason) = match action {
        Action::View => (
            !vacation.details.is_private || members.is_member(actor),
            "You are not allowed to view this vacation",
        ),
        Action::Edit => (
            members.is_creator(actor),
            "Only the creator can edit this vacation",
        ),
        Action::Delete => (
            members.is_creator(actor),
            "Only the creator can delete this vacation",
        ),
        Action::Invite => (
            members.is_creator(actor),
            "Only the creator can invite users",
        ),
        Action::Kick => (
            members.is_creator(actor),
            "Only the creator can remove participants",
        ),
        Action::ManagePosts => (
            members.is_participant(actor),
            "Only participants can manage posts of this vacation",
        ),
        Action::RespondToInvitation => (
            members.is_invited(actor),
            "You are not invited to this vacation",
        ),
        Action::Leave => (
            members.is_participant(actor),
            "You are not a participant of this vacation",
        ),
    };

    if allowed {
        Ok(())
    } else {
        Err(Denial { action, reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::vacations::membership::Members;
    use crate::utils::vacations::models::VacationDetails;
    use time::macros::{date, datetime};
    use uuid::uuid;

    const CREATOR: Uuid = uuid!("910e81a9-56df-4c24-965a-13eff739f469");
    const PARTICIPANT: Uuid = uuid!("29e40c2a-7595-42d3-98e8-9fe93ce99972");
    const INVITED: Uuid = uuid!("32190025-7c15-4adb-82fd-9acc3dc8e7b6");
    const OUTSIDER: Uuid = uuid!("a9c5900e-a445-4888-8612-4a5c8cadbd9e");

    fn vacation(is_private: bool) -> Vacation {
        let members = Members::new(CREATOR)
            .invite(PARTICIPANT)
            .and_then(|m| m.accept(PARTICIPANT))
            .and_then(|m| m.invite(INVITED))
            .unwrap();
        Vacation {
            id: uuid!("6d185de5-ddec-462a-aeea-7628f03d417b"),
            details: VacationDetails {
                name: "Hoi An".to_string(),
                description: String::new(),
                location: "Hoi An".to_string(),
                start_date: date!(2025-02-01),
                end_date: date!(2025-02-04),
                images: vec![],
                is_private,
            },
            members,
            created_at: datetime!(2025-01-01 10:00 UTC),
            updated_at: datetime!(2025-01-01 10:00 UTC),
        }
    }

    fn allowed(actor: Uuid, vacation: &Vacation, action: Action) -> bool {
        authorize(actor, vacation, action).is_ok()
    }

    #[test]
    fn private_vacation_is_visible_to_members_only() {
        let v = vacation(true);
        assert!(allowed(CREATOR, &v, Action::View));
        assert!(allowed(PARTICIPANT, &v, Action::View));
        assert!(allowed(INVITED, &v, Action::View));
        assert!(!allowed(OUTSIDER, &v, Action::View));
    }

    #[test]
    fn public_vacation_is_visible_to_everyone() {
        let v = vacation(false);
        assert!(allowed(OUTSIDER, &v, Action::View));
    }

    #[test]
    fn creator_only_actions() {
        let v = vacation(false);
        for action in [Action::Edit, Action::Delete, Action::Invite, Action::Kick] {
            assert!(allowed(CREATOR, &v, action));
            for actor in [PARTICIPANT, INVITED, OUTSIDER] {
                let denial = authorize(actor, &v, action).unwrap_err();
                assert_eq!(denial.action, action);
            }
        }
    }

    #[test]
    fn posts_are_managed_by_participants() {
        let v = vacation(false);
        assert!(allowed(CREATOR, &v, Action::ManagePosts));
        assert!(allowed(PARTICIPANT, &v, Action::ManagePosts));
        assert!(!allowed(INVITED, &v, Action::ManagePosts));
        assert!(!allowed(OUTSIDER, &v, Action::ManagePosts));
    }

    #[test]
    fn only_invited_users_respond() {
        let v = vacation(false);
        assert!(allowed(INVITED, &v, Action::RespondToInvitation));
        for actor in [CREATOR, PARTICIPANT, OUTSIDER] {
            assert!(!allowed(actor, &v, Action::RespondToInvitation));
        }
    }

    #[test]
    fn denial_carries_reason() {
        let denial = authorize(OUTSIDER, &vacation(true), Action::View).unwrap_err();
        assert_eq!(denial.to_string(), "You are not allowed to view this vacation");
    }
}
