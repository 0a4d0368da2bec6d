use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// State of a single user within a vacation. Users without a record are not members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "membership_state", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    Creator,
    Participant,
    Invited,
}

impl Membership {
    /// The creator counts as a participant.
    pub fn is_participant(&self) -> bool {
        matches!(self, Membership::Creator | Membership::Participant)
    }
}

/// A single record write needed to go from one member set to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipChange {
    Added(Uuid, Membership),
    Changed(Uuid, Membership),
    Removed(Uuid),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipError {
    #[error("User is already invited")]
    AlreadyInvited,
    #[error("User already participates in this vacation")]
    AlreadyParticipant,
    #[error("User is not invited to this vacation")]
    NotInvited,
    #[error("User is not a participant of this vacation")]
    NotParticipant,
    #[error("The creator cannot be removed from the vacation")]
    CreatorImmovable,
    #[error("Vacation must have exactly one creator")]
    CorruptedCreator,
}

/// Membership records of one vacation, keyed by user.
///
/// Exactly one record is [`Membership::Creator`]; transitions never create or remove it,
/// so the creator is always among the participants and no user is both invited and
/// participating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Members {
    creator: Uuid,
    records: BTreeMap<Uuid, Membership>,
}

impl Members {
    pub fn new(creator: Uuid) -> Self {
        Self {
            creator,
            records: BTreeMap::from([(creator, Membership::Creator)]),
        }
    }

    /// Rebuilds the set from stored records, rejecting anything but a single creator.
    pub fn from_records(
        records: impl IntoIterator<Item = (Uuid, Membership)>,
    ) -> Result<Self, MembershipError> {
        let records: BTreeMap<Uuid, Membership> = records.into_iter().collect();
        let mut creators = records
            .iter()
            .filter(|(_, state)| **state == Membership::Creator)
            .map(|(user, _)| *user);

        match (creators.next(), creators.next()) {
            (Some(creator), None) => Ok(Self { creator, records }),
            _ => Err(MembershipError::CorruptedCreator),
        }
    }

    pub fn creator(&self) -> Uuid {
        self.creator
    }

    pub fn state_of(&self, user_id: Uuid) -> Option<Membership> {
        self.records.get(&user_id).copied()
    }

    pub fn is_creator(&self, user_id: Uuid) -> bool {
        self.creator == user_id
    }

    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.state_of(user_id)
            .map_or(false, |state| state.is_participant())
    }

    pub fn is_invited(&self, user_id: Uuid) -> bool {
        self.state_of(user_id) == Some(Membership::Invited)
    }

    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.records.contains_key(&user_id)
    }

    /// Participants with the creator first.
    pub fn participants(&self) -> Vec<Uuid> {
        std::iter::once(self.creator)
            .chain(
                self.records
                    .iter()
                    .filter(|(_, state)| **state == Membership::Participant)
                    .map(|(user, _)| *user),
            )
            .collect()
    }

    pub fn invited(&self) -> Vec<Uuid> {
        self.records
            .iter()
            .filter(|(_, state)| **state == Membership::Invited)
            .map(|(user, _)| *user)
            .collect()
    }

    /// none → invited
    pub fn invite(&self, user_id: Uuid) -> Result<Self, MembershipError> {
        match self.state_of(user_id) {
            None => Ok(self.with(user_id, Some(Membership::Invited))),
            Some(Membership::Invited) => Err(MembershipError::AlreadyInvited),
            Some(_) => Err(MembershipError::AlreadyParticipant),
        }
    }

    /// invited → participant
    pub fn accept(&self, user_id: Uuid) -> Result<Self, MembershipError> {
        match self.state_of(user_id) {
            Some(Membership::Invited) => Ok(self.with(user_id, Some(Membership::Participant))),
            _ => Err(MembershipError::NotInvited),
        }
    }

    /// invited → none
    pub fn decline(&self, user_id: Uuid) -> Result<Self, MembershipError> {
        match self.state_of(user_id) {
            Some(Membership::Invited) => Ok(self.with(user_id, None)),
            _ => Err(MembershipError::NotInvited),
        }
    }

    /// participant → none, never applicable to the creator.
    pub fn remove_participant(&self, user_id: Uuid) -> Result<Self, MembershipError> {
        match self.state_of(user_id) {
            Some(Membership::Creator) => Err(MembershipError::CreatorImmovable),
            Some(Membership::Participant) => Ok(self.with(user_id, None)),
            _ => Err(MembershipError::NotParticipant),
        }
    }

    /// Record writes turning `self` into `next`, ordered by user id.
    pub fn changes_to(&self, next: &Members) -> Vec<MembershipChange> {
        let removed = self
            .records
            .keys()
            .filter(|user| !next.records.contains_key(user))
            .map(|user| (*user, MembershipChange::Removed(*user)));

        let written = next.records.iter().filter_map(|(user, state)| {
            match self.records.get(user) {
                None => Some((*user, MembershipChange::Added(*user, *state))),
                Some(previous) if previous != state => {
                    Some((*user, MembershipChange::Changed(*user, *state)))
                }
                Some(_) => None,
            }
        });

        let mut changes: Vec<(Uuid, MembershipChange)> = removed.chain(written).collect();
        changes.sort_by_key(|(user, _)| *user);
        changes.into_iter().map(|(_, change)| change).collect()
    }

    fn with(&self, user_id: Uuid, state: Option<Membership>) -> Self {
        let mut records = self.records.clone();
        match state {
            Some(state) => records.insert(user_id, state),
            None => records.remove(&user_id),
        };
        Self {
            creator: self.creator,
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::uuid;

    const CREATOR: Uuid = uuid!("910e81a9-56df-4c24-965a-13eff739f469");
    const GUEST: Uuid = uuid!("29e40c2a-7595-42d3-98e8-9fe93ce99972");
    const OTHER: Uuid = uuid!("a9c5900e-a445-4888-8612-4a5c8cadbd9e");

    fn assert_disjoint(members: &Members) {
        let participants = members.participants();
        assert!(participants.contains(&members.creator()));
        assert!(members
            .invited()
            .iter()
            .all(|user| !participants.contains(user)));
    }

    #[test]
    fn new_vacation_has_creator_as_sole_participant() {
        let members = Members::new(CREATOR);
        assert_eq!(members.participants(), vec![CREATOR]);
        assert!(members.invited().is_empty());
        assert_eq!(members.state_of(CREATOR), Some(Membership::Creator));
    }

    #[test]
    fn invite_then_accept_moves_user_to_participants() {
        let invited = Members::new(CREATOR).invite(GUEST).unwrap();
        assert_eq!(invited.invited(), vec![GUEST]);
        assert_disjoint(&invited);

        let accepted = invited.accept(GUEST).unwrap();
        assert_eq!(accepted.participants(), vec![CREATOR, GUEST]);
        assert!(accepted.invited().is_empty());
        assert_disjoint(&accepted);
    }

    #[test]
    fn invite_rejects_existing_members_without_changes() {
        let members = Members::new(CREATOR).invite(GUEST).unwrap();
        assert_eq!(members.invite(GUEST), Err(MembershipError::AlreadyInvited));

        let members = members.accept(GUEST).unwrap();
        assert_eq!(members.invite(GUEST), Err(MembershipError::AlreadyParticipant));
        assert_eq!(members.invite(CREATOR), Err(MembershipError::AlreadyParticipant));
        assert_eq!(members.participants(), vec![CREATOR, GUEST]);
    }

    #[test]
    fn accept_requires_pending_invitation() {
        let members = Members::new(CREATOR);
        assert_eq!(members.accept(GUEST), Err(MembershipError::NotInvited));
        assert_eq!(members.accept(CREATOR), Err(MembershipError::NotInvited));

        let accepted = members.invite(GUEST).unwrap().accept(GUEST).unwrap();
        assert_eq!(accepted.accept(GUEST), Err(MembershipError::NotInvited));
    }

    #[test]
    fn decline_forgets_the_invitation() {
        let members = Members::new(CREATOR).invite(GUEST).unwrap();
        let declined = members.decline(GUEST).unwrap();
        assert_eq!(declined, Members::new(CREATOR));
        assert_eq!(declined.decline(GUEST), Err(MembershipError::NotInvited));
    }

    #[test]
    fn creator_is_never_removable() {
        let members = Members::new(CREATOR)
            .invite(GUEST)
            .unwrap()
            .accept(GUEST)
            .unwrap();
        assert_eq!(
            members.remove_participant(CREATOR),
            Err(MembershipError::CreatorImmovable)
        );
        assert!(members.is_participant(CREATOR));
    }

    #[test]
    fn removing_requires_participation() {
        let members = Members::new(CREATOR).invite(GUEST).unwrap();
        assert_eq!(
            members.remove_participant(GUEST),
            Err(MembershipError::NotParticipant)
        );
        assert_eq!(
            members.remove_participant(OTHER),
            Err(MembershipError::NotParticipant)
        );

        let removed = members
            .accept(GUEST)
            .unwrap()
            .remove_participant(GUEST)
            .unwrap();
        assert_eq!(removed.participants(), vec![CREATOR]);
        assert!(!removed.is_member(GUEST));
    }

    #[test]
    fn each_transition_is_a_single_record_write() {
        let initial = Members::new(CREATOR);
        let invited = initial.invite(GUEST).unwrap();
        assert_eq!(
            initial.changes_to(&invited),
            vec![MembershipChange::Added(GUEST, Membership::Invited)]
        );

        let accepted = invited.accept(GUEST).unwrap();
        assert_eq!(
            invited.changes_to(&accepted),
            vec![MembershipChange::Changed(GUEST, Membership::Participant)]
        );

        let kicked = accepted.remove_participant(GUEST).unwrap();
        assert_eq!(
            accepted.changes_to(&kicked),
            vec![MembershipChange::Removed(GUEST)]
        );
        assert!(kicked.changes_to(&kicked).is_empty());
    }

    #[test]
    fn from_records_requires_single_creator() {
        assert_eq!(
            Members::from_records([(GUEST, Membership::Participant)]),
            Err(MembershipError::CorruptedCreator)
        );
        assert_eq!(
            Members::from_records([(CREATOR, Membership::Creator), (GUEST, Membership::Creator)]),
            Err(MembershipError::CorruptedCreator)
        );

        let members = Members::from_records([
            (GUEST, Membership::Invited),
            (CREATOR, Membership::Creator),
            (OTHER, Membership::Participant),
        ])
        .unwrap();
        assert_eq!(members.creator(), CREATOR);
        assert_eq!(members.participants(), vec![CREATOR, OTHER]);
        assert_eq!(members.invited(), vec![GUEST]);
    }
}
