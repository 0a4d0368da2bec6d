use super::errors::VacationError;
use super::membership::{Members, MembershipError};
use super::policy::{authorize, Action};
use crate::routes::vacations::models::UpdateVacation;
use crate::validation::ValidateContent;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VacationStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl VacationStatus {
    pub fn on(today: Date, start_date: Date, end_date: Date) -> Self {
        if today < start_date {
            Self::Upcoming
        } else if today > end_date {
            Self::Completed
        } else {
            Self::Ongoing
        }
    }
}

/// Editable part of a vacation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacationDetails {
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: Date,
    pub end_date: Date,
    pub images: Vec<String>,
    pub is_private: bool,
}

impl VacationDetails {
    /// Applies the present fields of `changes`; text fields are trimmed.
    pub fn merged(&self, changes: &UpdateVacation) -> Self {
        let trimmed = |value: &Option<String>, current: &String| {
            value
                .as_deref()
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| current.clone())
        };

        Self {
            name: trimmed(&changes.name, &self.name),
            description: trimmed(&changes.description, &self.description),
            location: trimmed(&changes.location, &self.location),
            start_date: changes.start_date.unwrap_or(self.start_date),
            end_date: changes.end_date.unwrap_or(self.end_date),
            images: changes.images.clone().unwrap_or_else(|| self.images.clone()),
            is_private: changes.is_private.unwrap_or(self.is_private),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vacation {
    pub id: Uuid,
    pub details: VacationDetails,
    pub members: Members,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Vacation {
    pub fn status(&self, today: Date) -> VacationStatus {
        VacationStatus::on(today, self.details.start_date, self.details.end_date)
    }

    pub fn creator(&self) -> Uuid {
        self.members.creator()
    }

    pub fn invite(&self, actor: Uuid, target: Uuid) -> Result<Self, VacationError> {
        authorize(actor, self, Action::Invite)?;
        Ok(self.with_members(self.members.invite(target)?))
    }

    pub fn accept(&self, actor: Uuid) -> Result<Self, VacationError> {
        authorize(actor, self, Action::RespondToInvitation)?;
        Ok(self.with_members(self.members.accept(actor)?))
    }

    pub fn decline(&self, actor: Uuid) -> Result<Self, VacationError> {
        authorize(actor, self, Action::RespondToInvitation)?;
        Ok(self.with_members(self.members.decline(actor)?))
    }

    pub fn kick(&self, actor: Uuid, target: Uuid) -> Result<Self, VacationError> {
        authorize(actor, self, Action::Kick)?;
        Ok(self.with_members(self.members.remove_participant(target)?))
    }

    pub fn leave(&self, actor: Uuid) -> Result<Self, VacationError> {
        authorize(actor, self, Action::Leave)?;
        if self.members.is_creator(actor) {
            return Err(MembershipError::CreatorImmovable.into());
        }
        Ok(self.with_members(self.members.remove_participant(actor)?))
    }

    pub fn edit(&self, actor: Uuid, changes: &UpdateVacation) -> Result<Self, VacationError> {
        authorize(actor, self, Action::Edit)?;
        let details = self.details.merged(changes);
        details.validate_content()?;
        Ok(Self {
            details,
            ..self.clone()
        })
    }

    fn with_members(&self, members: Members) -> Self {
        Self {
            members,
            ..self.clone()
        }
    }
}
