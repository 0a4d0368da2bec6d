use super::membership::MembershipError;
use super::policy::Denial;
use crate::app_errors::{error_response, ErrorKind};
use crate::utils::notifications::errors::NotificationError;
use crate::utils::users::errors::UserError;
use crate::validation::ValidateContentError;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VacationError {
    #[error("Vacation not found")]
    VacationNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Post not found")]
    PostNotFound,
    #[error("Post is not linked to this vacation")]
    LinkNotFound,
    #[error("Post is already linked to this vacation")]
    PostAlreadyLinked,
    #[error(transparent)]
    Forbidden(#[from] Denial),
    #[error(transparent)]
    Membership(#[from] MembershipError),
    #[error(transparent)]
    Invalid(#[from] ValidateContentError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl VacationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VacationError::VacationNotFound
            | VacationError::UserNotFound
            | VacationError::PostNotFound
            | VacationError::LinkNotFound => ErrorKind::NotFound,
            VacationError::PostAlreadyLinked => ErrorKind::Conflict,
            VacationError::Forbidden(_) => ErrorKind::Forbidden,
            VacationError::Membership(MembershipError::CorruptedCreator) => ErrorKind::Unexpected,
            VacationError::Membership(_) => ErrorKind::Conflict,
            VacationError::Invalid(_) => ErrorKind::Validation,
            VacationError::User(e) => e.kind(),
            VacationError::Notification(e) => e.kind(),
            VacationError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

impl IntoResponse for VacationError {
    fn into_response(self) -> Response {
        error_response(self.kind(), &self)
    }
}

impl From<sqlx::Error> for VacationError {
    fn from(e: sqlx::Error) -> Self {
        Self::Unexpected(anyhow::Error::from(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::vacations::policy::Action;
    use http::StatusCode;

    #[test]
    fn membership_conflicts_are_bad_requests() {
        let response = VacationError::from(MembershipError::AlreadyInvited).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn denials_are_forbidden() {
        let denial = Denial {
            action: Action::View,
            reason: "You are not allowed to view this vacation",
        };
        let response = VacationError::from(denial).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn missing_vacation_is_not_found() {
        assert_eq!(
            VacationError::VacationNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            VacationError::from(MembershipError::CorruptedCreator).kind(),
            ErrorKind::Unexpected
        );
    }
}
