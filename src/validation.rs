use thiserror::Error;

use crate::{
    routes::{
        posts::models::{CreateComment, CreatePost},
        vacations::models::CreateVacation,
    },
    utils::vacations::models::VacationDetails,
};

#[derive(Debug, Error)]
pub enum ValidateContentError {
    #[error("{0}")]
    Expected(String),
}

impl ValidateContentError {
    pub fn new(content: impl ToString) -> Self {
        Self::Expected(content.to_string())
    }
}

pub trait ValidateContent {
    fn validate_content(&self) -> Result<(), ValidateContentError>;
}

impl ValidateContent for VacationDetails {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        if self.name.trim().is_empty() {
            return Err(ValidateContentError::new("Vacation name is required"));
        }
        if self.location.trim().is_empty() {
            return Err(ValidateContentError::new("Vacation location is required"));
        }
        if self.end_date <= self.start_date {
            return Err(ValidateContentError::new(
                "Vacation must end after it starts",
            ));
        }
        if self.images.iter().any(|image| image.trim().is_empty()) {
            return Err(ValidateContentError::new("Image URL cannot be empty"));
        }
        Ok(())
    }
}

impl ValidateContent for CreateVacation {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        self.details().validate_content()
    }
}

impl ValidateContent for CreatePost {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        let has_text = self
            .text
            .as_deref()
            .map_or(false, |text| !text.trim().is_empty());
        if !has_text && self.images.is_empty() {
            return Err(ValidateContentError::new("Post must have text or image"));
        }
        if self.images.iter().any(|image| image.trim().is_empty()) {
            return Err(ValidateContentError::new("Image URL cannot be empty"));
        }
        Ok(())
    }
}

impl ValidateContent for CreateComment {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        if self.text.trim().is_empty() {
            return Err(ValidateContentError::new("Comment text is required"));
        }
        Ok(())
    }
}
