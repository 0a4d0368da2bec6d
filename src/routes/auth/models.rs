use crate::utils::auth::additions::is_valid_username;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterCredentials {
    #[validate(length(min = 3, max = 30), custom = "is_valid_username")]
    pub username: String,
    #[validate(length(min = 1, max = 64))]
    pub full_name: String,
    pub password: String,
}

impl RegisterCredentials {
    pub fn new(username: &str, full_name: &str, password: &str) -> Self {
        Self {
            username: username.into(),
            full_name: full_name.into(),
            password: password.into(),
        }
    }
}
