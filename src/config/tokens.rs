use crate::config::get_secret_env;
use secrecy::Secret;
use serde::Deserialize;
use time::Duration;
use tracing::warn;

pub const NAME_ACCESS_SECRET: &str = "JWT_ACCESS_SECRET";
pub const NAME_REFRESH_SECRET: &str = "JWT_REFRESH_SECRET";

const ACCESS_SECRET: &str = "ACCESS_SECRET";
const REFRESH_SECRET: &str = "REFRESH_SECRET";

const ACCESS_EXPIRATION: Duration = Duration::minutes(15);
const REFRESH_EXPIRATION: Duration = Duration::days(7);
const SUPER_EXPIRATION: Duration = Duration::days(2137);

#[derive(Deserialize)]
pub struct JwtSettingsModel {
    pub access: Option<TokenDataModel>,
    pub refresh: Option<TokenDataModel>,
    pub is_super_user: Option<bool>,
}

#[derive(Deserialize)]
pub struct TokenDataModel {
    pub token: Option<String>,
    pub expiration_minutes: Option<i64>,
}

impl TokenDataModel {
    fn to_token_data(self, default_secret: &str, default_expiration: Duration) -> TokenData {
        let expiration = self.expiration_minutes.map_or(default_expiration, |minutes| {
            let expiration = Duration::minutes(minutes);
            warn!("Using custom token expiration of {expiration}");
            expiration
        });
        TokenData::new(
            self.token.as_deref().unwrap_or(default_secret),
            expiration,
        )
    }
}

impl JwtSettingsModel {
    pub fn to_settings(self) -> JwtSettings {
        if self.is_super_user.unwrap_or(false) {
            warn!("Using super tokens");
            return JwtSettings::new(ACCESS_SECRET, REFRESH_SECRET);
        }

        let access = self.access.map_or_else(
            || {
                warn!("Using default access token");
                TokenData::new(ACCESS_SECRET, ACCESS_EXPIRATION)
            },
            |t| t.to_token_data(ACCESS_SECRET, ACCESS_EXPIRATION),
        );

        let refresh = self.refresh.map_or_else(
            || {
                warn!("Using default refresh token");
                TokenData::new(REFRESH_SECRET, REFRESH_EXPIRATION)
            },
            |t| t.to_token_data(REFRESH_SECRET, REFRESH_EXPIRATION),
        );

        JwtSettings { access, refresh }
    }
}

#[derive(Clone)]
pub struct TokenData {
    pub token: Secret<String>,
    pub expiration: Duration,
}

impl TokenData {
    fn new(token: &str, expiration: Duration) -> Self {
        Self {
            token: Secret::new(token.to_owned()),
            expiration,
        }
    }
}

#[derive(Clone)]
pub struct JwtSettings {
    pub access: TokenData,
    pub refresh: TokenData,
}

impl JwtSettings {
    /// Long-lived secrets, used by tests and super user setups.
    pub fn new(access: &str, refresh: &str) -> Self {
        Self {
            access: TokenData::new(access, SUPER_EXPIRATION),
            refresh: TokenData::new(refresh, SUPER_EXPIRATION),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            access: TokenData {
                token: get_secret_env(NAME_ACCESS_SECRET)?,
                expiration: ACCESS_EXPIRATION,
            },
            refresh: TokenData {
                token: get_secret_env(NAME_REFRESH_SECRET)?,
                expiration: REFRESH_EXPIRATION,
            },
        })
    }
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            access: TokenData::new(ACCESS_SECRET, ACCESS_EXPIRATION),
            refresh: TokenData::new(REFRESH_SECRET, REFRESH_EXPIRATION),
        }
    }
}
