use crate::config::tokens::{JwtSettings, TokenData};
use crate::utils::auth::errors::AuthError;
use anyhow::Context;
use axum::extract::FromRef;
use axum::{async_trait, extract::FromRequestParts, RequestPartsExt};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use http::request::Parts;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use time::Duration;
use uuid::Uuid;

pub const ACCESS_COOKIE: &str = "jwt";
pub const REFRESH_COOKIE: &str = "refresh-jwt";

pub trait AuthToken
where
    Self: DeserializeOwned + Serialize + Send + Sized,
{
    const NAME: &'static str;

    fn token_data(settings: &JwtSettings) -> &TokenData;

    fn generate_cookie(token: String, secure: bool) -> Cookie<'static> {
        Cookie::build(Self::NAME, token)
            .http_only(true)
            .secure(secure)
            .same_site(SameSite::Strict)
            .path("/")
            .finish()
    }

    fn generate_jwt(&self, key: &Secret<String>) -> Result<String, AuthError> {
        Ok(encode(
            &Header::default(),
            &self,
            &EncodingKey::from_secret(key.expose_secret().as_bytes()),
        )
        .context("Failed to encrypt token")?)
    }

    fn get_jwt_cookie(jar: &CookieJar) -> Result<Cookie<'static>, AuthError> {
        jar.get(Self::NAME)
            .map(|cookie| cookie.clone().into_owned())
            .ok_or(AuthError::InvalidToken)
    }

    fn decode_jwt(token: &str, key: &Secret<String>) -> Result<Self, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 5;

        let data = decode::<Self>(
            token,
            &DecodingKey::from_secret(key.expose_secret().as_bytes()),
            &validation,
        )
        .map_err(|_e| AuthError::InvalidToken)?;

        Ok(data.claims)
    }
}

/// Access token claims; extracting them authenticates the request.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    pub jti: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub exp: u64,
}

impl Claims {
    pub fn new(user_id: Uuid, username: &str, duration: Duration) -> Self {
        Self {
            jti: Uuid::new_v4(),
            user_id,
            username: username.to_string(),
            exp: expires_in(duration),
        }
    }
}

impl AuthToken for Claims {
    const NAME: &'static str = ACCESS_COOKIE;

    fn token_data(settings: &JwtSettings) -> &TokenData {
        &settings.access
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RefreshClaims {
    pub jti: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub exp: u64,
}

impl RefreshClaims {
    pub fn new(user_id: Uuid, username: &str, duration: Duration) -> Self {
        Self {
            jti: Uuid::new_v4(),
            user_id,
            username: username.to_string(),
            exp: expires_in(duration),
        }
    }
}

impl AuthToken for RefreshClaims {
    const NAME: &'static str = REFRESH_COOKIE;

    fn token_data(settings: &JwtSettings) -> &TokenData {
        &settings.refresh
    }
}

fn expires_in(duration: Duration) -> u64 {
    jsonwebtoken::get_current_timestamp() + duration.whole_seconds().unsigned_abs()
}

#[async_trait]
impl<S> FromRequestParts<S> for Claims
where
    JwtSettings: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(req: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        verify_token::<Self>(req, &JwtSettings::from_ref(state)).await
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RefreshClaims
where
    JwtSettings: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(req: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        verify_token::<Self>(req, &JwtSettings::from_ref(state)).await
    }
}

async fn verify_token<T: AuthToken>(req: &mut Parts, settings: &JwtSettings) -> Result<T, AuthError> {
    let jar = req
        .extract::<CookieJar>()
        .await
        .context("Failed to fetch cookie jar")?;

    let cookie = T::get_jwt_cookie(&jar)?;
    T::decode_jwt(cookie.value(), &T::token_data(settings).token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_survive_signing() {
        let settings = JwtSettings::default();
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, "mai", settings.access.expiration);

        let token = claims.generate_jwt(&settings.access.token).unwrap();
        let decoded = Claims::decode_jwt(&token, &settings.access.token).unwrap();
        assert_eq!(decoded.user_id, user_id);
        assert_eq!(decoded.username, "mai");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let settings = JwtSettings::default();
        let claims = RefreshClaims::new(Uuid::new_v4(), "mai", settings.refresh.expiration);
        let token = claims.generate_jwt(&settings.refresh.token).unwrap();

        assert!(matches!(
            Claims::decode_jwt(&token, &settings.access.token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn cookies_are_http_only() {
        let cookie = Claims::generate_cookie("token".to_string(), false);
        assert_eq!(cookie.name(), ACCESS_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_ne!(cookie.secure(), Some(true));
    }
}
