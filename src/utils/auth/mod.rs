pub mod additions;
pub mod errors;
pub mod models;

use crate::config::tokens::JwtSettings;
use crate::modules::database::PgQuery;
use crate::routes::auth::models::RegisterCredentials;
use crate::routes::users::models::UserSummary;
use crate::utils::auth::additions::{hash_pass, pass_is_strong, verify_pass};
use axum_extra::extract::{cookie::Cookie, CookieJar};
use errors::*;
use models::*;
use secrecy::{ExposeSecret, SecretString};
use sqlx::{query_as, query_scalar, Acquire, FromRow, PgConnection, Postgres};
use time::Duration;
use tracing::{debug, trace};
use uuid::Uuid;
use validator::Validate;

pub async fn try_register_user<'c>(
    acq: impl Acquire<'c, Database = Postgres>,
    credentials: &RegisterCredentials,
) -> Result<Uuid, AuthError> {
    let username = credentials.username.trim();
    let full_name = credentials.full_name.trim();
    let password = &credentials.password;

    if username.is_empty() || full_name.is_empty() || password.trim().is_empty() {
        return Err(AuthError::MissingCredential);
    }

    credentials.validate()?;

    if !pass_is_strong(password, &[username, full_name]) {
        return Err(AuthError::WeakPassword);
    }

    let mut transaction = acq.begin().await?;
    let mut user = PgQuery::new(AuthUser::new(username), &mut transaction);

    if !user.is_new().await? {
        return Err(AuthError::UserAlreadyExists);
    }

    let hashed_pass = hash_pass(password.to_owned())?;
    let user_id = user.create_account(full_name, hashed_pass).await?;

    transaction.commit().await?;

    Ok(user_id)
}

pub async fn verify_user_credentials(
    conn: &mut PgConnection,
    username: &str,
    password: SecretString,
) -> Result<Uuid, AuthError> {
    debug!("Verifying credentials");
    if username.trim().is_empty() || password.expose_secret().trim().is_empty() {
        return Err(AuthError::MissingCredential);
    }

    let mut q = PgQuery::new(AuthUser::new(username.trim()), conn);
    q.verify_credentials(password).await
}

pub async fn get_current_user(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<UserSummary, AuthError> {
    let user = query_as::<_, UserSummary>(
        "SELECT id, username, full_name, profile_img FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(AuthError::InvalidToken)?;

    Ok(user)
}

pub fn generate_token_cookies(
    user_id: Uuid,
    username: &str,
    settings: &JwtSettings,
    secure: bool,
    jar: CookieJar,
) -> Result<CookieJar, AuthError> {
    let access_cookie = generate_jwt_in_cookie(
        Claims::new(user_id, username, settings.access.expiration),
        &settings.access.token,
        secure,
    )?;

    let refresh_cookie = generate_jwt_in_cookie(
        RefreshClaims::new(user_id, username, settings.refresh.expiration),
        &settings.refresh.token,
        secure,
    )?;

    Ok(jar.add(access_cookie).add(refresh_cookie))
}

pub fn remove_token_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(expired_cookie(ACCESS_COOKIE))
        .remove(expired_cookie(REFRESH_COOKIE))
}

fn expired_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name, "")
        .path("/")
        .max_age(Duration::seconds(0))
        .finish()
}

fn generate_jwt_in_cookie<T: AuthToken>(
    payload: T,
    secret: &SecretString,
    secure: bool,
) -> Result<Cookie<'static>, AuthError> {
    let token = payload.generate_jwt(secret)?;
    let cookie = T::generate_cookie(token, secure);
    trace!("JWT: {cookie}");

    Ok(cookie)
}

#[derive(FromRow)]
struct QCredentials {
    id: Uuid,
    password: String,
}

pub struct AuthUser<'u> {
    username: &'u str,
}

impl<'u> AuthUser<'u> {
    fn new(username: &'u str) -> Self {
        Self { username }
    }
}

impl<'c, 'u> PgQuery<'c, AuthUser<'u>> {
    async fn create_account(
        &mut self,
        full_name: &str,
        hashed_password: String,
    ) -> Result<Uuid, AuthError> {
        let user_id: Uuid = query_scalar(
            r#"
                INSERT INTO users (username, full_name, password)
                VALUES ($1, $2, $3)
                RETURNING id
            "#,
        )
        .bind(self.payload.username)
        .bind(full_name)
        .bind(hashed_password)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(user_id)
    }

    async fn is_new(&mut self) -> Result<bool, AuthError> {
        let taken: bool = query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
            .bind(self.payload.username)
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(!taken)
    }

    async fn verify_credentials(&mut self, password: SecretString) -> Result<Uuid, AuthError> {
        let res = query_as::<_, QCredentials>("SELECT id, password FROM users WHERE username = $1")
            .bind(self.payload.username)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or(AuthError::WrongUsernameOrPassword)?;

        if verify_pass(password.expose_secret().to_owned(), res.password)? {
            return Ok(res.id);
        }
        Err(AuthError::WrongUsernameOrPassword)
    }
}
