pub mod models;

use crate::config::environment::Environment;
use crate::config::tokens::JwtSettings;
use crate::modules::extractors::JsonBody;
use crate::modules::AppState;
use crate::routes::auth::models::{LoginCredentials, RegisterCredentials};
use crate::routes::users::models::UserSummary;
use crate::routes::Message;
use crate::utils::auth::errors::AuthError;
use crate::utils::auth::models::{Claims, RefreshClaims};
use crate::utils::auth::*;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use http::StatusCode;
use secrecy::SecretString;
use sqlx::PgPool;
use tracing::debug;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(post_register_user))
        .route("/login", post(post_login_user))
        .route("/logout", post(post_logout_user))
        .route("/refresh", post(post_refresh_user_token))
        .route("/me", get(get_me))
}

/// Register a new user and sign them in
#[utoipa::path(post, path = "/api/auth/register", tag = "auth", request_body = RegisterCredentials, responses((status = 201, body = UserSummary, description = "User registered")))]
pub async fn post_register_user(
    State(pool): State<PgPool>,
    State(jwt): State<JwtSettings>,
    State(environment): State<Environment>,
    jar: CookieJar,
    JsonBody(credentials): JsonBody<RegisterCredentials>,
) -> Result<(StatusCode, CookieJar, Json<UserSummary>), AuthError> {
    let user_id = try_register_user(&pool, &credentials).await?;

    let mut conn = pool.acquire().await?;
    let user = get_current_user(&mut conn, user_id).await?;
    let jar = generate_token_cookies(user_id, &user.username, &jwt, !environment.is_dev(), jar)?;

    debug!("User {} ({}) registered successfully", user_id, user.username);

    Ok((StatusCode::CREATED, jar, Json(user)))
}

/// Sign in with username and password
#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = LoginCredentials, responses((status = 200, body = UserSummary, description = "User logged in")))]
pub async fn post_login_user(
    State(pool): State<PgPool>,
    State(jwt): State<JwtSettings>,
    State(environment): State<Environment>,
    jar: CookieJar,
    JsonBody(credentials): JsonBody<LoginCredentials>,
) -> Result<(CookieJar, Json<UserSummary>), AuthError> {
    let mut conn = pool.acquire().await?;
    let user_id = verify_user_credentials(
        &mut conn,
        &credentials.username,
        SecretString::new(credentials.password),
    )
    .await?;

    let user = get_current_user(&mut conn, user_id).await?;
    let jar = generate_token_cookies(user_id, &user.username, &jwt, !environment.is_dev(), jar)?;

    debug!("User {} ({}) logged in successfully", user_id, user.username);

    Ok((jar, Json(user)))
}

/// Drop the token cookies
#[utoipa::path(post, path = "/api/auth/logout", tag = "auth", responses((status = 200, body = Message, description = "User logged out")))]
pub async fn post_logout_user(jar: CookieJar) -> (CookieJar, Json<Message>) {
    debug!("User logged out successfully");
    (
        remove_token_cookies(jar),
        Json(Message::new("Logged out successfully")),
    )
}

/// Issue a fresh token pair from the refresh token
#[utoipa::path(post, path = "/api/auth/refresh", tag = "auth", responses((status = 200, body = Message, description = "Tokens refreshed"), (status = 401, description = "Invalid refresh token")))]
pub async fn post_refresh_user_token(
    State(jwt): State<JwtSettings>,
    State(environment): State<Environment>,
    jar: CookieJar,
    refresh_claims: RefreshClaims,
) -> Result<(CookieJar, Json<Message>), AuthError> {
    let jar = generate_token_cookies(
        refresh_claims.user_id,
        &refresh_claims.username,
        &jwt,
        !environment.is_dev(),
        jar,
    )?;

    debug!(
        "User {} ({})'s access token refreshed successfully",
        refresh_claims.user_id, refresh_claims.username
    );

    Ok((jar, Json(Message::new("Tokens refreshed"))))
}

/// Currently signed in user
#[utoipa::path(get, path = "/api/auth/me", tag = "auth", responses((status = 200, body = UserSummary), (status = 401, description = "Invalid token")))]
pub async fn get_me(claims: Claims, State(pool): State<PgPool>) -> Result<Json<UserSummary>, AuthError> {
    let mut conn = pool.acquire().await?;
    let user = get_current_user(&mut conn, claims.user_id).await?;
    Ok(Json(user))
}
