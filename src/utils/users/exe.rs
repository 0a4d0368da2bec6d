use crate::modules::database::PgQuery;
use crate::routes::users::models::{FollowToggled, UpdateProfile, UserProfile, UserSummary};
use crate::utils::auth::additions::{hash_pass, pass_is_strong, verify_pass};
use crate::utils::notifications::models::NotificationEvent;
use crate::utils::notifications::NotificationQuery;
use crate::utils::users::errors::UserError;
use crate::utils::users::UserQuery;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

pub async fn get_profile(
    pool: &PgPool,
    user_id: Uuid,
    username: &str,
) -> Result<UserProfile, UserError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(UserQuery::new(user_id), &mut conn);
    q.profile(username).await?.ok_or(UserError::UserNotFound)
}

pub async fn get_followers(
    pool: &PgPool,
    user_id: Uuid,
    username: &str,
) -> Result<Vec<UserSummary>, UserError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(UserQuery::new(user_id), &mut conn);
    let target = q
        .user_id_by_username(username)
        .await?
        .ok_or(UserError::UserNotFound)?;
    q.followers_of(target).await
}

pub async fn get_following(
    pool: &PgPool,
    user_id: Uuid,
    username: Option<&str>,
) -> Result<Vec<UserSummary>, UserError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(UserQuery::new(user_id), &mut conn);
    let target = match username {
        Some(username) => q
            .user_id_by_username(username)
            .await?
            .ok_or(UserError::UserNotFound)?,
        None => user_id,
    };
    q.following_of(target).await
}

pub async fn get_suggested(pool: &PgPool, user_id: Uuid) -> Result<Vec<UserSummary>, UserError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(UserQuery::new(user_id), &mut conn);
    q.suggested().await
}

/// Follows or unfollows `target_id`. Only a new follow notifies the target.
pub async fn toggle_follow(
    pool: &PgPool,
    user_id: Uuid,
    target_id: Uuid,
) -> Result<FollowToggled, UserError> {
    if user_id == target_id {
        return Err(UserError::SelfFollow);
    }

    let mut tx = pool.begin().await?;
    let mut q = PgQuery::new(UserQuery::new(user_id), &mut tx);
    if !q.user_exists(target_id).await? {
        return Err(UserError::UserNotFound);
    }

    let following = if q.is_following(target_id).await? {
        q.unfollow(target_id).await?;
        false
    } else {
        q.follow(target_id).await?;
        q.rebind(NotificationQuery::new(user_id))
            .notify(target_id, NotificationEvent::Follow)
            .await?;
        true
    };
    tx.commit().await?;

    debug!("User {user_id} following {target_id}: {following}");
    let message = if following {
        "User followed successfully"
    } else {
        "User unfollowed successfully"
    };
    Ok(FollowToggled {
        message: message.to_string(),
        following,
    })
}

/// Applies the requester's profile changes and returns the updated profile.
/// Changing the password needs both the current and the new one.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    body: UpdateProfile,
) -> Result<UserProfile, UserError> {
    let body = body.normalized();
    body.validate()?;

    let mut tx = pool.begin().await?;
    let mut q = PgQuery::new(UserQuery::new(user_id), &mut tx);
    let mut account = q.account().await?.ok_or(UserError::UserNotFound)?;

    match (body.current_password, body.new_password) {
        (None, None) => {}
        (Some(current), Some(new)) => {
            if !verify_pass(current, account.password.clone())? {
                return Err(UserError::WrongPassword);
            }
            let full_name = body.full_name.as_deref().unwrap_or(&account.full_name);
            if !pass_is_strong(&new, &[&account.username, full_name]) {
                return Err(UserError::WeakPassword);
            }
            account.password = hash_pass(new)?;
        }
        _ => return Err(UserError::MissingPassword),
    }

    if let Some(username) = body.username {
        if username != account.username {
            if q.user_id_by_username(&username).await?.is_some() {
                return Err(UserError::UsernameTaken);
            }
            account.username = username;
        }
    }
    if let Some(full_name) = body.full_name {
        account.full_name = full_name;
    }
    if let Some(bio) = body.bio {
        account.bio = bio;
    }
    if let Some(link) = body.link {
        account.link = link;
    }
    if body.profile_img.is_some() {
        account.profile_img = body.profile_img;
    }

    q.update_account(&account).await?;
    let profile = q
        .profile(&account.username)
        .await?
        .ok_or(UserError::UserNotFound)?;
    tx.commit().await?;

    debug!("Profile of {user_id} updated");
    Ok(profile)
}
