use crate::modules::database::PgQuery;
use crate::routes::posts::models::{CreateComment, CreatePost, LikeToggled, PostView};
use crate::utils::notifications::models::NotificationEvent;
use crate::utils::notifications::NotificationQuery;
use crate::utils::posts::errors::PostError;
use crate::utils::posts::PostQuery;
use crate::utils::users::errors::UserError;
use crate::utils::users::UserQuery;
use crate::validation::ValidateContent;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

pub async fn create_new_post(
    pool: &PgPool,
    user_id: Uuid,
    body: CreatePost,
) -> Result<PostView, PostError> {
    body.validate_content()?;

    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(PostQuery::new(user_id), &mut conn);
    let post_id = q.create_post(&body).await?;
    q.get_post(post_id).await?.ok_or(PostError::PostNotFound)
}

pub async fn delete_own_post(pool: &PgPool, user_id: Uuid, post_id: Uuid) -> Result<(), PostError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(PostQuery::new(user_id), &mut conn);

    match q.author_of(post_id).await? {
        None => Err(PostError::PostNotFound),
        Some(author) if author != user_id => Err(PostError::NotAuthor),
        Some(_) => {
            q.delete_post(post_id).await?;
            debug!("Deleted post {post_id}");
            Ok(())
        }
    }
}

pub async fn get_all_posts(pool: &PgPool, user_id: Uuid) -> Result<Vec<PostView>, PostError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(PostQuery::new(user_id), &mut conn);
    q.all_posts().await
}

pub async fn get_following_posts(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<PostView>, PostError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(PostQuery::new(user_id), &mut conn);
    q.following_posts().await
}

pub async fn get_user_posts(
    pool: &PgPool,
    user_id: Uuid,
    username: &str,
) -> Result<Vec<PostView>, PostError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(PostQuery::new(user_id), &mut conn);
    let author = q
        .rebind(UserQuery::new(user_id))
        .user_id_by_username(username)
        .await?
        .ok_or(UserError::UserNotFound)?;
    q.posts_of(author).await
}

pub async fn get_liked_posts(
    pool: &PgPool,
    user_id: Uuid,
    liker_id: Uuid,
) -> Result<Vec<PostView>, PostError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(PostQuery::new(user_id), &mut conn);
    if !q.rebind(UserQuery::new(user_id)).user_exists(liker_id).await? {
        return Err(UserError::UserNotFound.into());
    }
    q.liked_by(liker_id).await
}

/// Posts linked to vacations the requester created or participates in.
pub async fn get_vacation_feed(pool: &PgPool, user_id: Uuid) -> Result<Vec<PostView>, PostError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(PostQuery::new(user_id), &mut conn);
    q.vacation_feed().await
}

pub async fn comment_on_post(
    pool: &PgPool,
    user_id: Uuid,
    post_id: Uuid,
    body: CreateComment,
) -> Result<PostView, PostError> {
    body.validate_content()?;

    let mut tx = pool.begin().await?;
    let mut q = PgQuery::new(PostQuery::new(user_id), &mut tx);
    if q.author_of(post_id).await?.is_none() {
        return Err(PostError::PostNotFound);
    }
    let comment_id = q.add_comment(post_id, &body.text).await?;
    let post = q.get_post(post_id).await?.ok_or(PostError::PostNotFound)?;
    tx.commit().await?;

    debug!("Comment {comment_id} added to post {post_id}");
    Ok(post)
}

/// Likes or unlikes the post. Only a new like on someone else's post notifies its author.
pub async fn toggle_post_like(
    pool: &PgPool,
    user_id: Uuid,
    post_id: Uuid,
) -> Result<LikeToggled, PostError> {
    let mut tx = pool.begin().await?;
    let mut q = PgQuery::new(PostQuery::new(user_id), &mut tx);

    let author = q.author_of(post_id).await?.ok_or(PostError::PostNotFound)?;
    let message = if q.is_liked(post_id).await? {
        q.unlike(post_id).await?;
        "Post unliked successfully"
    } else {
        q.like(post_id).await?;
        if author != user_id {
            q.rebind(NotificationQuery::new(user_id))
                .notify(author, NotificationEvent::Like)
                .await?;
        }
        "Post liked successfully"
    };
    let likes = q.likes_of(post_id).await?;
    tx.commit().await?;

    Ok(LikeToggled {
        message: message.to_string(),
        likes,
    })
}
