pub mod errors;
pub mod exe;

use self::errors::UserError;
use crate::modules::database::PgQuery;
use crate::routes::users::models::{AccountRow, UserProfile, UserSummary};
use sqlx::{query, query_as, query_scalar};
use tracing::trace;
use uuid::Uuid;

pub const SUGGESTED_USERS: i64 = 4;

pub struct UserQuery {
    user_id: Uuid,
}

impl UserQuery {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

impl<'c> PgQuery<'c, UserQuery> {
    pub async fn profile(&mut self, username: &str) -> Result<Option<UserProfile>, UserError> {
        let profile = query_as::<_, UserProfile>(
            r#"
                SELECT u.id, u.username, u.full_name, u.profile_img, u.bio, u.link, u.created_at,
                    (SELECT COUNT(*) FROM follows WHERE followee_id = u.id) AS followers,
                    (SELECT COUNT(*) FROM follows WHERE follower_id = u.id) AS following,
                    EXISTS (
                        SELECT 1 FROM follows WHERE follower_id = $2 AND followee_id = u.id
                    ) AS is_followed
                FROM users u
                WHERE u.username = $1
            "#,
        )
        .bind(username)
        .bind(self.payload.user_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(profile)
    }

    pub async fn user_id_by_username(&mut self, username: &str) -> Result<Option<Uuid>, UserError> {
        let id: Option<Uuid> = query_scalar("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(id)
    }

    pub async fn user_exists(&mut self, user_id: Uuid) -> Result<bool, UserError> {
        let exists: bool = query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(exists)
    }

    pub async fn followers_of(&mut self, user_id: Uuid) -> Result<Vec<UserSummary>, UserError> {
        let followers = query_as::<_, UserSummary>(
            r#"
                SELECT u.id, u.username, u.full_name, u.profile_img
                FROM follows f
                JOIN users u ON u.id = f.follower_id
                WHERE f.followee_id = $1
                ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(followers)
    }

    pub async fn following_of(&mut self, user_id: Uuid) -> Result<Vec<UserSummary>, UserError> {
        let following = query_as::<_, UserSummary>(
            r#"
                SELECT u.id, u.username, u.full_name, u.profile_img
                FROM follows f
                JOIN users u ON u.id = f.followee_id
                WHERE f.follower_id = $1
                ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(following)
    }

    /// Random users the requester does not follow yet.
    pub async fn suggested(&mut self) -> Result<Vec<UserSummary>, UserError> {
        let users = query_as::<_, UserSummary>(
            r#"
                SELECT u.id, u.username, u.full_name, u.profile_img
                FROM users u
                WHERE u.id <> $1
                    AND u.id NOT IN (SELECT followee_id FROM follows WHERE follower_id = $1)
                ORDER BY random()
                LIMIT $2
            "#,
        )
        .bind(self.payload.user_id)
        .bind(SUGGESTED_USERS)
        .fetch_all(&mut *self.conn)
        .await?;

        trace!("Suggesting {} user(s)", users.len());
        Ok(users)
    }

    pub async fn is_following(&mut self, target_id: Uuid) -> Result<bool, UserError> {
        let following: bool = query_scalar(
            "SELECT EXISTS (SELECT 1 FROM follows WHERE follower_id = $1 AND followee_id = $2)",
        )
        .bind(self.payload.user_id)
        .bind(target_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(following)
    }

    pub async fn follow(&mut self, target_id: Uuid) -> Result<(), UserError> {
        query("INSERT INTO follows (follower_id, followee_id) VALUES ($1, $2)")
            .bind(self.payload.user_id)
            .bind(target_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(())
    }

    pub async fn unfollow(&mut self, target_id: Uuid) -> Result<(), UserError> {
        query("DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2")
            .bind(self.payload.user_id)
            .bind(target_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(())
    }

    /// The requester's stored account, including the password hash.
    pub async fn account(&mut self) -> Result<Option<AccountRow>, UserError> {
        let account = query_as::<_, AccountRow>(
            r#"
                SELECT username, full_name, password, bio, link, profile_img
                FROM users WHERE id = $1
            "#,
        )
        .bind(self.payload.user_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(account)
    }

    pub async fn update_account(&mut self, account: &AccountRow) -> Result<(), UserError> {
        query(
            r#"
                UPDATE users
                SET username = $2, full_name = $3, password = $4, bio = $5, link = $6,
                    profile_img = $7
                WHERE id = $1
            "#,
        )
        .bind(self.payload.user_id)
        .bind(&account.username)
        .bind(&account.full_name)
        .bind(&account.password)
        .bind(&account.bio)
        .bind(&account.link)
        .bind(&account.profile_img)
        .execute(&mut *self.conn)
        .await?;

        trace!("Account {} updated", self.payload.user_id);
        Ok(())
    }
}
