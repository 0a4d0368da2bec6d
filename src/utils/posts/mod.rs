pub mod errors;
pub mod exe;

use self::errors::PostError;
use crate::modules::database::PgQuery;
use crate::routes::posts::models::{CommentView, CreatePost, PostView};
use crate::routes::users::models::UserSummary;
use sqlx::types::Json;
use sqlx::{query, query_as, query_scalar, FromRow};
use time::OffsetDateTime;
use tracing::trace;
use uuid::Uuid;

/// Post columns joined with the author, the ids of users who liked it and its comments
/// (oldest first, as JSON). Callers append their own `WHERE`/`ORDER BY` clauses.
pub const SELECT_POSTS: &str = r#"
    SELECT p.id, p.text, p.images, p.created_at,
        u.id AS user_id, u.username, u.full_name, u.profile_img,
        ARRAY(
            SELECT l.user_id FROM post_likes l
            WHERE l.post_id = p.id
            ORDER BY l.created_at
        ) AS likes,
        COALESCE((
            SELECT json_agg(json_build_object(
                'id', c.id,
                'text', c.text,
                'created_at', c.created_at,
                'user', json_build_object(
                    'id', cu.id,
                    'username', cu.username,
                    'full_name', cu.full_name,
                    'profile_img', cu.profile_img
                )
            ) ORDER BY c.created_at)
            FROM post_comments c
            JOIN users cu ON cu.id = c.user_id
            WHERE c.post_id = p.id
        ), '[]'::json) AS comments
    FROM posts p
    JOIN users u ON u.id = p.user_id
"#;

#[derive(FromRow)]
pub struct QPost {
    id: Uuid,
    text: Option<String>,
    images: Vec<String>,
    created_at: OffsetDateTime,
    user_id: Uuid,
    username: String,
    full_name: String,
    profile_img: Option<String>,
    likes: Vec<Uuid>,
    comments: Json<Vec<CommentView>>,
}

impl From<QPost> for PostView {
    fn from(p: QPost) -> Self {
        Self {
            id: p.id,
            user: UserSummary {
                id: p.user_id,
                username: p.username,
                full_name: p.full_name,
                profile_img: p.profile_img,
            },
            text: p.text,
            images: p.images,
            likes: p.likes,
            comments: p.comments.0,
            created_at: p.created_at,
        }
    }
}

pub struct PostQuery {
    user_id: Uuid,
}

impl PostQuery {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

impl<'c> PgQuery<'c, PostQuery> {
    pub async fn create_post(&mut self, post: &CreatePost) -> Result<Uuid, PostError> {
        let id: Uuid = query_scalar(
            r#"
                INSERT INTO posts (user_id, text, images)
                VALUES ($1, $2, $3)
                RETURNING id
            "#,
        )
        .bind(self.payload.user_id)
        .bind(post.text.as_deref().map(str::trim).filter(|text| !text.is_empty()))
        .bind(&post.images)
        .fetch_one(&mut *self.conn)
        .await?;

        trace!("Created post {id}");
        Ok(id)
    }

    pub async fn get_post(&mut self, post_id: Uuid) -> Result<Option<PostView>, PostError> {
        let post = query_as::<_, QPost>(&format!("{SELECT_POSTS} WHERE p.id = $1"))
            .bind(post_id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(post.map(PostView::from))
    }

    pub async fn author_of(&mut self, post_id: Uuid) -> Result<Option<Uuid>, PostError> {
        let author: Option<Uuid> = query_scalar("SELECT user_id FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(author)
    }

    pub async fn delete_post(&mut self, post_id: Uuid) -> Result<(), PostError> {
        query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(())
    }

    pub async fn all_posts(&mut self) -> Result<Vec<PostView>, PostError> {
        self.fetch_posts(&format!("{SELECT_POSTS} ORDER BY p.created_at DESC"), None)
            .await
    }

    pub async fn following_posts(&mut self) -> Result<Vec<PostView>, PostError> {
        let sql = format!(
            r#"{SELECT_POSTS}
                WHERE p.user_id IN (SELECT followee_id FROM follows WHERE follower_id = $1)
                ORDER BY p.created_at DESC
            "#
        );
        let user_id = self.payload.user_id;
        self.fetch_posts(&sql, Some(user_id)).await
    }

    pub async fn posts_of(&mut self, author_id: Uuid) -> Result<Vec<PostView>, PostError> {
        let sql = format!("{SELECT_POSTS} WHERE p.user_id = $1 ORDER BY p.created_at DESC");
        self.fetch_posts(&sql, Some(author_id)).await
    }

    /// Posts liked by `user_id`, most recent like first.
    pub async fn liked_by(&mut self, user_id: Uuid) -> Result<Vec<PostView>, PostError> {
        let sql = format!(
            r#"{SELECT_POSTS}
                JOIN post_likes pl ON pl.post_id = p.id
                WHERE pl.user_id = $1
                ORDER BY pl.created_at DESC
            "#
        );
        self.fetch_posts(&sql, Some(user_id)).await
    }

    /// Posts linked to vacations the requester created or participates in, newest first.
    pub async fn vacation_feed(&mut self) -> Result<Vec<PostView>, PostError> {
        let sql = format!(
            r#"{SELECT_POSTS}
                WHERE p.id IN (
                    SELECT pv.post_id FROM post_vacations pv
                    JOIN vacation_members m ON m.vacation_id = pv.vacation_id
                    WHERE m.user_id = $1 AND m.state IN ('creator', 'participant')
                )
                ORDER BY p.created_at DESC
            "#
        );
        let user_id = self.payload.user_id;
        self.fetch_posts(&sql, Some(user_id)).await
    }

    pub async fn add_comment(&mut self, post_id: Uuid, text: &str) -> Result<Uuid, PostError> {
        let id: Uuid = query_scalar(
            r#"
                INSERT INTO post_comments (post_id, user_id, text)
                VALUES ($1, $2, $3)
                RETURNING id
            "#,
        )
        .bind(post_id)
        .bind(self.payload.user_id)
        .bind(text.trim())
        .fetch_one(&mut *self.conn)
        .await?;

        trace!("Comment {id} added to post {post_id}");
        Ok(id)
    }

    pub async fn is_liked(&mut self, post_id: Uuid) -> Result<bool, PostError> {
        let liked: bool = query_scalar(
            "SELECT EXISTS (SELECT 1 FROM post_likes WHERE post_id = $1 AND user_id = $2)",
        )
        .bind(post_id)
        .bind(self.payload.user_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(liked)
    }

    pub async fn like(&mut self, post_id: Uuid) -> Result<(), PostError> {
        query("INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2)")
            .bind(post_id)
            .bind(self.payload.user_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(())
    }

    pub async fn unlike(&mut self, post_id: Uuid) -> Result<(), PostError> {
        query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(self.payload.user_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(())
    }

    pub async fn likes_of(&mut self, post_id: Uuid) -> Result<Vec<Uuid>, PostError> {
        let likes: Vec<Uuid> = query_scalar(
            "SELECT user_id FROM post_likes WHERE post_id = $1 ORDER BY created_at",
        )
        .bind(post_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(likes)
    }

    async fn fetch_posts(
        &mut self,
        sql: &str,
        arg: Option<Uuid>,
    ) -> Result<Vec<PostView>, PostError> {
        let mut q = query_as::<_, QPost>(sql);
        if let Some(arg) = arg {
            q = q.bind(arg);
        }
        let posts = q.fetch_all(&mut *self.conn).await?;

        trace!("Fetched {} post(s)", posts.len());
        Ok(posts.into_iter().map(PostView::from).collect())
    }
}
