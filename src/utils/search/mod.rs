pub mod errors;

use crate::app_errors::DefaultContext;
use crate::modules::database::PgQuery;
use crate::routes::search::models::SearchVacationsResult;
use crate::routes::users::models::UserSummary;
use crate::utils::search::errors::SearchError;
use sqlx::{query_as, FromRow, PgPool};
use time::Date;
use tracing::trace;
use uuid::Uuid;

pub const SEARCH_LIMIT: i64 = 20;

pub struct Search {
    pattern: String,
}

impl Search {
    /// Case-insensitive substring pattern; `%`, `_` and `\` in the text match literally.
    pub fn new(text: &str) -> Self {
        let escaped = text
            .trim()
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        Self {
            pattern: format!("%{escaped}%"),
        }
    }
}

pub async fn get_users(pool: &PgPool, text: &str) -> Result<Vec<UserSummary>, SearchError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut conn = pool.acquire().await.dc()?;
    let mut q = PgQuery::new(Search::new(text), &mut conn);
    q.search_users().await
}

pub async fn get_vacations(
    pool: &PgPool,
    text: &str,
) -> Result<Vec<SearchVacationsResult>, SearchError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut conn = pool.acquire().await.dc()?;
    let mut q = PgQuery::new(Search::new(text), &mut conn);
    let vacations = q.search_public_vacations().await?;
    Ok(vacations.into_iter().map(SearchVacationsResult::from).collect())
}

impl<'c> PgQuery<'c, Search> {
    pub async fn search_users(&mut self) -> Result<Vec<UserSummary>, SearchError> {
        let res = query_as::<_, UserSummary>(
            r#"
                SELECT id, username, full_name, profile_img FROM users
                WHERE username ILIKE $1 OR full_name ILIKE $1
                ORDER BY username
                LIMIT $2
            "#,
        )
        .bind(&self.payload.pattern)
        .bind(SEARCH_LIMIT)
        .fetch_all(&mut *self.conn)
        .await
        .dc()?;

        trace!("Found {} user(s) matching {}", res.len(), self.payload.pattern);
        Ok(res)
    }

    pub async fn search_public_vacations(&mut self) -> Result<Vec<QueryVacation>, SearchError> {
        let res = query_as::<_, QueryVacation>(
            r#"
                SELECT v.id, v.name, v.location, v.images, v.start_date, v.end_date,
                    u.id AS creator_id, u.username, u.full_name, u.profile_img
                FROM vacations v
                JOIN vacation_members m ON m.vacation_id = v.id AND m.state = 'creator'
                JOIN users u ON u.id = m.user_id
                WHERE NOT v.is_private AND v.name ILIKE $1
                ORDER BY v.start_date DESC
                LIMIT $2
            "#,
        )
        .bind(&self.payload.pattern)
        .bind(SEARCH_LIMIT)
        .fetch_all(&mut *self.conn)
        .await
        .dc()?;

        trace!("Found {} vacation(s) matching {}", res.len(), self.payload.pattern);
        Ok(res)
    }
}

#[derive(Debug, FromRow)]
pub struct QueryVacation {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub images: Vec<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub creator_id: Uuid,
    pub username: String,
    pub full_name: String,
    pub profile_img: Option<String>,
}
