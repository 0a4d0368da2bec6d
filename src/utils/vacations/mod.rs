pub mod errors;
pub mod exe;
pub mod membership;
pub mod models;
pub mod policy;

use self::errors::VacationError;
use self::membership::{Members, Membership, MembershipChange};
use self::models::{Vacation, VacationDetails};
use crate::modules::database::PgQuery;
use crate::routes::posts::models::PostView;
use crate::routes::users::models::UserSummary;
use crate::routes::vacations::models::VacationView;
use crate::utils::posts::{QPost, SELECT_POSTS};
use sqlx::{query, query_as, query_scalar, FromRow};
use std::collections::HashMap;
use time::{Date, OffsetDateTime};
use tracing::trace;
use uuid::Uuid;

#[derive(FromRow)]
pub struct QVacation {
    id: Uuid,
    name: String,
    description: String,
    location: String,
    start_date: Date,
    end_date: Date,
    images: Vec<String>,
    is_private: bool,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl QVacation {
    fn with_members(self, members: Members) -> Vacation {
        Vacation {
            id: self.id,
            details: VacationDetails {
                name: self.name,
                description: self.description,
                location: self.location,
                start_date: self.start_date,
                end_date: self.end_date,
                images: self.images,
                is_private: self.is_private,
            },
            members,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(FromRow)]
pub struct QMember {
    vacation_id: Uuid,
    user_id: Uuid,
    state: Membership,
}

pub struct VacationQuery {
    user_id: Uuid,
}

impl VacationQuery {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

impl<'c> PgQuery<'c, VacationQuery> {
    /// Inserts the vacation with the requester as its creator.
    pub async fn create_vacation(&mut self, details: &VacationDetails) -> Result<Vacation, VacationError> {
        let row = query_as::<_, QVacation>(
            r#"
                INSERT INTO vacations (name, description, location, start_date, end_date, images, is_private)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            "#,
        )
        .bind(&details.name)
        .bind(&details.description)
        .bind(&details.location)
        .bind(details.start_date)
        .bind(details.end_date)
        .bind(&details.images)
        .bind(details.is_private)
        .fetch_one(&mut *self.conn)
        .await?;

        let creator = self.payload.user_id;
        self.save_members(
            row.id,
            &[MembershipChange::Added(creator, Membership::Creator)],
        )
        .await?;

        trace!("Created vacation {}", row.id);
        Ok(row.with_members(Members::new(creator)))
    }

    pub async fn get_vacation(&mut self, vacation_id: Uuid) -> Result<Option<Vacation>, VacationError> {
        let row = query_as::<_, QVacation>("SELECT * FROM vacations WHERE id = $1")
            .bind(vacation_id)
            .fetch_optional(&mut *self.conn)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut members = self.load_members(&[vacation_id]).await?;
        let records = members.remove(&vacation_id).unwrap_or_default();
        Ok(Some(row.with_members(Members::from_records(records)?)))
    }

    /// Vacations the requester is creator of, participates in or is invited to.
    pub async fn user_vacations(&mut self) -> Result<Vec<Vacation>, VacationError> {
        let rows = query_as::<_, QVacation>(
            r#"
                SELECT v.* FROM vacations v
                JOIN vacation_members m ON m.vacation_id = v.id
                WHERE m.user_id = $1
                ORDER BY v.created_at DESC
            "#,
        )
        .bind(self.payload.user_id)
        .fetch_all(&mut *self.conn)
        .await?;

        self.attach_members(rows).await
    }

    /// Vacations the requester participates in that have not ended by `today`.
    pub async fn available_vacations(&mut self, today: Date) -> Result<Vec<Vacation>, VacationError> {
        let rows = query_as::<_, QVacation>(
            r#"
                SELECT v.* FROM vacations v
                JOIN vacation_members m ON m.vacation_id = v.id
                WHERE m.user_id = $1 AND m.state IN ('creator', 'participant') AND v.end_date >= $2
                ORDER BY v.start_date ASC
            "#,
        )
        .bind(self.payload.user_id)
        .bind(today)
        .fetch_all(&mut *self.conn)
        .await?;

        self.attach_members(rows).await
    }

    pub async fn update_details(
        &mut self,
        vacation_id: Uuid,
        details: &VacationDetails,
    ) -> Result<OffsetDateTime, VacationError> {
        let updated_at: OffsetDateTime = query_scalar(
            r#"
                UPDATE vacations
                SET name = $1, description = $2, location = $3, start_date = $4, end_date = $5,
                    images = $6, is_private = $7, updated_at = now()
                WHERE id = $8
                RETURNING updated_at
            "#,
        )
        .bind(&details.name)
        .bind(&details.description)
        .bind(&details.location)
        .bind(details.start_date)
        .bind(details.end_date)
        .bind(&details.images)
        .bind(details.is_private)
        .bind(vacation_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(updated_at)
    }

    /// Memberships, links and invitation notifications go with the vacation.
    pub async fn delete_vacation(&mut self, vacation_id: Uuid) -> Result<(), VacationError> {
        query("DELETE FROM vacations WHERE id = $1")
            .bind(vacation_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(())
    }

    /// Writes the membership records a transition produced.
    pub async fn save_members(
        &mut self,
        vacation_id: Uuid,
        changes: &[MembershipChange],
    ) -> Result<(), VacationError> {
        for change in changes {
            match *change {
                MembershipChange::Added(user_id, state) => {
                    query(
                        "INSERT INTO vacation_members (vacation_id, user_id, state) VALUES ($1, $2, $3)",
                    )
                    .bind(vacation_id)
                    .bind(user_id)
                    .bind(state)
                    .execute(&mut *self.conn)
                    .await?;
                }
                MembershipChange::Changed(user_id, state) => {
                    query(
                        "UPDATE vacation_members SET state = $3 WHERE vacation_id = $1 AND user_id = $2",
                    )
                    .bind(vacation_id)
                    .bind(user_id)
                    .bind(state)
                    .execute(&mut *self.conn)
                    .await?;
                }
                MembershipChange::Removed(user_id) => {
                    query("DELETE FROM vacation_members WHERE vacation_id = $1 AND user_id = $2")
                        .bind(vacation_id)
                        .bind(user_id)
                        .execute(&mut *self.conn)
                        .await?;
                }
            }
            trace!("Vacation {vacation_id}: {change:?}");
        }

        Ok(())
    }

    /// Returns the ids from `user_ids` that belong to no user.
    pub async fn unknown_users(&mut self, user_ids: &[Uuid]) -> Result<Vec<Uuid>, VacationError> {
        let known: Vec<Uuid> = query_scalar("SELECT id FROM users WHERE id = ANY($1)")
            .bind(user_ids)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(user_ids
            .iter()
            .filter(|id| !known.contains(id))
            .copied()
            .collect())
    }

    /// Renders the vacation with member summaries, creator first.
    pub async fn view(&mut self, vacation: &Vacation, today: Date) -> Result<VacationView, VacationError> {
        let members = &vacation.members;
        let ids: Vec<Uuid> = members
            .participants()
            .into_iter()
            .chain(members.invited())
            .collect();

        let summaries: HashMap<Uuid, UserSummary> = query_as::<_, UserSummary>(
            "SELECT id, username, full_name, profile_img FROM users WHERE id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&mut *self.conn)
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

        let pick = |ids: Vec<Uuid>| -> Vec<UserSummary> {
            ids.iter().filter_map(|id| summaries.get(id).cloned()).collect()
        };
        let creator = summaries
            .get(&vacation.creator())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Creator of vacation {} has no user record", vacation.id))?;
        let details = &vacation.details;

        Ok(VacationView {
            id: vacation.id,
            name: details.name.clone(),
            description: details.description.clone(),
            location: details.location.clone(),
            start_date: details.start_date,
            end_date: details.end_date,
            images: details.images.clone(),
            is_private: details.is_private,
            status: vacation.status(today),
            creator,
            participants: pick(members.participants()),
            invited_users: pick(members.invited()),
            created_at: vacation.created_at,
            updated_at: vacation.updated_at,
        })
    }

    pub async fn post_exists(&mut self, post_id: Uuid) -> Result<bool, VacationError> {
        let exists: bool = query_scalar("SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1)")
            .bind(post_id)
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(exists)
    }

    pub async fn link_post(&mut self, vacation_id: Uuid, post_id: Uuid) -> Result<(), VacationError> {
        let inserted = query(
            r#"
                INSERT INTO post_vacations (post_id, vacation_id, added_by)
                VALUES ($1, $2, $3)
                ON CONFLICT (post_id, vacation_id) DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(vacation_id)
        .bind(self.payload.user_id)
        .execute(&mut *self.conn)
        .await?
        .rows_affected();

        if inserted == 0 {
            return Err(VacationError::PostAlreadyLinked);
        }
        Ok(())
    }

    pub async fn unlink_post(&mut self, vacation_id: Uuid, post_id: Uuid) -> Result<(), VacationError> {
        let deleted = query("DELETE FROM post_vacations WHERE post_id = $1 AND vacation_id = $2")
            .bind(post_id)
            .bind(vacation_id)
            .execute(&mut *self.conn)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(VacationError::LinkNotFound);
        }
        Ok(())
    }

    /// Linked posts, newest link first. Links to deleted posts are skipped by the join.
    pub async fn linked_posts(&mut self, vacation_id: Uuid) -> Result<Vec<PostView>, VacationError> {
        let posts = query_as::<_, QPost>(&format!(
            r#"{SELECT_POSTS}
                JOIN post_vacations pv ON pv.post_id = p.id
                WHERE pv.vacation_id = $1
                ORDER BY pv.created_at DESC
            "#
        ))
        .bind(vacation_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(posts.into_iter().map(PostView::from).collect())
    }

    async fn load_members(
        &mut self,
        vacation_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<(Uuid, Membership)>>, VacationError> {
        let rows = query_as::<_, QMember>(
            "SELECT vacation_id, user_id, state FROM vacation_members WHERE vacation_id = ANY($1)",
        )
        .bind(vacation_ids)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(group_members(rows))
    }

    async fn attach_members(&mut self, rows: Vec<QVacation>) -> Result<Vec<Vacation>, VacationError> {
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut members = self.load_members(&ids).await?;

        rows.into_iter()
            .map(|row| -> Result<Vacation, VacationError> {
                let records = members.remove(&row.id).unwrap_or_default();
                Ok(row.with_members(Members::from_records(records)?))
            })
            .collect()
    }
}

fn group_members(rows: Vec<QMember>) -> HashMap<Uuid, Vec<(Uuid, Membership)>> {
    let mut grouped: HashMap<Uuid, Vec<(Uuid, Membership)>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.vacation_id)
            .or_default()
            .push((row.user_id, row.state));
    }
    grouped
}
