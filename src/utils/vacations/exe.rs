use crate::modules::database::PgQuery;
use crate::routes::posts::models::PostView;
use crate::routes::vacations::models::{CreateVacation, UpdateVacation, VacationView};
use crate::utils::notifications::models::NotificationEvent;
use crate::utils::notifications::NotificationQuery;
use crate::utils::users::UserQuery;
use crate::utils::vacations::errors::VacationError;
use crate::utils::vacations::models::Vacation;
use crate::utils::vacations::policy::{authorize, Action};
use crate::utils::vacations::VacationQuery;
use crate::validation::ValidateContent;
use sqlx::PgPool;
use time::{Date, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

async fn find_vacation(
    q: &mut PgQuery<'_, VacationQuery>,
    vacation_id: Uuid,
) -> Result<Vacation, VacationError> {
    q.get_vacation(vacation_id)
        .await?
        .ok_or(VacationError::VacationNotFound)
}

/// Persists `next` over `current` by writing only the changed membership records.
async fn save_transition(
    q: &mut PgQuery<'_, VacationQuery>,
    current: &Vacation,
    next: &Vacation,
) -> Result<(), VacationError> {
    let changes = current.members.changes_to(&next.members);
    q.save_members(current.id, &changes).await
}

async fn invite_and_notify(
    q: &mut PgQuery<'_, VacationQuery>,
    vacation: Vacation,
    actor: Uuid,
    target: Uuid,
) -> Result<Vacation, VacationError> {
    let next = vacation.invite(actor, target)?;
    save_transition(q, &vacation, &next).await?;
    q.rebind(NotificationQuery::new(actor))
        .notify(
            target,
            NotificationEvent::VacationInvitation {
                vacation_id: vacation.id,
            },
        )
        .await?;
    Ok(next)
}

pub async fn create_new_vacation(
    pool: &PgPool,
    user_id: Uuid,
    body: CreateVacation,
) -> Result<VacationView, VacationError> {
    body.validate_content()?;
    let details = body.details();

    let mut tx = pool.begin().await?;
    let mut q = PgQuery::new(VacationQuery::new(user_id), &mut tx);

    let mut vacation = q.create_vacation(&details).await?;
    if !q.unknown_users(&body.invited_users).await?.is_empty() {
        return Err(VacationError::UserNotFound);
    }
    for target in body.invited_users {
        vacation = invite_and_notify(&mut q, vacation, user_id, target).await?;
    }

    let view = q.view(&vacation, today()).await?;
    tx.commit().await?;

    debug!("Vacation {} created by {user_id}", view.id);
    Ok(view)
}

pub async fn get_one_vacation(
    pool: &PgPool,
    user_id: Uuid,
    vacation_id: Uuid,
) -> Result<VacationView, VacationError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(VacationQuery::new(user_id), &mut conn);
    let vacation = find_vacation(&mut q, vacation_id).await?;
    authorize(user_id, &vacation, Action::View)?;
    q.view(&vacation, today()).await
}

pub async fn get_user_vacations(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<VacationView>, VacationError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(VacationQuery::new(user_id), &mut conn);
    let today = today();

    let mut views = Vec::new();
    for vacation in q.user_vacations().await? {
        views.push(q.view(&vacation, today).await?);
    }
    Ok(views)
}

/// Ongoing or upcoming vacations the user can add posts to.
pub async fn get_available_vacations(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<VacationView>, VacationError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(VacationQuery::new(user_id), &mut conn);
    let today = today();

    let mut views = Vec::new();
    for vacation in q.available_vacations(today).await? {
        views.push(q.view(&vacation, today).await?);
    }
    Ok(views)
}

pub async fn update_one_vacation(
    pool: &PgPool,
    user_id: Uuid,
    vacation_id: Uuid,
    body: UpdateVacation,
) -> Result<VacationView, VacationError> {
    let mut tx = pool.begin().await?;
    let mut q = PgQuery::new(VacationQuery::new(user_id), &mut tx);

    let vacation = find_vacation(&mut q, vacation_id).await?;
    let mut edited = vacation.edit(user_id, &body)?;
    edited.updated_at = q.update_details(vacation_id, &edited.details).await?;
    let view = q.view(&edited, today()).await?;
    tx.commit().await?;

    Ok(view)
}

pub async fn delete_one_vacation(
    pool: &PgPool,
    user_id: Uuid,
    vacation_id: Uuid,
) -> Result<(), VacationError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(VacationQuery::new(user_id), &mut conn);

    let vacation = find_vacation(&mut q, vacation_id).await?;
    authorize(user_id, &vacation, Action::Delete)?;
    q.delete_vacation(vacation_id).await?;

    debug!("Vacation {vacation_id} deleted");
    Ok(())
}

pub async fn invite_user(
    pool: &PgPool,
    user_id: Uuid,
    vacation_id: Uuid,
    username: &str,
) -> Result<(), VacationError> {
    let mut tx = pool.begin().await?;
    let mut q = PgQuery::new(VacationQuery::new(user_id), &mut tx);

    let vacation = find_vacation(&mut q, vacation_id).await?;
    authorize(user_id, &vacation, Action::Invite)?;
    let target = q
        .rebind(UserQuery::new(user_id))
        .user_id_by_username(username)
        .await?
        .ok_or(VacationError::UserNotFound)?;
    invite_and_notify(&mut q, vacation, user_id, target).await?;
    tx.commit().await?;

    debug!("User {target} invited to vacation {vacation_id}");
    Ok(())
}

pub async fn accept_invitation(
    pool: &PgPool,
    user_id: Uuid,
    vacation_id: Uuid,
) -> Result<(), VacationError> {
    respond_to_invitation(pool, user_id, vacation_id, true).await
}

pub async fn decline_invitation(
    pool: &PgPool,
    user_id: Uuid,
    vacation_id: Uuid,
) -> Result<(), VacationError> {
    respond_to_invitation(pool, user_id, vacation_id, false).await
}

async fn respond_to_invitation(
    pool: &PgPool,
    user_id: Uuid,
    vacation_id: Uuid,
    accept: bool,
) -> Result<(), VacationError> {
    let mut tx = pool.begin().await?;
    let mut q = PgQuery::new(VacationQuery::new(user_id), &mut tx);

    let vacation = find_vacation(&mut q, vacation_id).await?;
    let next = if accept {
        vacation.accept(user_id)?
    } else {
        vacation.decline(user_id)?
    };
    save_transition(&mut q, &vacation, &next).await?;
    let removed = q
        .rebind(NotificationQuery::new(user_id))
        .remove_invitation(vacation_id)
        .await?;
    tx.commit().await?;

    debug!("User {user_id} answered invitation to {vacation_id} (accepted: {accept}, notification removed: {removed})");
    Ok(())
}

pub async fn kick_participant(
    pool: &PgPool,
    user_id: Uuid,
    vacation_id: Uuid,
    target: Uuid,
) -> Result<(), VacationError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(VacationQuery::new(user_id), &mut conn);

    let vacation = find_vacation(&mut q, vacation_id).await?;
    let next = vacation.kick(user_id, target)?;
    save_transition(&mut q, &vacation, &next).await
}

pub async fn leave_vacation(
    pool: &PgPool,
    user_id: Uuid,
    vacation_id: Uuid,
) -> Result<(), VacationError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(VacationQuery::new(user_id), &mut conn);

    let vacation = find_vacation(&mut q, vacation_id).await?;
    let next = vacation.leave(user_id)?;
    save_transition(&mut q, &vacation, &next).await
}

pub async fn add_post(
    pool: &PgPool,
    user_id: Uuid,
    vacation_id: Uuid,
    post_id: Uuid,
) -> Result<(), VacationError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(VacationQuery::new(user_id), &mut conn);

    let vacation = find_vacation(&mut q, vacation_id).await?;
    authorize(user_id, &vacation, Action::ManagePosts)?;
    if !q.post_exists(post_id).await? {
        return Err(VacationError::PostNotFound);
    }
    q.link_post(vacation_id, post_id).await
}

pub async fn remove_post(
    pool: &PgPool,
    user_id: Uuid,
    vacation_id: Uuid,
    post_id: Uuid,
) -> Result<(), VacationError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(VacationQuery::new(user_id), &mut conn);

    let vacation = find_vacation(&mut q, vacation_id).await?;
    authorize(user_id, &vacation, Action::ManagePosts)?;
    q.unlink_post(vacation_id, post_id).await
}

pub async fn list_posts(
    pool: &PgPool,
    user_id: Uuid,
    vacation_id: Uuid,
) -> Result<Vec<PostView>, VacationError> {
    let mut conn = pool.acquire().await?;
    let mut q = PgQuery::new(VacationQuery::new(user_id), &mut conn);

    let vacation = find_vacation(&mut q, vacation_id).await?;
    authorize(user_id, &vacation, Action::View)?;
    q.linked_posts(vacation_id).await
}
