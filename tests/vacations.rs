use reqwest::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use time::macros::date;
use tracing_test::traced_test;
use uuid::{uuid, Uuid};
use wayfarer::routes::auth::models::RegisterCredentials;
use wayfarer::routes::vacations::models::{CreateVacation, UpdateVacation};
use wayfarer::utils::auth::try_register_user;
use wayfarer::utils::notifications::exe::list_notifications;
use wayfarer::utils::notifications::models::NotificationKind;
use wayfarer::utils::posts::exe::delete_own_post;
use wayfarer::utils::vacations::errors::VacationError;
use wayfarer::utils::vacations::exe::*;
use wayfarer::utils::vacations::membership::MembershipError;
use wayfarer::utils::vacations::models::VacationStatus;
mod tools;

const ADIMAC_ID: Uuid = uuid!("910e81a9-56df-4c24-965a-13eff739f469");
const PKBPMJ_ID: Uuid = uuid!("29e40c2a-7595-42d3-98e8-9fe93ce99972");
const HUBERT_ID: Uuid = uuid!("a9c5900e-a445-4888-8612-4a5c8cadbd9e");

const DA_NANG_ID: Uuid = uuid!("6d185de5-ddec-462a-aeea-7628f03d417b");
const RETREAT_ID: Uuid = uuid!("fd2b3f3a-5b0e-4c1e-9a53-0b8e4f2c7d11");

const SUNSET_POST_ID: Uuid = uuid!("0b6f7d4e-1c2a-4a8e-8f0e-5d1b9c3a7e21");
const BRIDGE_POST_ID: Uuid = uuid!("3c9a1e52-7f4b-4d6c-b2a8-91e0f5d4c6b3");

fn ids<'a>(users: impl IntoIterator<Item = &'a wayfarer::routes::users::models::UserSummary>) -> Vec<Uuid> {
    users.into_iter().map(|user| user.id).collect()
}

#[sqlx::test(fixtures("users"))]
#[traced_test]
async fn create_vacation_with_invitees(pool: PgPool) {
    let body = CreateVacation {
        invited_users: vec![HUBERT_ID],
        ..CreateVacation::new(" Hoi An ", "Hoi An", date!(2099-03-01), date!(2099-03-05))
    };
    let view = create_new_vacation(&pool, ADIMAC_ID, body).await.unwrap();

    assert_eq!(view.name, "Hoi An");
    assert_eq!(view.status, VacationStatus::Upcoming);
    assert_eq!(view.creator.id, ADIMAC_ID);
    assert_eq!(ids(&view.participants), vec![ADIMAC_ID]);
    assert_eq!(ids(&view.invited_users), vec![HUBERT_ID]);

    let notifications = list_notifications(&pool, HUBERT_ID).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::VacationInvitation);
    assert_eq!(notifications[0].from.id, ADIMAC_ID);
    assert_eq!(notifications[0].vacation.as_ref().map(|v| v.id), Some(view.id));
}

#[sqlx::test(fixtures("users"))]
#[traced_test]
async fn create_vacation_rejects_bad_input(pool: PgPool) {
    let reversed = CreateVacation::new("Hoi An", "Hoi An", date!(2099-03-05), date!(2099-03-01));
    assert!(matches!(
        create_new_vacation(&pool, ADIMAC_ID, reversed).await,
        Err(VacationError::Invalid(_))
    ));

    let unknown = CreateVacation {
        invited_users: vec![Uuid::new_v4()],
        ..CreateVacation::new("Hoi An", "Hoi An", date!(2099-03-01), date!(2099-03-05))
    };
    assert!(matches!(
        create_new_vacation(&pool, ADIMAC_ID, unknown).await,
        Err(VacationError::UserNotFound)
    ));

    let self_invite = CreateVacation {
        invited_users: vec![ADIMAC_ID],
        ..CreateVacation::new("Hoi An", "Hoi An", date!(2099-03-01), date!(2099-03-05))
    };
    assert!(matches!(
        create_new_vacation(&pool, ADIMAC_ID, self_invite).await,
        Err(VacationError::Membership(MembershipError::AlreadyParticipant))
    ));

    // rejected creations leave nothing behind
    assert_eq!(get_user_vacations(&pool, ADIMAC_ID).await.unwrap().len(), 0);
}

#[sqlx::test(fixtures("users", "vacations"))]
#[traced_test]
async fn invite_then_accept(pool: PgPool) {
    invite_user(&pool, ADIMAC_ID, DA_NANG_ID, "hubertk")
        .await
        .unwrap();

    let view = get_one_vacation(&pool, HUBERT_ID, DA_NANG_ID).await.unwrap();
    assert_eq!(ids(&view.invited_users), vec![HUBERT_ID]);

    accept_invitation(&pool, HUBERT_ID, DA_NANG_ID).await.unwrap();

    let view = get_one_vacation(&pool, HUBERT_ID, DA_NANG_ID).await.unwrap();
    assert!(view.invited_users.is_empty());
    assert_eq!(view.participants[0].id, ADIMAC_ID);
    assert!(ids(&view.participants).contains(&HUBERT_ID));
    assert!(ids(&view.participants).contains(&PKBPMJ_ID));

    // the invitation notification is consumed by the answer
    assert!(list_notifications(&pool, HUBERT_ID).await.unwrap().is_empty());

    assert!(matches!(
        accept_invitation(&pool, HUBERT_ID, DA_NANG_ID).await,
        Err(VacationError::Forbidden(_))
    ));
}

#[sqlx::test(fixtures("users", "vacations"))]
#[traced_test]
async fn answer_consumes_one_invitation_notification(pool: PgPool) {
    invite_user(&pool, ADIMAC_ID, DA_NANG_ID, "hubertk")
        .await
        .unwrap();
    sqlx::query(
        r#"
            INSERT INTO notifications (from_id, to_id, kind, vacation_id)
            VALUES ($1, $2, 'vacation_invitation', $3)
        "#,
    )
    .bind(ADIMAC_ID)
    .bind(HUBERT_ID)
    .bind(DA_NANG_ID)
    .execute(&pool)
    .await
    .unwrap();

    accept_invitation(&pool, HUBERT_ID, DA_NANG_ID).await.unwrap();

    let left = list_notifications(&pool, HUBERT_ID).await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].kind, NotificationKind::VacationInvitation);
    assert_eq!(left[0].vacation.as_ref().map(|v| v.id), Some(DA_NANG_ID));
}

#[sqlx::test(fixtures("users", "vacations"))]
#[traced_test]
async fn invite_error_order(pool: PgPool) {
    assert!(matches!(
        invite_user(&pool, ADIMAC_ID, Uuid::new_v4(), "hubertk").await,
        Err(VacationError::VacationNotFound)
    ));
    assert!(matches!(
        invite_user(&pool, PKBPMJ_ID, DA_NANG_ID, "hubertk").await,
        Err(VacationError::Forbidden(_))
    ));
    assert!(matches!(
        invite_user(&pool, ADIMAC_ID, DA_NANG_ID, "nobody").await,
        Err(VacationError::UserNotFound)
    ));
    assert!(matches!(
        invite_user(&pool, ADIMAC_ID, DA_NANG_ID, "pkbpmj").await,
        Err(VacationError::Membership(MembershipError::AlreadyParticipant))
    ));

    invite_user(&pool, ADIMAC_ID, DA_NANG_ID, "hubertk")
        .await
        .unwrap();
    assert!(matches!(
        invite_user(&pool, ADIMAC_ID, DA_NANG_ID, "hubertk").await,
        Err(VacationError::Membership(MembershipError::AlreadyInvited))
    ));
}

#[sqlx::test(fixtures("users", "vacations"))]
#[traced_test]
async fn decline_removes_invitation(pool: PgPool) {
    invite_user(&pool, ADIMAC_ID, RETREAT_ID, "hubertk")
        .await
        .unwrap();
    decline_invitation(&pool, HUBERT_ID, RETREAT_ID).await.unwrap();

    assert!(matches!(
        get_one_vacation(&pool, HUBERT_ID, RETREAT_ID).await,
        Err(VacationError::Forbidden(_))
    ));
    assert!(list_notifications(&pool, HUBERT_ID).await.unwrap().is_empty());
}

#[sqlx::test(fixtures("users", "vacations"))]
#[traced_test]
async fn private_vacation_visibility(pool: PgPool) {
    assert!(matches!(
        get_one_vacation(&pool, HUBERT_ID, RETREAT_ID).await,
        Err(VacationError::Forbidden(_))
    ));
    assert!(matches!(
        list_posts(&pool, HUBERT_ID, RETREAT_ID).await,
        Err(VacationError::Forbidden(_))
    ));

    // invited users may look before answering
    invite_user(&pool, ADIMAC_ID, RETREAT_ID, "hubertk")
        .await
        .unwrap();
    let view = get_one_vacation(&pool, HUBERT_ID, RETREAT_ID).await.unwrap();
    assert!(view.is_private);

    // public vacations are visible to anyone
    let view = get_one_vacation(&pool, HUBERT_ID, DA_NANG_ID).await.unwrap();
    assert_eq!(view.status, VacationStatus::Completed);
}

#[sqlx::test(fixtures("users", "vacations"))]
#[traced_test]
async fn kick_and_leave(pool: PgPool) {
    assert!(matches!(
        kick_participant(&pool, ADIMAC_ID, DA_NANG_ID, ADIMAC_ID).await,
        Err(VacationError::Membership(MembershipError::CreatorImmovable))
    ));
    assert!(matches!(
        kick_participant(&pool, PKBPMJ_ID, DA_NANG_ID, ADIMAC_ID).await,
        Err(VacationError::Forbidden(_))
    ));
    assert!(matches!(
        leave_vacation(&pool, ADIMAC_ID, DA_NANG_ID).await,
        Err(VacationError::Membership(MembershipError::CreatorImmovable))
    ));

    kick_participant(&pool, ADIMAC_ID, DA_NANG_ID, PKBPMJ_ID)
        .await
        .unwrap();
    let view = get_one_vacation(&pool, ADIMAC_ID, DA_NANG_ID).await.unwrap();
    assert_eq!(ids(&view.participants), vec![ADIMAC_ID]);

    assert!(matches!(
        kick_participant(&pool, ADIMAC_ID, DA_NANG_ID, PKBPMJ_ID).await,
        Err(VacationError::Membership(MembershipError::NotParticipant))
    ));
}

#[sqlx::test(fixtures("users", "vacations"))]
#[traced_test]
async fn participant_leaves(pool: PgPool) {
    leave_vacation(&pool, PKBPMJ_ID, DA_NANG_ID).await.unwrap();
    let view = get_one_vacation(&pool, PKBPMJ_ID, DA_NANG_ID).await.unwrap();
    assert!(!ids(&view.participants).contains(&PKBPMJ_ID));
}

#[sqlx::test(fixtures("users", "vacations"))]
#[traced_test]
async fn update_and_delete(pool: PgPool) {
    let changes = UpdateVacation {
        name: Some("Da Nang & Hoi An".to_string()),
        end_date: Some(date!(2025-01-20)),
        ..Default::default()
    };
    assert!(matches!(
        update_one_vacation(&pool, PKBPMJ_ID, DA_NANG_ID, changes.clone()).await,
        Err(VacationError::Forbidden(_))
    ));

    let view = update_one_vacation(&pool, ADIMAC_ID, DA_NANG_ID, changes)
        .await
        .unwrap();
    assert_eq!(view.name, "Da Nang & Hoi An");
    assert_eq!(view.end_date, date!(2025-01-20));
    assert_eq!(view.location, "Da Nang");
    assert!(view.updated_at > view.created_at);

    let backwards = UpdateVacation {
        start_date: Some(date!(2025-02-01)),
        ..Default::default()
    };
    assert!(matches!(
        update_one_vacation(&pool, ADIMAC_ID, DA_NANG_ID, backwards).await,
        Err(VacationError::Invalid(_))
    ));

    assert!(matches!(
        delete_one_vacation(&pool, PKBPMJ_ID, DA_NANG_ID).await,
        Err(VacationError::Forbidden(_))
    ));
    delete_one_vacation(&pool, ADIMAC_ID, DA_NANG_ID).await.unwrap();
    assert!(matches!(
        get_one_vacation(&pool, ADIMAC_ID, DA_NANG_ID).await,
        Err(VacationError::VacationNotFound)
    ));
}

#[sqlx::test(fixtures("users", "vacations"))]
#[traced_test]
async fn listing_vacations(pool: PgPool) {
    let mine = get_user_vacations(&pool, ADIMAC_ID).await.unwrap();
    assert_eq!(mine.len(), 2);

    // Da Nang is over, only the retreat can still take posts
    let available = get_available_vacations(&pool, ADIMAC_ID).await.unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, RETREAT_ID);

    invite_user(&pool, ADIMAC_ID, RETREAT_ID, "hubertk")
        .await
        .unwrap();
    assert_eq!(get_user_vacations(&pool, HUBERT_ID).await.unwrap().len(), 1);
    assert!(get_available_vacations(&pool, HUBERT_ID)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(fixtures("users", "vacations", "posts"))]
#[traced_test]
async fn post_links(pool: PgPool) {
    let posts = list_posts(&pool, HUBERT_ID, DA_NANG_ID).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, SUNSET_POST_ID);

    assert!(matches!(
        add_post(&pool, PKBPMJ_ID, DA_NANG_ID, SUNSET_POST_ID).await,
        Err(VacationError::PostAlreadyLinked)
    ));
    assert!(matches!(
        add_post(&pool, HUBERT_ID, DA_NANG_ID, BRIDGE_POST_ID).await,
        Err(VacationError::Forbidden(_))
    ));
    assert!(matches!(
        add_post(&pool, PKBPMJ_ID, DA_NANG_ID, Uuid::new_v4()).await,
        Err(VacationError::PostNotFound)
    ));

    add_post(&pool, PKBPMJ_ID, DA_NANG_ID, BRIDGE_POST_ID)
        .await
        .unwrap();
    let posts = list_posts(&pool, ADIMAC_ID, DA_NANG_ID).await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, BRIDGE_POST_ID);

    remove_post(&pool, ADIMAC_ID, DA_NANG_ID, BRIDGE_POST_ID)
        .await
        .unwrap();
    assert!(matches!(
        remove_post(&pool, ADIMAC_ID, DA_NANG_ID, BRIDGE_POST_ID).await,
        Err(VacationError::LinkNotFound)
    ));
}

#[sqlx::test(fixtures("users", "vacations", "posts"))]
#[traced_test]
async fn deleted_post_drops_out_of_vacation(pool: PgPool) {
    delete_own_post(&pool, PKBPMJ_ID, SUNSET_POST_ID)
        .await
        .unwrap();

    let posts = list_posts(&pool, ADIMAC_ID, DA_NANG_ID).await.unwrap();
    assert!(posts.is_empty());
    // the dangling link can still be removed
    remove_post(&pool, ADIMAC_ID, DA_NANG_ID, SUNSET_POST_ID)
        .await
        .unwrap();
}

#[sqlx::test(fixtures("users", "vacations"))]
#[traced_test]
async fn malformed_requests_get_json_errors(pool: PgPool) {
    let app_data = tools::AppData::new(pool.clone()).await;
    let client = app_data.client();

    try_register_user(
        &pool,
        &RegisterCredentials::new("mai.nguyen", "Mai Nguyen", "#very#_#strong#_#pass#"),
    )
    .await
    .unwrap();
    let res = client
        .post(app_data.api("/auth/login"))
        .json(&json!({ "username": "mai.nguyen", "password": "#very#_#strong#_#pass#" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let requests = [
        client
            .post(app_data.api("/vacations"))
            .json(&json!({ "location": "Da Nang" })),
        client
            .post(app_data.api("/vacations/not-a-uuid/invite"))
            .json(&json!({ "username": "hubertk" })),
        client
            .post(app_data.api(&format!("/vacations/{DA_NANG_ID}/invite")))
            .json(&json!({})),
        client
            .post(app_data.api("/vacations"))
            .header("content-type", "application/json")
            .body("{\"name\":"),
    ];
    for request in requests {
        let res = request.send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = res.json().await.unwrap();
        assert!(body["error"].is_string());
    }
}

#[sqlx::test(fixtures("users"))]
#[traced_test]
async fn vacation_round_trip(pool: PgPool) {
    let app_data = tools::AppData::new(pool.clone()).await;
    let client = app_data.client();

    try_register_user(
        &pool,
        &RegisterCredentials::new("mai.nguyen", "Mai Nguyen", "#very#_#strong#_#pass#"),
    )
    .await
    .unwrap();
    let res = client
        .post(app_data.api("/auth/login"))
        .json(&json!({ "username": "mai.nguyen", "password": "#very#_#strong#_#pass#" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(app_data.api("/vacations"))
        .json(&json!({
            "name": "Da Nang Trip",
            "location": "Da Nang",
            "start_date": "2025-01-10",
            "end_date": "2025-01-15",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let vacation = &created["vacation"];
    assert_eq!(vacation["status"], "completed");
    assert_eq!(vacation["creator"]["username"], "mai.nguyen");
    let vacation_id = vacation["id"].as_str().unwrap().to_string();

    let res = client
        .post(app_data.api(&format!("/vacations/{vacation_id}/invite")))
        .json(&json!({ "username": "hubertk" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(app_data.api(&format!("/vacations/{vacation_id}/invite")))
        .json(&json!({ "username": "hubertk" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(app_data.api(&format!("/vacations/{vacation_id}/accept")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(app_data.api(&format!("/vacations/{vacation_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let view: serde_json::Value = res.json().await.unwrap();
    assert_eq!(view["invited_users"][0]["username"], "hubertk");

    let res = client
        .get(app_data.api(&format!("/vacations/{}", Uuid::new_v4())))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
