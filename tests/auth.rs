use nanoid::nanoid;
use reqwest::StatusCode;
use serde_json::json;
mod tools;

use secrecy::SecretString;
use sqlx::PgPool;
use tracing_test::traced_test;
use wayfarer::routes::auth::models::RegisterCredentials;
use wayfarer::utils::auth::{errors::AuthError, try_register_user, verify_user_credentials};

const STRONG_PASS: &str = "#very#_#strong#_#pass#";

fn fresh_username() -> String {
    format!("user{}", nanoid!(10))
}

#[sqlx::test]
#[traced_test]
async fn registration_health_check(db: PgPool) {
    let res = try_register_user(
        &db,
        &RegisterCredentials::new(&fresh_username(), "Mai Nguyen", STRONG_PASS),
    )
    .await;

    match res {
        Ok(_) => (),
        _ => panic!("Test gives the result {:?}", res),
    }
}

#[sqlx::test(fixtures("users"))]
async fn registration_missing_credential(db: PgPool) {
    let cases = [
        RegisterCredentials::new("", "Mai Nguyen", STRONG_PASS),
        RegisterCredentials::new("   ", "Mai Nguyen", STRONG_PASS),
        RegisterCredentials::new(&fresh_username(), "  ", STRONG_PASS),
        RegisterCredentials::new(&fresh_username(), "Mai Nguyen", "  "),
    ];

    for credentials in cases {
        let res = try_register_user(&db, &credentials).await;
        match res {
            Err(AuthError::MissingCredential) => (),
            _ => panic!("Test gives the result {:?}", res),
        }
    }
}

#[sqlx::test(fixtures("users"))]
async fn registration_weak_password(db: PgPool) {
    let res = try_register_user(
        &db,
        &RegisterCredentials::new(&fresh_username(), "Mai Nguyen", "12345678"),
    )
    .await;

    match res {
        Err(AuthError::WeakPassword) => (),
        _ => panic!("Test gives the result {:?}", res),
    }
}

#[sqlx::test(fixtures("users"))]
async fn registration_user_exists(db: PgPool) {
    let res = try_register_user(
        &db,
        &RegisterCredentials::new("adimac93", "Someone Else", STRONG_PASS),
    )
    .await;

    match res {
        Err(AuthError::UserAlreadyExists) => (),
        _ => panic!("Test gives the result {:?}", res),
    }
}

#[sqlx::test(fixtures("users"))]
async fn registration_invalid_username(db: PgPool) {
    let cases = [
        "ab",
        "spaced name",
        "thΣtruΣsigma",
        "da/nang",
        "verylongveryverylongnameveryveryverylongname",
    ];

    for username in cases {
        let res = try_register_user(
            &db,
            &RegisterCredentials::new(username, "Mai Nguyen", STRONG_PASS),
        )
        .await;
        match res {
            Err(AuthError::InvalidUserData(_)) => (),
            _ => panic!("{username} gives the result {:?}", res),
        }
    }
}

#[sqlx::test]
async fn login_health_check(db: PgPool) {
    let username = fresh_username();
    let user_id = try_register_user(
        &db,
        &RegisterCredentials::new(&username, "Mai Nguyen", STRONG_PASS),
    )
    .await
    .unwrap();

    let mut conn = db.acquire().await.unwrap();
    let res = verify_user_credentials(
        &mut conn,
        &format!("  {username} "),
        SecretString::new(STRONG_PASS.to_string()),
    )
    .await;

    match res {
        Ok(id) => assert_eq!(id, user_id),
        _ => panic!("Test gives the result {:?}", res),
    }
}

#[sqlx::test]
async fn login_wrong_password(db: PgPool) {
    let username = fresh_username();
    try_register_user(
        &db,
        &RegisterCredentials::new(&username, "Mai Nguyen", STRONG_PASS),
    )
    .await
    .unwrap();

    let mut conn = db.acquire().await.unwrap();
    let res = verify_user_credentials(
        &mut conn,
        &username,
        SecretString::new("#wrong#_#pass#".to_string()),
    )
    .await;

    match res {
        Err(AuthError::WrongUsernameOrPassword) => (),
        _ => panic!("Test gives the result {:?}", res),
    }
}

#[sqlx::test(fixtures("users"))]
async fn login_missing_credential(db: PgPool) {
    let mut conn = db.acquire().await.unwrap();
    let cases = [("hubertk", "   "), ("    ", STRONG_PASS), ("    ", "  ")];

    for (username, password) in cases {
        let res =
            verify_user_credentials(&mut conn, username, SecretString::new(password.to_string()))
                .await;
        match res {
            Err(AuthError::MissingCredential) => (),
            _ => panic!("Test gives the result {:?}", res),
        }
    }
}

#[sqlx::test(fixtures("users"))]
async fn login_no_user_found(db: PgPool) {
    let mut conn = db.acquire().await.unwrap();
    let res = verify_user_credentials(
        &mut conn,
        "different_user",
        SecretString::new(STRONG_PASS.to_string()),
    )
    .await;

    match res {
        Err(AuthError::WrongUsernameOrPassword) => (),
        _ => panic!("Test gives the result {:?}", res),
    }
}

#[sqlx::test]
#[traced_test]
async fn auth_integration_test(db: PgPool) {
    let app_data = tools::AppData::new(db).await;
    let client = app_data.client();

    let username = fresh_username();
    let payload = json!({
        "username": username,
        "full_name": "Mai Nguyen",
        "password": STRONG_PASS,
    });

    let res = client.get(app_data.api("/auth/me")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(app_data.api("/auth/register"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client.get(app_data.api("/auth/me")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let me: serde_json::Value = res.json().await.unwrap();
    assert_eq!(me["username"], username);

    let res = client
        .post(app_data.api("/auth/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(app_data.api("/auth/me")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(app_data.api("/auth/login"))
        .json(&json!({ "username": username, "password": STRONG_PASS }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(app_data.api("/auth/refresh"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
