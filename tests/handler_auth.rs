mod common;

use axum_test::TestServer;
use serde_json::{Value, json};
use sgtl_api::routes::api_router;
use sqlx::PgPool;

fn make_server(pool: PgPool) -> TestServer {
    let (state, _rx) = common::create_test_state(pool);
    TestServer::new(api_router(state)).unwrap()
}

#[sqlx::test]
async fn test_token_success(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .post("/token")
        .form(&[
            ("username", common::ADMIN_USERNAME),
            ("password", common::ADMIN_PASSWORD),
        ])
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["token_type"], "bearer");
    assert!(json["access_token"].as_str().unwrap().split('.').count() == 3);
}

#[sqlx::test]
async fn test_token_wrong_password(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .post("/token")
        .form(&[("username", common::ADMIN_USERNAME), ("password", "nope")])
        .await;

    response.assert_status_unauthorized();
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "unauthorized");
    assert_eq!(json["error"]["message"], "Invalid credentials");
}

#[sqlx::test]
async fn test_token_ignores_extra_oauth_fields(pool: PgPool) {
    let server = make_server(pool);

    server
        .post("/token")
        .form(&[
            ("grant_type", "password"),
            ("username", common::ADMIN_USERNAME),
            ("password", common::ADMIN_PASSWORD),
            ("scope", ""),
        ])
        .await
        .assert_status_ok();
}

#[sqlx::test]
async fn test_issued_token_unlocks_mutations(pool: PgPool) {
    let server = make_server(pool);

    let token = server
        .post("/token")
        .form(&[
            ("username", common::ADMIN_USERNAME),
            ("password", common::ADMIN_PASSWORD),
        ])
        .await
        .json::<Value>()["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    server
        .post("/links")
        .add_header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "titulo": "Site", "url": "https://example.com" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
}
