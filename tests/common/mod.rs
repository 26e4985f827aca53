#![allow(dead_code)]

use sgtl_api::application::services::{AuthService, LinkService};
use sgtl_api::config::AuthSettings;
use sgtl_api::domain::link_event::LinkEvent;
use sgtl_api::infrastructure::persistence::PgLinkRepository;
use sgtl_api::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "s3cret";

pub fn test_auth_settings() -> AuthSettings {
    AuthSettings {
        admin_username: ADMIN_USERNAME.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        secret_key: "test-signing-secret".to_string(),
        token_lifetime: chrono::Duration::minutes(60),
    }
}

/// A valid bearer token for the test admin.
pub fn admin_token() -> String {
    AuthService::new(test_auth_settings())
        .login(ADMIN_USERNAME, ADMIN_PASSWORD)
        .unwrap()
        .access_token
}

pub async fn create_test_link(pool: &PgPool, titulo: &str, url: &str, ordem: i32) -> i32 {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO links (titulo, url, ordem) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(titulo)
    .bind(url)
    .bind(ordem)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// `(id, ordem)` pairs in display order.
pub async fn ordering(pool: &PgPool) -> Vec<(i32, i32)> {
    sqlx::query_as::<_, (i32, i32)>("SELECT id, ordem FROM links ORDER BY ordem, id")
        .fetch_all(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<LinkEvent>) {
    let pool = Arc::new(pool);
    let (tx, rx) = mpsc::channel(100);

    let link_repo = Arc::new(PgLinkRepository::new(pool));
    let link_service = Arc::new(LinkService::new(link_repo, tx.clone()));
    let auth_service = Arc::new(AuthService::new(test_auth_settings()));

    let state = AppState {
        link_service,
        auth_service,
        notification_sender: tx,
    };

    (state, rx)
}
