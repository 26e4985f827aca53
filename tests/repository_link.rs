mod common;

use serde_json::json;
use sgtl_api::AppError;
use sgtl_api::domain::entities::{LinkReplacement, NewLink};
use sgtl_api::domain::repositories::LinkRepository;
use sgtl_api::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(titulo: &str, ordem: i32) -> NewLink {
    NewLink {
        titulo: titulo.to_string(),
        url: "https://example.com".to_string(),
        ordem,
        descricao: None,
        icone: None,
    }
}

#[sqlx::test]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .create(NewLink {
            descricao: Some("Fotos".to_string()),
            icone: Some("instagram".to_string()),
            ..new_link("Instagram", 1)
        })
        .await
        .unwrap();

    assert!(link.id > 0);
    assert_eq!(link.titulo, "Instagram");
    assert_eq!(link.ordem, 1);
    assert_eq!(link.descricao.as_deref(), Some("Fotos"));
    assert_eq!(link.icone.as_deref(), Some("instagram"));
    assert!(link.publicado);
}

#[sqlx::test]
async fn test_list_orders_by_ordem_then_id(pool: PgPool) {
    let c = common::create_test_link(&pool, "C", "https://c.example.com", 3).await;
    let a = common::create_test_link(&pool, "A", "https://a.example.com", 1).await;
    let b1 = common::create_test_link(&pool, "B1", "https://b.example.com", 2).await;
    let b2 = common::create_test_link(&pool, "B2", "https://b.example.com", 2).await;

    let repo = PgLinkRepository::new(Arc::new(pool));
    let ids: Vec<i32> = repo.list().await.unwrap().iter().map(|l| l.id).collect();

    assert_eq!(ids, vec![a, b1, b2, c]);
}

#[sqlx::test]
async fn test_find_by_id(pool: PgPool) {
    let id = common::create_test_link(&pool, "Site", "https://example.com", 1).await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let found = repo.find_by_id(id).await.unwrap();
    assert_eq!(found.unwrap().titulo, "Site");

    let missing = repo.find_by_id(id + 1000).await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
async fn test_max_ordem(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    assert_eq!(repo.max_ordem().await.unwrap(), None);

    common::create_test_link(&pool, "A", "https://a.example.com", 4).await;
    common::create_test_link(&pool, "B", "https://b.example.com", 2).await;

    assert_eq!(repo.max_ordem().await.unwrap(), Some(4));
}

#[sqlx::test]
async fn test_replace_overwrites_and_clears(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = repo
        .create(NewLink {
            descricao: Some("old".to_string()),
            icone: Some("old".to_string()),
            ..new_link("Old", 7)
        })
        .await
        .unwrap();

    let replaced = repo
        .replace(
            link.id,
            LinkReplacement {
                titulo: "New".to_string(),
                url: "https://new.example.com".to_string(),
                ordem: None,
                descricao: None,
                icone: None,
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(replaced.titulo, "New");
    assert_eq!(replaced.url, "https://new.example.com");
    assert_eq!(replaced.ordem, 7);
    assert!(replaced.descricao.is_none());
    assert!(replaced.icone.is_none());
}

#[sqlx::test]
async fn test_replace_sets_ordem_when_given(pool: PgPool) {
    let id = common::create_test_link(&pool, "Site", "https://example.com", 1).await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let replaced = repo
        .replace(
            id,
            LinkReplacement {
                titulo: "Site".to_string(),
                url: "https://example.com".to_string(),
                ordem: Some(9),
                descricao: None,
                icone: None,
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(replaced.ordem, 9);
}

#[sqlx::test]
async fn test_replace_missing_returns_none(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo
        .replace(
            12345,
            LinkReplacement {
                titulo: "X".to_string(),
                url: "https://example.com".to_string(),
                ordem: None,
                descricao: None,
                icone: None,
            },
        )
        .await
        .unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
async fn test_delete(pool: PgPool) {
    let id = common::create_test_link(&pool, "Site", "https://example.com", 1).await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.delete(id).await.unwrap());
    assert!(repo.find_by_id(id).await.unwrap().is_none());
    assert!(!repo.delete(id).await.unwrap());
}

#[sqlx::test]
async fn test_reorder_assigns_positions(pool: PgPool) {
    let a = common::create_test_link(&pool, "A", "https://a.example.com", 1).await;
    let b = common::create_test_link(&pool, "B", "https://b.example.com", 2).await;
    let c = common::create_test_link(&pool, "C", "https://c.example.com", 3).await;

    let repo = PgLinkRepository::new(Arc::new(pool.clone()));
    repo.reorder(vec![c, a, b]).await.unwrap();

    assert_eq!(common::ordering(&pool).await, vec![(c, 1), (a, 2), (b, 3)]);
}

#[sqlx::test]
async fn test_reorder_rejects_id_deleted_after_listing(pool: PgPool) {
    let a = common::create_test_link(&pool, "A", "https://a.example.com", 1).await;
    let b = common::create_test_link(&pool, "B", "https://b.example.com", 2).await;
    let c = common::create_test_link(&pool, "C", "https://c.example.com", 3).await;

    let repo = PgLinkRepository::new(Arc::new(pool.clone()));
    // The client built its list while `b` still existed.
    repo.delete(b).await.unwrap();

    let err = repo.reorder(vec![c, a, b]).await.unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(err.to_error_info().details["unknown"], json!([b]));
    assert_eq!(common::ordering(&pool).await, vec![(a, 1), (c, 3)]);
}

#[sqlx::test]
async fn test_reorder_rejects_link_created_after_listing(pool: PgPool) {
    let a = common::create_test_link(&pool, "A", "https://a.example.com", 1).await;
    let b = common::create_test_link(&pool, "B", "https://b.example.com", 2).await;
    let d = common::create_test_link(&pool, "D", "https://d.example.com", 3).await;

    let repo = PgLinkRepository::new(Arc::new(pool.clone()));
    let err = repo.reorder(vec![b, a]).await.unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(err.to_error_info().details["missing"], json!([d]));
    assert_eq!(common::ordering(&pool).await, vec![(a, 1), (b, 2), (d, 3)]);
}

#[sqlx::test]
async fn test_reorder_waits_for_concurrent_delete(pool: PgPool) {
    let a = common::create_test_link(&pool, "A", "https://a.example.com", 1).await;
    let b = common::create_test_link(&pool, "B", "https://b.example.com", 2).await;
    let c = common::create_test_link(&pool, "C", "https://c.example.com", 3).await;

    let mut deleting = pool.begin().await.unwrap();
    sqlx::query("DELETE FROM links WHERE id = $1")
        .bind(b)
        .execute(&mut *deleting)
        .await
        .unwrap();

    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let reorder = tokio::spawn({
        let repo = repo.clone();
        async move { repo.reorder(vec![c, a, b]).await }
    });

    deleting.commit().await.unwrap();

    let result = reorder.await.unwrap();

    assert!(matches!(result, Err(AppError::Validation { .. })));
    assert_eq!(common::ordering(&pool).await, vec![(a, 1), (c, 3)]);
}

#[sqlx::test]
async fn test_reorder_empty_table(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.reorder(Vec::new()).await.is_ok());
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
