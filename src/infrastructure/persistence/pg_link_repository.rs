//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkReplacement, NewLink};
use crate::domain::ordering::{OrderMismatch, check_permutation};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Row shape of the `links` table.
#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i32,
    titulo: String,
    url: String,
    ordem: i32,
    descricao: Option<String>,
    icone: Option<String>,
    publicado: bool,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link {
            id: r.id,
            titulo: r.titulo,
            url: r.url,
            ordem: r.ordem,
            descricao: r.descricao,
            icone: r.icone,
            publicado: r.publicado,
        }
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses bound parameters throughout; statements are prepared and cached by SQLx.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, titulo, url, ordem, descricao, icone, publicado
            FROM links
            ORDER BY ordem ASC, id ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, titulo, url, ordem, descricao, icone, publicado
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn max_ordem(&self) -> Result<Option<i32>, AppError> {
        let max = sqlx::query_scalar::<_, Option<i32>>("SELECT MAX(ordem) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(max)
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (titulo, url, ordem, descricao, icone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, titulo, url, ordem, descricao, icone, publicado
            "#,
        )
        .bind(new_link.titulo)
        .bind(new_link.url)
        .bind(new_link.ordem)
        .bind(new_link.descricao)
        .bind(new_link.icone)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn replace(
        &self,
        id: i32,
        replacement: LinkReplacement,
    ) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET titulo = $2,
                url = $3,
                ordem = COALESCE($4, ordem),
                descricao = $5,
                icone = $6
            WHERE id = $1
            RETURNING id, titulo, url, ordem, descricao, icone, publicado
            "#,
        )
        .bind(id)
        .bind(replacement.titulo)
        .bind(replacement.url)
        .bind(replacement.ordem)
        .bind(replacement.descricao)
        .bind(replacement.icone)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn reorder(&self, ordered_ids: Vec<i32>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        // Conflicts with INSERT and DELETE until commit, not with reads.
        sqlx::query("LOCK TABLE links IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM links")
            .fetch_all(&mut *tx)
            .await?;

        check_permutation(&ordered_ids, &existing)?;

        for (position, id) in (1_i32..).zip(ordered_ids) {
            let result = sqlx::query("UPDATE links SET ordem = $1 WHERE id = $2")
                .bind(position)
                .bind(id)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() != 1 {
                // Dropping `tx` rolls back the positions written so far.
                return Err(OrderMismatch {
                    missing: Vec::new(),
                    unknown: vec![id],
                    duplicates: Vec::new(),
                }
                .into());
            }
        }

        tx.commit().await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
