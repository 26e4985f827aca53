//! Schema migrations for the `links` table.
//!
//! Revisions are the SQL files in `migrations/`, embedded at compile time.
//! Each file name starts with its revision id; revisions form a linear chain
//! where every revision's predecessor is the one immediately before it.
//!
//! Deployments created before migration tracking existed already have a
//! `links` table but no `_sqlx_migrations` table. [`ensure_baseline`] marks the
//! first revision as applied for them so [`run`] does not try to recreate the
//! table. Later revisions only add columns with `IF NOT EXISTS` guards.

use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migration, Migrator};

/// Embedded migration set from `./migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Same DDL sqlx uses for its tracking table.
const CREATE_TRACKING_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS _sqlx_migrations (
    version BIGINT PRIMARY KEY,
    description TEXT NOT NULL,
    installed_on TIMESTAMPTZ NOT NULL DEFAULT now(),
    success BOOLEAN NOT NULL,
    checksum BYTEA NOT NULL,
    execution_time BIGINT NOT NULL
)
"#;

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("migration chain is empty")]
    Empty,

    #[error("revision {revision} must come after {previous}")]
    OutOfOrder { previous: i64, revision: i64 },
}

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("database error during migration: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] MigrateError),
}

/// One schema revision and the revision it builds on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    pub revision: i64,
    pub predecessor: Option<i64>,
    pub description: String,
}

/// Ordered, linear chain of schema revisions.
#[derive(Debug, Clone)]
pub struct MigrationChain {
    revisions: Vec<Revision>,
}

impl MigrationChain {
    /// Builds a chain from `(revision, description)` pairs in application order.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Empty`] for no revisions and
    /// [`ChainError::OutOfOrder`] if revision ids are not strictly increasing.
    pub fn from_revisions<I>(revisions: I) -> Result<Self, ChainError>
    where
        I: IntoIterator<Item = (i64, String)>,
    {
        let mut chain: Vec<Revision> = Vec::new();

        for (revision, description) in revisions {
            let predecessor = chain.last().map(|r| r.revision);
            if let Some(previous) = predecessor {
                if revision <= previous {
                    return Err(ChainError::OutOfOrder { previous, revision });
                }
            }
            chain.push(Revision {
                revision,
                predecessor,
                description,
            });
        }

        if chain.is_empty() {
            return Err(ChainError::Empty);
        }

        Ok(Self { revisions: chain })
    }

    /// The chain embedded in this binary.
    ///
    /// # Errors
    ///
    /// See [`Self::from_revisions`].
    pub fn current() -> Result<Self, ChainError> {
        Self::from_revisions(
            up_migrations().map(|m| (m.version, m.description.to_string())),
        )
    }

    pub fn revisions(&self) -> &[Revision] {
        &self.revisions
    }

    /// First revision; the one recorded by baselining.
    pub fn base(&self) -> &Revision {
        &self.revisions[0]
    }

    /// Latest revision; the schema shape after a full upgrade.
    pub fn head(&self) -> &Revision {
        &self.revisions[self.revisions.len() - 1]
    }
}

fn up_migrations() -> impl Iterator<Item = &'static Migration> {
    MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
}

async fn table_exists(pool: &PgPool, table: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT to_regclass($1) IS NOT NULL")
        .bind(table)
        .fetch_one(pool)
        .await
}

/// Records the first revision as applied on storage that predates tracking.
///
/// Does nothing unless `links` exists and `_sqlx_migrations` does not.
/// Returns `true` when a baseline was written.
///
/// # Errors
///
/// Returns [`MigrationError`] on database errors or an empty migration set.
pub async fn ensure_baseline(pool: &PgPool) -> Result<bool, MigrationError> {
    let has_links = table_exists(pool, "links").await?;
    let has_tracking = table_exists(pool, "_sqlx_migrations").await?;

    if !has_links || has_tracking {
        return Ok(false);
    }

    let base = up_migrations().next().ok_or(ChainError::Empty)?;

    let mut tx = pool.begin().await?;

    sqlx::query(CREATE_TRACKING_TABLE).execute(&mut *tx).await?;

    sqlx::query(
        r#"
        INSERT INTO _sqlx_migrations (version, description, success, checksum, execution_time)
        VALUES ($1, $2, TRUE, $3, 0)
        ON CONFLICT (version) DO NOTHING
        "#,
    )
    .bind(base.version)
    .bind(&*base.description)
    .bind(&*base.checksum)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(revision = base.version, "Baselined existing links table");

    Ok(true)
}

/// Baselines if needed, then applies every pending revision in order.
///
/// Returns `true` when an untracked `links` table was baselined first.
///
/// # Errors
///
/// Returns [`MigrationError`] if baselining or any revision fails.
pub async fn run(pool: &PgPool) -> Result<bool, MigrationError> {
    let baselined = ensure_baseline(pool).await?;
    MIGRATOR.run(pool).await?;

    let chain = MigrationChain::current()?;
    tracing::info!(head = chain.head().revision, baselined, "Schema is up to date");

    Ok(baselined)
}

/// Revisions recorded as successfully applied, ascending.
///
/// Empty when the tracking table does not exist yet.
///
/// # Errors
///
/// Returns [`MigrationError::Database`] on database errors.
pub async fn applied_revisions(pool: &PgPool) -> Result<Vec<i64>, MigrationError> {
    if !table_exists(pool, "_sqlx_migrations").await? {
        return Ok(Vec::new());
    }

    let versions = sqlx::query_scalar::<_, i64>(
        "SELECT version FROM _sqlx_migrations WHERE success ORDER BY version",
    )
    .fetch_all(pool)
    .await?;

    Ok(versions)
}
