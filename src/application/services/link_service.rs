//! Link management service.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::entities::{Link, LinkDraft, LinkReplacement, NewLink};
use crate::domain::link_event::{LinkEvent, LinkEventKind};
use crate::domain::ordering::next_ordem;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::url_normalizer::normalize_url;

/// Service for listing, editing and ordering links.
///
/// Every successful mutation queues a [`LinkEvent`] for the notification
/// worker. Queueing never blocks and never fails the request: a full or
/// closed queue only produces a warning.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    events: mpsc::Sender<LinkEvent>,
}

/// Rejects blank titles and normalizes the URL.
fn validate_draft(draft: LinkDraft) -> Result<LinkReplacement, AppError> {
    if draft.titulo.trim().is_empty() {
        return Err(AppError::bad_request(
            "Title must not be empty",
            json!({ "field": "titulo" }),
        ));
    }

    let url = normalize_url(&draft.url).map_err(|e| {
        AppError::bad_request(
            "Invalid URL format",
            json!({ "field": "url", "reason": e.to_string() }),
        )
    })?;

    Ok(LinkReplacement {
        titulo: draft.titulo,
        url,
        ordem: draft.ordem,
        descricao: draft.descricao,
        icone: draft.icone,
    })
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, events: mpsc::Sender<LinkEvent>) -> Self {
        Self {
            link_repository,
            events,
        }
    }

    /// Returns all links in display order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list().await
    }

    /// Validates and stores a new link.
    ///
    /// Without an explicit `ordem` the link is placed after the current last
    /// one. The max lookup and the insert are separate statements, so two
    /// concurrent creates may receive the same position.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a blank title or an invalid URL.
    pub async fn create_link(&self, draft: LinkDraft) -> Result<Link, AppError> {
        let valid = validate_draft(draft)?;

        let ordem = match valid.ordem {
            Some(ordem) => ordem,
            None => next_ordem(self.link_repository.max_ordem().await?),
        };

        let link = self
            .link_repository
            .create(NewLink {
                titulo: valid.titulo,
                url: valid.url,
                ordem,
                descricao: valid.descricao,
                icone: valid.icone,
            })
            .await?;

        tracing::info!(link_id = link.id, ordem = link.ordem, "Link created");
        self.publish(LinkEventKind::Created, &link);

        Ok(link)
    }

    /// Replaces every editable field of a link.
    ///
    /// `descricao` and `icone` are cleared when absent; `ordem` is kept
    /// when absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for invalid input and
    /// [`AppError::NotFound`] if the link does not exist.
    pub async fn update_link(&self, id: i32, draft: LinkDraft) -> Result<Link, AppError> {
        let replacement = validate_draft(draft)?;

        let link = self
            .link_repository
            .replace(id, replacement)
            .await?
            .ok_or_else(|| link_not_found(id))?;

        tracing::info!(link_id = link.id, "Link updated");
        self.publish(LinkEventKind::Updated, &link);

        Ok(link)
    }

    /// Deletes a link permanently.
    ///
    /// The `deleted` notification carries the values the link had before removal.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn delete_link(&self, id: i32) -> Result<(), AppError> {
        let link = self
            .link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| link_not_found(id))?;

        if !self.link_repository.delete(id).await? {
            return Err(link_not_found(id));
        }

        tracing::info!(link_id = id, "Link deleted");
        self.publish(LinkEventKind::Deleted, &link);

        Ok(())
    }

    /// Assigns `ordem = 1..N` following `ordered_ids`.
    ///
    /// The request must list every stored id exactly once. Otherwise nothing
    /// is written. The check and the writes share one locked transaction, so
    /// a concurrent create or delete cannot slip between them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with `missing`, `unknown` and
    /// `duplicates` details when the ids are not a permutation of the stored set.
    pub async fn reorder_links(&self, ordered_ids: Vec<i32>) -> Result<(), AppError> {
        let count = ordered_ids.len();
        self.link_repository.reorder(ordered_ids).await?;
        tracing::info!(count, "Links reordered");

        Ok(())
    }

    /// Checks database connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the database is unreachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    fn publish(&self, kind: LinkEventKind, link: &Link) {
        match self.events.try_send(LinkEvent::new(kind, link)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    event = kind.as_str(),
                    link_id = link.id,
                    "Notification queue full, event dropped"
                );
            }
            Err(TrySendError::Closed(_)) => {
                tracing::warn!(
                    event = kind.as_str(),
                    link_id = link.id,
                    "Notification queue closed, event dropped"
                );
            }
        }
    }
}

fn link_not_found(id: i32) -> AppError {
    AppError::not_found("Link not found", json!({ "id": id }))
}
