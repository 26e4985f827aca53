//! Link mutation events delivered to the notification sink.

use serde::Serialize;

use crate::domain::entities::Link;

/// Kind of mutation that produced a [`LinkEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkEventKind {
    Created,
    Updated,
    Deleted,
}

impl LinkEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

/// A committed mutation on a link, queued for best-effort delivery.
///
/// Serializes to the webhook payload:
///
/// ```json
/// {"event": "created", "id": 1, "titulo": "Site", "url": "https://example.com",
///  "ordem": 1, "descricao": null, "icone": null}
/// ```
///
/// For `deleted` events the fields hold the values the link had before removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEvent {
    pub event: LinkEventKind,
    pub id: i32,
    pub titulo: String,
    pub url: String,
    pub ordem: i32,
    pub descricao: Option<String>,
    pub icone: Option<String>,
}

impl LinkEvent {
    pub fn new(event: LinkEventKind, link: &Link) -> Self {
        Self {
            event,
            id: link.id,
            titulo: link.titulo.clone(),
            url: link.url.clone(),
            ordem: link.ordem,
            descricao: link.descricao.clone(),
            icone: link.icone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_link() -> Link {
        Link {
            id: 4,
            titulo: "WhatsApp".to_string(),
            url: "https://wa.me/5500000000".to_string(),
            ordem: 2,
            descricao: Some("Atendimento".to_string()),
            icone: None,
            publicado: false,
        }
    }

    #[test]
    fn test_payload_shape() {
        let event = LinkEvent::new(LinkEventKind::Updated, &sample_link());

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "event": "updated",
                "id": 4,
                "titulo": "WhatsApp",
                "url": "https://wa.me/5500000000",
                "ordem": 2,
                "descricao": "Atendimento",
                "icone": null,
            })
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(LinkEventKind::Created.as_str(), "created");
        assert_eq!(LinkEventKind::Deleted.as_str(), "deleted");
        assert_eq!(
            serde_json::to_value(LinkEventKind::Deleted).unwrap(),
            json!("deleted")
        );
    }
}
