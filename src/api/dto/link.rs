//! DTOs for link endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Link, LinkDraft};

/// Request body for `POST /links` and `PUT /links/{id}`.
///
/// `PUT` is a full replace: omitted `descricao`/`icone` are cleared, an
/// omitted `ordem` keeps the current position.
#[derive(Debug, Deserialize, Validate)]
pub struct LinkRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub titulo: String,

    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    pub ordem: Option<i32>,

    pub descricao: Option<String>,

    #[validate(length(max = 255, message = "Icon must be at most 255 characters"))]
    pub icone: Option<String>,
}

impl From<LinkRequest> for LinkDraft {
    fn from(req: LinkRequest) -> Self {
        LinkDraft {
            titulo: req.titulo,
            url: req.url,
            ordem: req.ordem,
            descricao: req.descricao,
            icone: req.icone,
        }
    }
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LinkResponse {
    pub id: i32,
    pub titulo: String,
    pub url: String,
    pub ordem: i32,
    pub descricao: Option<String>,
    pub icone: Option<String>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        LinkResponse {
            id: link.id,
            titulo: link.titulo,
            url: link.url,
            ordem: link.ordem,
            descricao: link.descricao,
            icone: link.icone,
        }
    }
}
