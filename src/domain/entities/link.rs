//! Link entity: one titled URL in the bio page.

/// A stored link.
///
/// `ordem` defines display order. It is kept unique by the reorder operation
/// but the schema does not enforce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i32,
    pub titulo: String,
    pub url: String,
    pub ordem: i32,
    pub descricao: Option<String>,
    pub icone: Option<String>,
    pub publicado: bool,
}

/// Link fields as submitted by a client, before validation.
///
/// Used for both create and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDraft {
    pub titulo: String,
    pub url: String,
    pub ordem: Option<i32>,
    pub descricao: Option<String>,
    pub icone: Option<String>,
}

/// Validated input for inserting a link.
///
/// `ordem` is resolved by the service before it reaches the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub titulo: String,
    pub url: String,
    pub ordem: i32,
    pub descricao: Option<String>,
    pub icone: Option<String>,
}

/// Full replacement of a link's editable fields.
///
/// Unlike a patch, `None` for `descricao`/`icone` clears the column.
/// `ordem: None` keeps the current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReplacement {
    pub titulo: String,
    pub url: String,
    pub ordem: Option<i32>,
    pub descricao: Option<String>,
    pub icone: Option<String>,
}
