use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{AuthService, LinkService};
use crate::domain::link_event::LinkEvent;
use crate::infrastructure::persistence::PgLinkRepository;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<PgLinkRepository>>,
    pub auth_service: Arc<AuthService>,
    pub notification_sender: mpsc::Sender<LinkEvent>,
}
