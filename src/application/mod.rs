//! Application layer services implementing business logic.
//!
//! Services validate input, apply business rules and coordinate repository
//! calls. HTTP handlers and the admin CLI talk to these, never to
//! repositories directly.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link CRUD, ordering and notifications
//! - [`services::auth_service::AuthService`] - Admin login and bearer token checks

pub mod services;
