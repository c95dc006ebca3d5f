//! Ticket API: users and their tickets over REST, backed by PostgreSQL.
//!
//! Every `/api/v1` response is wrapped in a `{status, data}` envelope; failures are
//! translated in one place, [`AppError`]'s `IntoResponse`.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError, ConstraintKind, StoreError};
pub use migration::{ensure_database_exists, ensure_tables};
pub use model::{NewTicket, NewUsuario, Ticket, Usuario, UsuarioPatch};
pub use response::{failed, ok, Envelope, Status};
pub use routes::{app, api_routes, common_routes};
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Store};
