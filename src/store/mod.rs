//! Persistence gateway: typed CRUD over users and tickets.
//!
//! Implementations report failures as a classified [`StoreError`] so callers never
//! inspect driver-specific error text.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::StoreError;
use crate::model::{NewUsuario, Ticket, TicketDraft, Usuario, UsuarioPatch};
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;

    /// All users ordered by id.
    async fn list_usuarios(&self) -> Result<Vec<Usuario>, StoreError>;

    async fn find_usuario(&self, id: i32) -> Result<Option<Usuario>, StoreError>;

    async fn create_usuario(&self, new: NewUsuario) -> Result<Usuario, StoreError>;

    /// Fails with [`StoreError::NotFound`] when no user has `id`.
    async fn update_usuario(&self, id: i32, patch: UsuarioPatch) -> Result<Usuario, StoreError>;

    /// Returns the deleted record. Fails with [`StoreError::NotFound`] when no user has `id`,
    /// and with a foreign key violation while the user still authors tickets.
    async fn delete_usuario(&self, id: i32) -> Result<Usuario, StoreError>;

    /// All tickets ordered by id.
    async fn list_tickets(&self) -> Result<Vec<Ticket>, StoreError>;

    /// Fails with a foreign key violation when the author does not exist.
    async fn create_ticket(&self, draft: TicketDraft) -> Result<Ticket, StoreError>;
}
