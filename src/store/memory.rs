//! In-process store with the same constraints as the PostgreSQL schema.
//! Used when no `DATABASE_URL` is configured and throughout the tests.

use super::Store;
use crate::error::{ConstraintKind, StoreError};
use crate::model::{NewUsuario, Ticket, TicketDraft, Usuario, UsuarioPatch};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    usuarios: BTreeMap<i32, Usuario>,
    tickets: BTreeMap<i32, Ticket>,
    next_usuario_id: i32,
    next_ticket_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every call fails with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store switched off".into()));
        }
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

fn unique_email(tables: &Tables, email: &str, except: Option<i32>) -> Result<(), StoreError> {
    let taken = tables
        .usuarios
        .values()
        .any(|u| u.email == email && Some(u.id) != except);
    if taken {
        return Err(StoreError::ConstraintViolation {
            kind: ConstraintKind::Unique,
            message: format!("email '{}' already exists", email),
        });
    }
    Ok(())
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.tables().map(|_| ())
    }

    async fn list_usuarios(&self) -> Result<Vec<Usuario>, StoreError> {
        Ok(self.tables()?.usuarios.values().cloned().collect())
    }

    async fn find_usuario(&self, id: i32) -> Result<Option<Usuario>, StoreError> {
        Ok(self.tables()?.usuarios.get(&id).cloned())
    }

    async fn create_usuario(&self, new: NewUsuario) -> Result<Usuario, StoreError> {
        let mut tables = self.tables()?;
        unique_email(&tables, &new.email, None)?;
        tables.next_usuario_id += 1;
        let usuario = Usuario {
            id: tables.next_usuario_id,
            email: new.email,
            name: new.name,
        };
        tables.usuarios.insert(usuario.id, usuario.clone());
        Ok(usuario)
    }

    async fn update_usuario(&self, id: i32, patch: UsuarioPatch) -> Result<Usuario, StoreError> {
        let mut tables = self.tables()?;
        if !tables.usuarios.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if let Some(email) = &patch.email {
            unique_email(&tables, email, Some(id))?;
        }
        let usuario = tables.usuarios.get_mut(&id).ok_or(StoreError::NotFound)?;
        patch.apply(usuario);
        Ok(usuario.clone())
    }

    async fn delete_usuario(&self, id: i32) -> Result<Usuario, StoreError> {
        let mut tables = self.tables()?;
        if !tables.usuarios.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if tables.tickets.values().any(|t| t.author_id == id) {
            return Err(StoreError::ConstraintViolation {
                kind: ConstraintKind::ForeignKey,
                message: format!("usuario {} is still referenced by ticket", id),
            });
        }
        tables.usuarios.remove(&id).ok_or(StoreError::NotFound)
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, StoreError> {
        Ok(self.tables()?.tickets.values().cloned().collect())
    }

    async fn create_ticket(&self, draft: TicketDraft) -> Result<Ticket, StoreError> {
        let mut tables = self.tables()?;
        if !tables.usuarios.contains_key(&draft.author_id) {
            return Err(StoreError::ConstraintViolation {
                kind: ConstraintKind::ForeignKey,
                message: format!("usuario {} does not exist", draft.author_id),
            });
        }
        tables.next_ticket_id += 1;
        let ticket = Ticket {
            id: tables.next_ticket_id,
            content: draft.content,
            create_at: draft.create_at,
            author_id: draft.author_id,
        };
        tables.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_usuario(email: &str) -> NewUsuario {
        NewUsuario {
            email: email.into(),
            name: "A".into(),
        }
    }

    fn draft(author_id: i32) -> TicketDraft {
        TicketDraft {
            content: "hi".into(),
            create_at: Utc::now(),
            author_id,
        }
    }

    #[tokio::test]
    async fn ids_are_monotonic_and_not_reused() {
        let store = MemoryStore::new();
        let a = store.create_usuario(new_usuario("a@x.com")).await.unwrap();
        store.delete_usuario(a.id).await.unwrap();
        let b = store.create_usuario(new_usuario("b@x.com")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let store = MemoryStore::new();
        store.create_usuario(new_usuario("a@x.com")).await.unwrap();
        let err = store.create_usuario(new_usuario("a@x.com")).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::ConstraintViolation {
                kind: ConstraintKind::Unique,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn update_may_keep_own_email() {
        let store = MemoryStore::new();
        let a = store.create_usuario(new_usuario("a@x.com")).await.unwrap();
        let patch = UsuarioPatch {
            email: Some("a@x.com".into()),
            name: Some("Z".into()),
        };
        let updated = store.update_usuario(a.id, patch).await.unwrap();
        assert_eq!(updated.name, "Z");
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(store.delete_usuario(5).await, Err(StoreError::NotFound)));
        assert!(matches!(
            store.update_usuario(5, UsuarioPatch::default()).await,
            Err(StoreError::NotFound)
        ));
        assert_eq!(store.find_usuario(5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn ticket_author_must_exist() {
        let store = MemoryStore::new();
        let err = store.create_ticket(draft(1)).await.unwrap_err();
        assert!(err.is_foreign_key_violation());
        assert!(store.list_tickets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn author_with_tickets_cannot_be_deleted() {
        let store = MemoryStore::new();
        let a = store.create_usuario(new_usuario("a@x.com")).await.unwrap();
        store.create_ticket(draft(a.id)).await.unwrap();
        let err = store.delete_usuario(a.id).await.unwrap_err();
        assert!(err.is_foreign_key_violation());
    }

    #[tokio::test]
    async fn switched_off_store_is_unavailable() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        store.set_unavailable(false);
        assert!(store.ping().await.is_ok());
    }
}
