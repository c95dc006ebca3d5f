//! PostgreSQL store over a sqlx pool.

use super::Store;
use crate::error::StoreError;
use crate::model::{NewUsuario, Ticket, TicketDraft, Usuario, UsuarioPatch};
use async_trait::async_trait;
use sqlx::PgPool;

const SELECT_USUARIOS: &str = "SELECT id, email, name FROM usuario ORDER BY id";
const SELECT_USUARIO: &str = "SELECT id, email, name FROM usuario WHERE id = $1";
const INSERT_USUARIO: &str = "INSERT INTO usuario (email, name) VALUES ($1, $2) RETURNING id, email, name";
const UPDATE_USUARIO: &str = "UPDATE usuario SET email = COALESCE($2, email), name = COALESCE($3, name) \
     WHERE id = $1 RETURNING id, email, name";
const DELETE_USUARIO: &str = "DELETE FROM usuario WHERE id = $1 RETURNING id, email, name";
const SELECT_TICKETS: &str = "SELECT id, content, create_at, author_id FROM ticket ORDER BY id";
const INSERT_TICKET: &str = "INSERT INTO ticket (content, create_at, author_id) VALUES ($1, $2, $3) \
     RETURNING id, content, create_at, author_id";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list_usuarios(&self) -> Result<Vec<Usuario>, StoreError> {
        tracing::debug!(sql = %SELECT_USUARIOS, "query");
        let rows = sqlx::query_as::<_, Usuario>(SELECT_USUARIOS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_usuario(&self, id: i32) -> Result<Option<Usuario>, StoreError> {
        tracing::debug!(sql = %SELECT_USUARIO, id, "query");
        let row = sqlx::query_as::<_, Usuario>(SELECT_USUARIO)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_usuario(&self, new: NewUsuario) -> Result<Usuario, StoreError> {
        tracing::debug!(sql = %INSERT_USUARIO, "query");
        let row = sqlx::query_as::<_, Usuario>(INSERT_USUARIO)
            .bind(&new.email)
            .bind(&new.name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_usuario(&self, id: i32, patch: UsuarioPatch) -> Result<Usuario, StoreError> {
        tracing::debug!(sql = %UPDATE_USUARIO, id, "query");
        let row = sqlx::query_as::<_, Usuario>(UPDATE_USUARIO)
            .bind(id)
            .bind(patch.email.as_deref())
            .bind(patch.name.as_deref())
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or(StoreError::NotFound)
    }

    async fn delete_usuario(&self, id: i32) -> Result<Usuario, StoreError> {
        tracing::debug!(sql = %DELETE_USUARIO, id, "query");
        let row = sqlx::query_as::<_, Usuario>(DELETE_USUARIO)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or(StoreError::NotFound)
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, StoreError> {
        tracing::debug!(sql = %SELECT_TICKETS, "query");
        let rows = sqlx::query_as::<_, Ticket>(SELECT_TICKETS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_ticket(&self, draft: TicketDraft) -> Result<Ticket, StoreError> {
        tracing::debug!(sql = %INSERT_TICKET, author_id = draft.author_id, "query");
        let row = sqlx::query_as::<_, Ticket>(INSERT_TICKET)
            .bind(&draft.content)
            .bind(draft.create_at)
            .bind(draft.author_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }
}
