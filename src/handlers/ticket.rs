//! Ticket handlers: list and create.

use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::model::{NewTicket, Ticket, TicketDraft};
use crate::response::{ok, Envelope};
use crate::routes::docs::{ResponseError, TicketListResponseOk, TicketResponseOk};
use crate::service::{normalize_create_at, validate_user_reference};
use crate::state::AppState;
use axum::{extract::State, Json};

/// Listar tickets
#[utoipa::path(
    get,
    path = "/api/v1/ticket",
    tag = "Ticket",
    responses(
        (status = 200, description = "OK", body = TicketListResponseOk),
        (status = 500, description = "FAILED", body = ResponseError),
    )
)]
pub async fn list_tickets(State(state): State<AppState>) -> Result<Json<Envelope<Vec<Ticket>>>, AppError> {
    let tickets = state.store.list_tickets().await?;
    Ok(ok(tickets))
}

/// Crear ticket
///
/// The author is looked up first; the insert itself is also guarded by the foreign key,
/// so an author deleted in between still yields the not-found response.
#[utoipa::path(
    post,
    path = "/api/v1/ticket",
    tag = "Ticket",
    request_body = NewTicket,
    responses(
        (status = 200, description = "OK", body = TicketResponseOk),
        (status = 400, description = "Usuario no encontrado, missing content, invalid createAt or malformed body", body = ResponseError),
        (status = 500, description = "FAILED", body = ResponseError),
    )
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewTicket>,
) -> Result<Json<Envelope<Ticket>>, AppError> {
    let author_label = body
        .author_id
        .as_ref()
        .map_or_else(|| "undefined".to_string(), ToString::to_string);

    let author = match &body.author_id {
        Some(raw) => validate_user_reference(state.store.as_ref(), raw).await,
        None => None,
    };
    let Some(author) = author else {
        return Err(AppError::UsuarioNotFound(author_label));
    };

    let content = body
        .content
        .ok_or_else(|| AppError::BadRequest("content es requerido".into()))?;
    let draft = TicketDraft {
        create_at: normalize_create_at(body.create_at.as_ref())?,
        content,
        author_id: author.id,
    };
    let ticket = state.store.create_ticket(draft).await.map_err(|e| {
        if e.is_foreign_key_violation() {
            AppError::UsuarioNotFound(author_label.clone())
        } else {
            AppError::Store(e)
        }
    })?;
    tracing::info!(id = ticket.id, author_id = ticket.author_id, "ticket created");
    Ok(ok(ticket))
}
