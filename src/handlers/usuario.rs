//! User handlers: list, create, read, update, delete.

use crate::error::{AppError, StoreError};
use crate::extractors::{ApiJson, ApiPath};
use crate::model::{NewUsuario, Usuario, UsuarioPatch};
use crate::response::{ok, Envelope};
use crate::routes::docs::{ResponseError, UsuarioListResponseOk, UsuarioResponseOk};
use crate::service::parse_id;
use crate::state::AppState;
use axum::{extract::State, Json};

type UsuarioResponse = Result<Json<Envelope<Usuario>>, AppError>;

/// Path ids that are not integers cannot match a row, so they are reported as not found.
fn usuario_id(raw: &str) -> Result<i32, AppError> {
    parse_id(raw).ok_or_else(|| AppError::UsuarioNotFound(raw.to_string()))
}

fn not_found_or_store(e: StoreError, raw: &str) -> AppError {
    match e {
        StoreError::NotFound => AppError::UsuarioNotFound(raw.to_string()),
        other => AppError::Store(other),
    }
}

/// Listar usuarios
#[utoipa::path(
    get,
    path = "/api/v1/usuario",
    tag = "Usuario",
    responses(
        (status = 200, description = "OK", body = UsuarioListResponseOk),
        (status = 500, description = "FAILED", body = ResponseError),
    )
)]
pub async fn list_usuarios(State(state): State<AppState>) -> Result<Json<Envelope<Vec<Usuario>>>, AppError> {
    let usuarios = state.store.list_usuarios().await?;
    Ok(ok(usuarios))
}

/// Crear usuario
#[utoipa::path(
    post,
    path = "/api/v1/usuario",
    tag = "Usuario",
    request_body = NewUsuario,
    responses(
        (status = 200, description = "OK", body = UsuarioResponseOk),
        (status = 400, description = "Malformed body", body = ResponseError),
        (status = 500, description = "FAILED", body = ResponseError),
    )
)]
pub async fn create_usuario(State(state): State<AppState>, ApiJson(body): ApiJson<NewUsuario>) -> UsuarioResponse {
    let usuario = state.store.create_usuario(body).await?;
    tracing::info!(id = usuario.id, "usuario created");
    Ok(ok(usuario))
}

/// Obtener usuario por id
#[utoipa::path(
    get,
    path = "/api/v1/usuario/{id}",
    tag = "Usuario",
    params(("id" = String, Path, description = "Usuario id")),
    responses(
        (status = 200, description = "OK", body = UsuarioResponseOk),
        (status = 400, description = "Usuario no encontrado", body = ResponseError),
        (status = 500, description = "FAILED", body = ResponseError),
    )
)]
pub async fn get_usuario(State(state): State<AppState>, ApiPath(raw_id): ApiPath<String>) -> UsuarioResponse {
    let id = usuario_id(&raw_id)?;
    match state.store.find_usuario(id).await? {
        Some(usuario) => Ok(ok(usuario)),
        None => Err(AppError::UsuarioNotFound(raw_id)),
    }
}

/// Eliminar usuario por id
#[utoipa::path(
    delete,
    path = "/api/v1/usuario/{id}",
    tag = "Usuario",
    params(("id" = String, Path, description = "Usuario id")),
    responses(
        (status = 200, description = "OK, deleted record", body = UsuarioResponseOk),
        (status = 400, description = "Usuario no encontrado", body = ResponseError),
        (status = 500, description = "FAILED", body = ResponseError),
    )
)]
pub async fn delete_usuario(State(state): State<AppState>, ApiPath(raw_id): ApiPath<String>) -> UsuarioResponse {
    let id = usuario_id(&raw_id)?;
    let usuario = state
        .store
        .delete_usuario(id)
        .await
        .map_err(|e| not_found_or_store(e, &raw_id))?;
    tracing::info!(id, "usuario deleted");
    Ok(ok(usuario))
}

/// Actualizar usuario por id
#[utoipa::path(
    patch,
    path = "/api/v1/usuario/{id}",
    tag = "Usuario",
    params(("id" = String, Path, description = "Usuario id")),
    request_body = UsuarioPatch,
    responses(
        (status = 200, description = "OK, updated record", body = UsuarioResponseOk),
        (status = 400, description = "Usuario no encontrado or malformed body", body = ResponseError),
        (status = 500, description = "FAILED", body = ResponseError),
    )
)]
pub async fn update_usuario(
    State(state): State<AppState>,
    ApiPath(raw_id): ApiPath<String>,
    ApiJson(patch): ApiJson<UsuarioPatch>,
) -> UsuarioResponse {
    let id = usuario_id(&raw_id)?;
    let usuario = state
        .store
        .update_usuario(id, patch)
        .await
        .map_err(|e| not_found_or_store(e, &raw_id))?;
    Ok(ok(usuario))
}
