//! OpenAPI document and the envelope schemas it references.
//!
//! The envelope is generic at runtime; these concrete shapes exist only so the
//! document can name each response body.

use crate::model::{NewTicket, NewUsuario, Ticket, Usuario, UsuarioPatch};
use crate::response::Status;
use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UsuarioResponseOk {
    #[schema(example = "OK")]
    status: Status,
    data: Usuario,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UsuarioListResponseOk {
    #[schema(example = "OK")]
    status: Status,
    data: Vec<Usuario>,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct TicketResponseOk {
    #[schema(example = "OK")]
    status: Status,
    data: Ticket,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct TicketListResponseOk {
    #[schema(example = "OK")]
    status: Status,
    data: Vec<Ticket>,
}

/// `data.error` is the message for 4xx responses and `{kind, message}` for 5xx.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ErrorPayload {
    #[schema(value_type = Object, example = "Usuario con id: 999 no encontrado")]
    error: serde_json::Value,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ResponseError {
    #[schema(example = "FAILED")]
    status: Status,
    data: ErrorPayload,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "App Api", version = "1.0.0"),
    paths(
        crate::handlers::usuario::list_usuarios,
        crate::handlers::usuario::create_usuario,
        crate::handlers::usuario::get_usuario,
        crate::handlers::usuario::delete_usuario,
        crate::handlers::usuario::update_usuario,
        crate::handlers::ticket::list_tickets,
        crate::handlers::ticket::create_ticket,
    ),
    components(schemas(
        Status,
        Usuario,
        Ticket,
        NewUsuario,
        UsuarioPatch,
        NewTicket,
        UsuarioResponseOk,
        UsuarioListResponseOk,
        TicketResponseOk,
        TicketListResponseOk,
        ErrorPayload,
        ResponseError,
    )),
    tags(
        (name = "Usuario", description = "Usuarios"),
        (name = "Ticket", description = "Tickets de usuarios"),
    )
)]
pub struct ApiDoc;
