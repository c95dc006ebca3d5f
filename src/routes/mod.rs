//! Router assembly.

pub mod common;
pub mod docs;

pub use common::common_routes;

use crate::error::AppError;
use crate::handlers::{create_ticket, create_usuario, delete_usuario, get_usuario, list_tickets, list_usuarios, update_usuario};
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, http::Uri, response::IntoResponse, response::Response, routing::get, Router};
use docs::ApiDoc;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const API_PREFIX: &str = "/api/v1";
pub const DOCS_PATH: &str = "/api/v1/docs";
pub const DOCS_JSON_PATH: &str = "/api/v1/docs.json";

/// Resource routes, relative to [`API_PREFIX`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/usuario", get(list_usuarios).post(create_usuario))
        .route(
            "/usuario/{id}",
            get(get_usuario).patch(update_usuario).delete(delete_usuario),
        )
        .route("/ticket", get(list_tickets).post(create_ticket))
}

/// Full application: resource routes, docs, operational routes, and the failure
/// handling every response passes through (fallbacks and panic capture).
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .nest(API_PREFIX, api_routes().method_not_allowed_fallback(method_not_allowed))
        .merge(common_routes())
        .merge(SwaggerUi::new(DOCS_PATH).url(DOCS_JSON_PATH, ApiDoc::openapi()))
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(detail).into_response()
}
