use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use uuid::Uuid;

use common::types::Health;
use service::converter::parse_id;

use crate::errors::JsonApiError;
use crate::state::AppState;

pub mod employees;
pub mod employers;
pub mod reactions;
pub mod resumes;
pub mod users;
pub mod vacancies;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok", service: "jobot" })
}

/// Path segment to identifier; malformed ids are a 400.
pub(crate) fn path_id(raw: &str) -> Result<Uuid, JsonApiError> {
    Ok(parse_id("id", raw)?)
}

/// Build the application router: `/health` plus the entity API under `/api`.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .merge(users::router())
        .merge(employees::router())
        .merge(employers::router())
        .merge(resumes::router())
        .merge(vacancies::router())
        .merge(reactions::router());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
