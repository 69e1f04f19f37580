pub mod company;
pub mod crud;
pub mod user;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::{AppState, CrudState, Roles};

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the application router: `/health` plus one CRUD tree per entity
/// under `/api/v1`.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let roles = crud::crud_routes::<Roles>().with_state(CrudState::new(state.roles.clone(), state.pagination));

    let api = Router::new()
        .nest("/company", company::routes(state.companies.clone(), state.pagination))
        .nest("/user", user::routes(state.users.clone(), state.pagination))
        .nest("/role", roles);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
