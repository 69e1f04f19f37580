use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use configs::PaginationConfig;
use service::user::domain::UserModel;

use super::crud::crud_routes;
use crate::errors::ApiError;
use crate::state::{CrudState, Users};

pub fn routes(users: Arc<Users>, pagination: PaginationConfig) -> Router {
    crud_routes::<Users>()
        .route("/register", post(register))
        .with_state(CrudState::new(users, pagination))
}

/// Self-registration: always creates a plain `USER`.
pub async fn register(
    State(st): State<CrudState<Users>>,
    body: Result<Json<UserModel>, JsonRejection>,
) -> Result<Json<UserModel>, ApiError> {
    let Json(model) = body?;
    Ok(Json(st.service.register(model).await?))
}
