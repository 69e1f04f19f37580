use std::sync::Arc;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use configs::PaginationConfig;
use service::company::domain::CompanyModel;
use service::pagination::Page;

use super::crud::{logical_delete_routes, ListParams};
use crate::errors::ApiError;
use crate::state::{Companies, CrudState};

pub fn routes(companies: Arc<Companies>, pagination: PaginationConfig) -> Router {
    logical_delete_routes::<Companies>()
        .route("/findAllByParentId/:parent_id", get(find_all_by_parent_id))
        .with_state(CrudState::new(companies, pagination))
}

pub async fn find_all_by_parent_id(
    State(st): State<CrudState<Companies>>,
    parent_id: Result<Path<i32>, PathRejection>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Page<CompanyModel>>, ApiError> {
    let Path(parent_id) = parent_id?;
    let Query(params) = params?;
    let page = params.page_request(st.pagination)?;
    Ok(Json(st.service.find_all_by_parent_id(parent_id, page).await?))
}
