//! Handlers shared by every entity, written once against `CrudService`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use configs::PaginationConfig;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use service::crud::{CrudService, LogicalDeleteService, SelectItem};
use service::pagination::{Page, PageRequest};
use tracing::debug;

use crate::errors::ApiError;
use crate::state::CrudState;

/// `?model={json}&page=N&size=M`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub model: Option<String>,
    pub page: Option<u64>,
    pub size: Option<u64>,
}

impl ListParams {
    /// Decode the filter-by-example model; absent or blank means "match all".
    pub fn filter<M: DeserializeOwned + Default>(&self) -> Result<M, ApiError> {
        match self.model.as_deref().map(str::trim) {
            None | Some("") => Ok(M::default()),
            Some(raw) => serde_json::from_str(raw).map_err(|e| ApiError::BadRequest(format!("model: {}", e))),
        }
    }

    pub fn page_request(&self, cfg: PaginationConfig) -> Result<PageRequest, ApiError> {
        Ok(PageRequest::normalize(self.page, self.size, cfg)?)
    }
}

pub fn crud_routes<S: CrudService>() -> Router<CrudState<S>> {
    Router::new()
        .route("/findById/:id", get(find_by_id::<S>))
        .route("/findAll", get(find_all::<S>))
        .route("/countAll", get(count_all::<S>))
        .route("/findAllSelect", get(find_all_select::<S>))
        .route("/save", post(save::<S>))
        .route("/deleteById/:id", delete(delete_by_id::<S>))
}

/// CRUD routes plus `restoreById` for logically deleted entities.
pub fn logical_delete_routes<S: LogicalDeleteService>() -> Router<CrudState<S>> {
    crud_routes::<S>().route("/restoreById/:id", put(restore_by_id::<S>))
}

pub async fn find_by_id<S: CrudService>(
    State(st): State<CrudState<S>>,
    id: Result<Path<S::Id>, PathRejection>,
) -> Result<Json<S::Model>, ApiError> {
    let Path(id) = id?;
    Ok(Json(st.service.find_by_id(id).await?))
}

pub async fn find_all<S: CrudService>(
    State(st): State<CrudState<S>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Page<S::Model>>, ApiError> {
    let Query(params) = params?;
    let filter = params.filter::<S::Model>()?;
    let page = params.page_request(st.pagination)?;
    debug!(entity = st.service.entity_name(), page = page.page, size = page.size, "find_all");
    Ok(Json(st.service.find_all(filter, page).await?))
}

pub async fn count_all<S: CrudService>(
    State(st): State<CrudState<S>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<u64>, ApiError> {
    let Query(params) = params?;
    let filter = params.filter::<S::Model>()?;
    Ok(Json(st.service.count_all(filter).await?))
}

pub async fn find_all_select<S: CrudService>(
    State(st): State<CrudState<S>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Page<SelectItem<S::Id>>>, ApiError> {
    let Query(params) = params?;
    let filter = params.filter::<S::Model>()?;
    let page = params.page_request(st.pagination)?;
    Ok(Json(st.service.find_all_select(filter, page).await?))
}

pub async fn save<S: CrudService>(
    State(st): State<CrudState<S>>,
    body: Result<Json<S::Model>, JsonRejection>,
) -> Result<Json<S::Model>, ApiError> {
    let Json(model) = body?;
    Ok(Json(st.service.save(model).await?))
}

pub async fn delete_by_id<S: CrudService>(
    State(st): State<CrudState<S>>,
    id: Result<Path<S::Id>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    st.service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn restore_by_id<S: LogicalDeleteService>(
    State(st): State<CrudState<S>>,
    id: Result<Path<S::Id>, PathRejection>,
) -> Result<Json<S::Model>, ApiError> {
    let Path(id) = id?;
    Ok(Json(st.service.restore_by_id(id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::company::domain::CompanyModel;

    #[test]
    fn blank_model_matches_everything() {
        let params = ListParams { model: Some("  ".into()), ..Default::default() };
        let filter: CompanyModel = params.filter().expect("default filter");
        assert_eq!(filter, CompanyModel::default());
    }

    #[test]
    fn malformed_model_is_bad_request() {
        let params = ListParams { model: Some("{name:".into()), ..Default::default() };
        let err = params.filter::<CompanyModel>().unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m.starts_with("model:")));
    }

    #[test]
    fn page_defaults_and_clamps() -> Result<(), ApiError> {
        let cfg = PaginationConfig::default();
        assert_eq!(ListParams::default().page_request(cfg)?, PageRequest { page: 0, size: 10 });
        let params = ListParams { page: Some(2), size: Some(1000), ..Default::default() };
        assert_eq!(params.page_request(cfg)?, PageRequest { page: 2, size: 100 });
        Ok(())
    }

    #[test]
    fn out_of_range_page_is_bad_request() {
        let params = ListParams { page: Some(u64::MAX), ..Default::default() };
        let err = params.page_request(PaginationConfig::default()).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m.starts_with("page:")), "{err}");
    }
}
