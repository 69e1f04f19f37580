use std::sync::Arc;

use configs::PaginationConfig;
use sea_orm::DatabaseConnection;
use service::company::{seaorm::SeaOrmCompanyRepository, CompanyService};
use service::role::{seaorm::SeaOrmRoleRepository, RoleService};
use service::user::{seaorm::SeaOrmUserRepository, UserService};

pub type Companies = CompanyService<SeaOrmCompanyRepository>;
pub type Users = UserService<SeaOrmUserRepository>;
pub type Roles = RoleService<SeaOrmRoleRepository>;

/// Everything the router needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub pagination: PaginationConfig,
    pub companies: Arc<Companies>,
    pub users: Arc<Users>,
    pub roles: Arc<Roles>,
}

impl AppState {
    /// Wire the SeaORM repositories and services over one shared pool.
    pub fn new(db: DatabaseConnection, pagination: PaginationConfig) -> Self {
        Self {
            pagination,
            companies: Arc::new(CompanyService::new(Arc::new(SeaOrmCompanyRepository::new(db.clone())))),
            users: Arc::new(UserService::new(Arc::new(SeaOrmUserRepository::new(db.clone())))),
            roles: Arc::new(RoleService::new(Arc::new(SeaOrmRoleRepository::new(db)))),
        }
    }
}

/// Per-entity router state: one service plus page sizing.
pub struct CrudState<S> {
    pub service: Arc<S>,
    pub pagination: PaginationConfig,
}

impl<S> CrudState<S> {
    pub fn new(service: Arc<S>, pagination: PaginationConfig) -> Self { Self { service, pagination } }
}

// Manual impl: `S` itself is not `Clone`, only the `Arc` is cloned.
impl<S> Clone for CrudState<S> {
    fn clone(&self) -> Self { Self { service: Arc::clone(&self.service), pagination: self.pagination } }
}
