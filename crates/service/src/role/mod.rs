//! Roles: named permission codes assignable to users.

pub mod domain;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use service::RoleService;
