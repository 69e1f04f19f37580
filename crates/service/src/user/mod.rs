//! Users, their hashed credentials and role assignments.

pub mod domain;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use service::UserService;
