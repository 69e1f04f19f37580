//! Companies: a self-referencing hierarchy with logical deletion.

pub mod domain;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use service::CompanyService;
