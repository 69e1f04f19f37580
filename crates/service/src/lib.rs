//! Service layer providing business-oriented CRUD operations on top of models.
//! - `crud` defines the generic contract the HTTP layer is written against.
//! - Each entity module pairs a repository trait with its SeaORM implementation
//!   and a service enforcing the entity's rules.

pub mod errors;
pub mod pagination;
pub mod query;
pub mod crud;
pub mod company;
pub mod user;
pub mod role;
#[cfg(test)]
pub mod test_support;
