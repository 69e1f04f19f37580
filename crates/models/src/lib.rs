//! sea-orm entities for the admin backend plus the field rules each entity
//! enforces before it is written.

pub mod errors;
pub mod db;
pub mod company;
pub mod user;
pub mod role;
pub mod user_role;

#[cfg(test)]
mod tests;
