use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("password hash error: {0}")]
    Hash(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} {} not found", entity, id))
    }

    /// Field-scoped validation failure, formatted like model validation errors.
    pub fn invalid(field: &str, message: impl std::fmt::Display) -> Self {
        Self::Validation(format!("{}: {}", field, message))
    }

    pub fn stale_version(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::Conflict(format!("{} {} was modified concurrently", entity, id))
    }

    /// True for errors caused by the request content rather than the store.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Validation(_) | Self::NotFound(_) | Self::Conflict(_) => true,
            Self::Model(models::errors::ModelError::Validation { .. }) => true,
            Self::Db(_) | Self::Hash(_) | Self::Model(_) => false,
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::Validation(msg),
            _ => Self::Db(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn client_errors_are_classified() {
        assert!(ServiceError::not_found("company", 4).is_client_error());
        assert!(ServiceError::from(ModelError::invalid("name", "must not be blank")).is_client_error());
        assert!(!ServiceError::Db("boom".into()).is_client_error());
        assert!(!ServiceError::from(ModelError::Db("boom".into())).is_client_error());
    }

    #[test]
    fn messages_name_the_entity() {
        assert_eq!(ServiceError::not_found("user", 44).to_string(), "not found: user 44 not found");
        assert_eq!(ServiceError::invalid("parent", "company 9 not found").to_string(), "validation error: parent: company 9 not found");
    }
}
