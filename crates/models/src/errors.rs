use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// First violated constraint of an entity, keyed by its wire field name.
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { field, message: message.into() }
    }
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}

/// Shared rule for required text fields: present, non-blank, within `max` chars.
pub fn require_text<'a>(field: &'static str, value: Option<&'a str>, max: usize) -> Result<&'a str, ModelError> {
    let v = value.ok_or_else(|| ModelError::invalid(field, "must not be null"))?;
    if v.trim().is_empty() {
        return Err(ModelError::invalid(field, "must not be blank"));
    }
    check_len(field, v, max)?;
    Ok(v)
}

/// Optional text: only the length is constrained.
pub fn optional_text(field: &'static str, value: Option<&str>, max: usize) -> Result<(), ModelError> {
    match value {
        Some(v) => check_len(field, v, max),
        None => Ok(()),
    }
}

fn check_len(field: &'static str, v: &str, max: usize) -> Result<(), ModelError> {
    if v.chars().count() > max {
        return Err(ModelError::invalid(field, format!("length must be at most {max}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_reports_null_then_blank() {
        let err = require_text("name", None, 10).unwrap_err();
        assert_eq!(err.to_string(), "name: must not be null");
        let err = require_text("name", Some("   "), 10).unwrap_err();
        assert_eq!(err.to_string(), "name: must not be blank");
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        assert!(require_text("name", Some("ÅÄÖ"), 3).is_ok());
        assert!(require_text("name", Some("ÅÄÖx"), 3).is_err());
        assert!(optional_text("title", Some("abcd"), 3).is_err());
        assert!(optional_text("title", None, 3).is_ok());
    }
}
