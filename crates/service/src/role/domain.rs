use models::role;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleModel {
    pub id: Option<i32>,
    pub version: Option<i32>,
    pub role: Option<String>,
    pub title: Option<String>,
    pub created_at: Option<DateTimeWithTimeZone>,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl From<role::Model> for RoleModel {
    fn from(m: role::Model) -> Self {
        Self {
            id: Some(m.id),
            version: Some(m.version),
            role: Some(m.role),
            title: m.title,
            created_at: Some(m.created_at),
            updated_at: Some(m.updated_at),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoleFilter {
    pub id: Option<i32>,
    pub role: Option<String>,
    pub title: Option<String>,
}

impl From<&RoleModel> for RoleFilter {
    fn from(m: &RoleModel) -> Self {
        Self { id: m.id, role: m.role.clone(), title: m.title.clone() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoleDraft {
    pub role: String,
    pub title: Option<String>,
}

/// Picker text: the title when it says something, the code otherwise.
pub fn select_text(m: &role::Model) -> String {
    match m.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => m.role.clone(),
    }
}
