use models::{role, user};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::role::domain::RoleModel;

/// User as exchanged over HTTP, and the filter-by-example shape.
///
/// `password` is accepted on input and never written back out. `roles` left
/// out of an update keeps the current assignments; an explicit list replaces
/// them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserModel {
    pub id: Option<i32>,
    pub version: Option<i32>,
    pub user_name: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<RoleModel>>,
    pub created_at: Option<DateTimeWithTimeZone>,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl UserModel {
    pub fn from_entity(m: user::Model, roles: Vec<role::Model>) -> Self {
        Self {
            id: Some(m.id),
            version: Some(m.version),
            user_name: Some(m.user_name),
            password: None,
            first_name: m.first_name,
            last_name: m.last_name,
            roles: Some(roles.into_iter().map(RoleModel::from).collect()),
            created_at: Some(m.created_at),
            updated_at: Some(m.updated_at),
        }
    }
}

/// Normalized user filter. A user matches when it holds any role listed in
/// `role_ids` or `role_codes`; a role reference is taken by id, else by code.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserFilter {
    pub id: Option<i32>,
    pub user_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role_ids: Vec<i32>,
    pub role_codes: Vec<String>,
}

impl From<&UserModel> for UserFilter {
    fn from(m: &UserModel) -> Self {
        let mut role_ids = Vec::new();
        let mut role_codes = Vec::new();
        for r in m.roles.iter().flatten() {
            match (r.id, r.role.as_deref().map(str::trim)) {
                (Some(id), _) => role_ids.push(id),
                (None, Some(code)) if !code.is_empty() => role_codes.push(code.to_string()),
                _ => {}
            }
        }
        Self {
            id: m.id,
            user_name: m.user_name.clone(),
            first_name: m.first_name.clone(),
            last_name: m.last_name.clone(),
            role_ids,
            role_codes,
        }
    }
}

/// Validated write input; `password_hash` is `None` when an update keeps the
/// stored hash, `role_ids` is `None` when it keeps the stored roles.
#[derive(Clone, Debug, PartialEq)]
pub struct UserDraft {
    pub user_name: String,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role_ids: Option<Vec<i32>>,
}

/// "firstName lastName", or the user name when neither is set.
pub fn select_text(m: &user::Model) -> String {
    let full = format!("{} {}", m.first_name.as_deref().unwrap_or(""), m.last_name.as_deref().unwrap_or(""));
    let full = full.trim();
    if full.is_empty() { m.user_name.clone() } else { full.to_string() }
}
