use models::company;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

/// Company as exchanged over HTTP, and the filter-by-example shape.
///
/// `parent` only needs an `id` on input; on output it carries the parent's own
/// fields with its `parent` reduced to an id reference.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyModel {
    pub id: Option<i32>,
    pub version: Option<i32>,
    pub name: Option<String>,
    pub parent: Option<Box<CompanyModel>>,
    pub deleted: Option<bool>,
    pub created_at: Option<DateTimeWithTimeZone>,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl CompanyModel {
    /// Id-only reference, as sent in `{"parent": {"id": 3}}`.
    pub fn reference(id: i32) -> Self {
        Self { id: Some(id), ..Self::default() }
    }

    pub fn parent_id(&self) -> Option<i32> {
        self.parent.as_ref().and_then(|p| p.id)
    }

    pub fn from_entity(m: company::Model, parent: Option<CompanyModel>) -> Self {
        let parent = parent.or_else(|| m.parent_id.map(Self::reference)).map(Box::new);
        Self {
            id: Some(m.id),
            version: Some(m.version),
            name: Some(m.name),
            parent,
            deleted: Some(m.deleted),
            created_at: Some(m.created_at),
            updated_at: Some(m.updated_at),
        }
    }
}

/// Normalized company filter; `deleted` picks the active or deleted partition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompanyFilter {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub parent_id: Option<i32>,
    pub deleted: bool,
}

impl From<&CompanyModel> for CompanyFilter {
    fn from(m: &CompanyModel) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            parent_id: m.parent_id(),
            deleted: m.deleted.unwrap_or(false),
        }
    }
}

/// Validated write input.
#[derive(Clone, Debug, PartialEq)]
pub struct CompanyDraft {
    pub name: String,
    pub parent_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_from_partial_json() {
        let m: CompanyModel = serde_json::from_str(r#"{"name":"company","parent":{"id":1}}"#).expect("json");
        let f = CompanyFilter::from(&m);
        assert_eq!(f.name.as_deref(), Some("company"));
        assert_eq!(f.parent_id, Some(1));
        assert!(!f.deleted);
    }

    #[test]
    fn explicit_deleted_selects_deleted_partition() {
        let m: CompanyModel = serde_json::from_str(r#"{"deleted":true}"#).expect("json");
        assert!(CompanyFilter::from(&m).deleted);
    }
}
