use std::sync::Arc;

use async_trait::async_trait;
use models::role;
use tracing::{info, instrument};

use super::domain::{select_text, RoleDraft, RoleFilter, RoleModel};
use super::repository::RoleRepository;
use crate::crud::{check_version, CrudService, SelectItem};
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};

const ENTITY: &str = "role";

pub struct RoleService<R: RoleRepository> {
    repo: Arc<R>,
}

impl<R: RoleRepository> RoleService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    fn draft(model: &RoleModel) -> Result<RoleDraft, ServiceError> {
        let code = role::validate_role(model.role.as_deref())?.trim().to_string();
        role::validate_title(model.title.as_deref())?;
        Ok(RoleDraft { role: code, title: model.title.clone() })
    }

    async fn ensure_code_free(&self, code: &str, own_id: Option<i32>) -> Result<(), ServiceError> {
        match self.repo.find_by_code(code).await? {
            Some(other) if Some(other.id) != own_id => Err(ServiceError::Conflict(format!("role {} already exists", code))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R: RoleRepository + 'static> CrudService for RoleService<R> {
    type Model = RoleModel;
    type Id = i32;

    fn entity_name(&self) -> &'static str { ENTITY }

    async fn find_by_id(&self, id: i32) -> Result<RoleModel, ServiceError> {
        let found = self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        Ok(found.into())
    }

    async fn find_all(&self, filter: RoleModel, page: PageRequest) -> Result<Page<RoleModel>, ServiceError> {
        let (rows, total) = self.repo.find_page(&RoleFilter::from(&filter), page).await?;
        Ok(Page::new(rows, total, page).map(RoleModel::from))
    }

    async fn count_all(&self, filter: RoleModel) -> Result<u64, ServiceError> {
        self.repo.count(&RoleFilter::from(&filter)).await
    }

    #[instrument(skip(self, model), fields(id = ?model.id))]
    async fn save(&self, model: RoleModel) -> Result<RoleModel, ServiceError> {
        let draft = Self::draft(&model)?;
        self.ensure_code_free(&draft.role, model.id).await?;
        let saved = match model.id {
            None => self.repo.insert(draft).await?,
            Some(id) => {
                let existing = self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
                check_version(ENTITY, id, model.version, existing.version)?;
                self.repo.update(existing, draft).await?
            }
        };
        info!(role_id = saved.id, role = %saved.role, "role_saved");
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(ENTITY, id));
        }
        info!(role_id = id, "role_deleted");
        Ok(())
    }

    async fn find_all_select(&self, filter: RoleModel, page: PageRequest) -> Result<Page<SelectItem<i32>>, ServiceError> {
        let (rows, total) = self.repo.find_page(&RoleFilter::from(&filter), page).await?;
        Ok(Page::new(rows, total, page).map(|r| SelectItem { id: r.id, text: select_text(&r) }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::seaorm::SeaOrmRoleRepository;
    use crate::test_support::get_db;

    async fn service() -> Result<RoleService<SeaOrmRoleRepository>, anyhow::Error> {
        let db = get_db().await?;
        Ok(RoleService::new(Arc::new(SeaOrmRoleRepository::new(db))))
    }

    fn role_model(code: &str, title: Option<&str>) -> RoleModel {
        RoleModel { role: Some(code.into()), title: title.map(Into::into), ..Default::default() }
    }

    #[tokio::test]
    async fn seeded_roles_listed_in_id_order() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let page = svc.find_all(RoleModel::default(), PageRequest::default()).await?;
        let codes: Vec<_> = page.content.iter().filter_map(|r| r.role.clone()).collect();
        assert_eq!(codes, vec!["ADMIN", "USER"]);
        Ok(())
    }

    #[tokio::test]
    async fn save_validates_and_rejects_duplicates() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let err = svc.save(role_model("", None)).await.unwrap_err();
        assert_eq!(err.to_string(), "model error: role: must not be blank");
        let err = svc.save(RoleModel::default()).await.unwrap_err();
        assert!(err.is_client_error());

        let err = svc.save(role_model("ADMIN", Some("again"))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let operator = svc.save(role_model("OPERATOR", None)).await?;
        assert_eq!(operator.id, Some(3));
        // re-saving the same row under its own code is not a conflict
        let again = svc.save(RoleModel { title: Some("Station operator".into()), ..operator }).await?;
        assert_eq!(again.version, Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn stale_version_is_rejected_under_concurrency() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let operator = svc.save(role_model("OPERATOR", None)).await?;
        let a = RoleModel { title: Some("Operator A".into()), ..operator.clone() };
        let b = RoleModel { title: Some("Operator B".into()), ..operator };
        let (r1, r2) = tokio::join!(svc.save(a), svc.save(b));
        let conflicts = [&r1, &r2].iter().filter(|r| matches!(r, Err(ServiceError::Conflict(_)))).count();
        assert_eq!(conflicts, 1);
        assert_eq!(svc.find_by_id(3).await?.version, Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn select_prefers_title() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        svc.save(role_model("AUDITOR", Some("   "))).await?;
        let page = svc.find_all_select(RoleModel::default(), PageRequest::default()).await?;
        let texts: Vec<_> = page.content.into_iter().map(|i| i.text).collect();
        assert_eq!(texts, vec!["Administrator", "User", "AUDITOR"]);
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_not_found() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let temp = svc.save(role_model("TEMP", None)).await?;
        let id = temp.id.unwrap_or_default();
        svc.delete_by_id(id).await?;
        assert!(matches!(svc.find_by_id(id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete_by_id(id).await, Err(ServiceError::NotFound(_))));
        assert_eq!(svc.count_all(RoleModel::default()).await?, 2);
        Ok(())
    }
}
