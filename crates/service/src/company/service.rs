use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use models::company;
use tracing::{info, instrument};

use super::domain::{CompanyDraft, CompanyFilter, CompanyModel};
use super::repository::CompanyRepository;
use crate::crud::{check_version, CrudService, LogicalDeleteService, SelectItem};
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};

const ENTITY: &str = "company";

/// Company business rules on top of a repository: parent integrity,
/// optimistic versioning and logical deletion.
pub struct CompanyService<R: CompanyRepository> {
    repo: Arc<R>,
}

impl<R: CompanyRepository> CompanyService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Children of `parent_id`, excluding deleted rows.
    pub async fn find_all_by_parent_id(&self, parent_id: i32, page: PageRequest) -> Result<Page<CompanyModel>, ServiceError> {
        let filter = CompanyFilter { parent_id: Some(parent_id), ..CompanyFilter::default() };
        self.page(&filter, page).await
    }

    async fn page(&self, filter: &CompanyFilter, page: PageRequest) -> Result<Page<CompanyModel>, ServiceError> {
        let (rows, total) = self.repo.find_page(filter, page).await?;
        let content = self.render_all(rows).await?;
        Ok(Page::new(content, total, page))
    }

    async fn render(&self, row: company::Model) -> Result<CompanyModel, ServiceError> {
        let parent = match row.parent_id {
            Some(pid) => self.repo.find(pid, true).await?.map(|p| CompanyModel::from_entity(p, None)),
            None => None,
        };
        Ok(CompanyModel::from_entity(row, parent))
    }

    async fn render_all(&self, rows: Vec<company::Model>) -> Result<Vec<CompanyModel>, ServiceError> {
        let mut parent_ids: Vec<i32> = rows.iter().filter_map(|r| r.parent_id).collect();
        parent_ids.sort_unstable();
        parent_ids.dedup();
        let parents: HashMap<i32, company::Model> = self
            .repo
            .find_many(&parent_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        Ok(rows
            .into_iter()
            .map(|row| {
                let parent = row
                    .parent_id
                    .and_then(|pid| parents.get(&pid).cloned())
                    .map(|p| CompanyModel::from_entity(p, None));
                CompanyModel::from_entity(row, parent)
            })
            .collect())
    }

    /// Validate the writable fields and resolve the parent reference.
    async fn draft(&self, model: &CompanyModel) -> Result<CompanyDraft, ServiceError> {
        let name = company::validate_name(model.name.as_deref())?.to_string();
        let parent_id = match &model.parent {
            None => None,
            Some(parent) => {
                let pid = parent.id.ok_or_else(|| ServiceError::invalid("parent.id", "must not be null"))?;
                if self.repo.find(pid, false).await?.is_none() {
                    return Err(ServiceError::invalid("parent", format!("company {} not found", pid)));
                }
                if let Some(id) = model.id {
                    if self.repo.would_cycle(id, pid).await? {
                        return Err(ServiceError::invalid("parent", "would create a cycle"));
                    }
                }
                Some(pid)
            }
        };
        Ok(CompanyDraft { name, parent_id })
    }
}

#[async_trait]
impl<R: CompanyRepository + 'static> CrudService for CompanyService<R> {
    type Model = CompanyModel;
    type Id = i32;

    fn entity_name(&self) -> &'static str { ENTITY }

    async fn find_by_id(&self, id: i32) -> Result<CompanyModel, ServiceError> {
        let row = self.repo.find(id, false).await?.ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        self.render(row).await
    }

    async fn find_all(&self, filter: CompanyModel, page: PageRequest) -> Result<Page<CompanyModel>, ServiceError> {
        self.page(&CompanyFilter::from(&filter), page).await
    }

    async fn count_all(&self, filter: CompanyModel) -> Result<u64, ServiceError> {
        self.repo.count(&CompanyFilter::from(&filter)).await
    }

    #[instrument(skip(self, model), fields(id = ?model.id))]
    async fn save(&self, model: CompanyModel) -> Result<CompanyModel, ServiceError> {
        let draft = self.draft(&model).await?;
        let saved = match model.id {
            None => self.repo.insert(draft).await?,
            Some(id) => {
                let existing = self.repo.find(id, false).await?.ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
                check_version(ENTITY, id, model.version, existing.version)?;
                self.repo.update(existing, draft).await?
            }
        };
        info!(company_id = saved.id, version = saved.version, "company_saved");
        self.render(saved).await
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.soft_delete(id).await? {
            return Err(ServiceError::not_found(ENTITY, id));
        }
        info!(company_id = id, "company_logically_deleted");
        Ok(())
    }

    async fn find_all_select(&self, filter: CompanyModel, page: PageRequest) -> Result<Page<SelectItem<i32>>, ServiceError> {
        let (rows, total) = self.repo.find_page(&CompanyFilter::from(&filter), page).await?;
        Ok(Page::new(rows, total, page).map(|c| SelectItem { id: c.id, text: c.name }))
    }
}

#[async_trait]
impl<R: CompanyRepository + 'static> LogicalDeleteService for CompanyService<R> {
    #[instrument(skip(self))]
    async fn restore_by_id(&self, id: i32) -> Result<CompanyModel, ServiceError> {
        let row = self.repo.restore(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        info!(company_id = id, "company_restored");
        self.render(row).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::seaorm::SeaOrmCompanyRepository;
    use crate::test_support::get_db;

    fn named(name: &str, parent: Option<i32>) -> CompanyModel {
        CompanyModel { name: Some(name.into()), parent: parent.map(|p| Box::new(CompanyModel::reference(p))), ..Default::default() }
    }

    async fn service() -> Result<CompanyService<SeaOrmCompanyRepository>, anyhow::Error> {
        let db = get_db().await?;
        Ok(CompanyService::new(Arc::new(SeaOrmCompanyRepository::new(db))))
    }

    /// company A <- company B <- company C
    async fn seed(svc: &CompanyService<SeaOrmCompanyRepository>) -> Result<[i32; 3], anyhow::Error> {
        let a = svc.save(named("company A", None)).await?;
        let b = svc.save(named("company B", a.id)).await?;
        let c = svc.save(named("company C", b.id)).await?;
        Ok([a.id.unwrap_or_default(), b.id.unwrap_or_default(), c.id.unwrap_or_default()])
    }

    #[tokio::test]
    async fn save_assigns_id_and_renders_parent() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let [a, b, c] = seed(&svc).await?;
        assert_eq!((a, b, c), (1, 2, 3));

        let saved = svc.save(named("test company", Some(3))).await?;
        assert_eq!(saved.id, Some(4));
        assert_eq!(saved.version, Some(0));
        let parent = saved.parent.expect("parent rendered");
        assert_eq!(parent.id, Some(3));
        assert_eq!(parent.name.as_deref(), Some("company C"));
        assert_eq!(parent.parent.and_then(|p| p.id), Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn save_rejects_missing_parent_and_blank_name() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let err = svc.save(named("orphan", Some(99))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("company 99 not found")), "{err}");

        let err = svc.save(named("  ", None)).await.unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(svc.count_all(CompanyModel::default()).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn save_rejects_cycles() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let [a, _, c] = seed(&svc).await?;
        let mut root = svc.find_by_id(a).await?;
        root.parent = Some(Box::new(CompanyModel::reference(c)));
        let err = svc.save(root).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("cycle")), "{err}");
        Ok(())
    }

    #[tokio::test]
    async fn update_bumps_version_and_rejects_stale() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let [a, ..] = seed(&svc).await?;
        let mut current = svc.find_by_id(a).await?;
        current.name = Some("company A renamed".into());
        let updated = svc.save(current.clone()).await?;
        assert_eq!(updated.version, Some(1));
        assert_eq!(updated.name.as_deref(), Some("company A renamed"));

        // `current` still carries version 0
        let err = svc.save(current).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let err = svc.save(CompanyModel { id: Some(42), ..named("ghost", None) }).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_saves_with_same_version_keep_one_winner() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let [a, ..] = seed(&svc).await?;
        let current = svc.find_by_id(a).await?;
        let first = CompanyModel { name: Some("company A1".into()), ..current.clone() };
        let second = CompanyModel { name: Some("company A2".into()), ..current };

        let (r1, r2) = tokio::join!(svc.save(first), svc.save(second));
        let (winner, loser) = match (r1, r2) {
            (Ok(w), Err(l)) | (Err(l), Ok(w)) => (w, l),
            (r1, r2) => panic!("expected exactly one success, got {r1:?} and {r2:?}"),
        };
        assert!(matches!(loser, ServiceError::Conflict(_)), "{loser}");
        assert_eq!(winner.version, Some(1));
        let stored = svc.find_by_id(a).await?;
        assert_eq!(stored.name, winner.name);
        assert_eq!(stored.version, Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn page_far_past_the_end_is_empty() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        seed(&svc).await?;
        let page = svc.find_all(CompanyModel::default(), PageRequest { page: u64::MAX, size: 10 }).await?;
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 3);
        assert!(page.last);
        Ok(())
    }

    #[tokio::test]
    async fn find_all_and_count_agree() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        seed(&svc).await?;
        let filter = CompanyModel { name: Some("company".into()), ..Default::default() };
        let page = svc.find_all(filter.clone(), PageRequest { page: 0, size: 10 }).await?;
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.content.len(), 3);
        assert_eq!(svc.count_all(filter).await?, 3);

        // case-insensitive substring, ordered by id
        let filter = CompanyModel { name: Some("COMPANY".into()), ..Default::default() };
        let page = svc.find_all(filter, PageRequest { page: 1, size: 2 }).await?;
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].name.as_deref(), Some("company C"));
        Ok(())
    }

    #[tokio::test]
    async fn select_projects_name() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        seed(&svc).await?;
        let filter = CompanyModel { name: Some("company A".into()), ..Default::default() };
        let page = svc.find_all_select(filter, PageRequest { page: 0, size: 10 }).await?;
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content, vec![SelectItem { id: 1, text: "company A".into() }]);
        Ok(())
    }

    #[tokio::test]
    async fn children_by_parent() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let [a, ..] = seed(&svc).await?;
        let page = svc.find_all_by_parent_id(a, PageRequest { page: 0, size: 10 }).await?;
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].name.as_deref(), Some("company B"));
        Ok(())
    }

    #[tokio::test]
    async fn logical_delete_round_trip() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let [a, b, _] = seed(&svc).await?;
        let before = svc.find_by_id(b).await?;

        svc.delete_by_id(b).await?;
        assert!(matches!(svc.find_by_id(b).await, Err(ServiceError::NotFound(_))));
        assert_eq!(svc.count_all(CompanyModel::default()).await?, 2);
        assert_eq!(svc.find_all_by_parent_id(a, PageRequest::default()).await?.total_elements, 0);
        assert!(matches!(svc.delete_by_id(b).await, Err(ServiceError::NotFound(_))));

        // still stored, visible through the deleted partition
        let deleted = svc.find_all(CompanyModel { deleted: Some(true), ..Default::default() }, PageRequest::default()).await?;
        assert_eq!(deleted.total_elements, 1);
        assert_eq!(deleted.content[0].id, Some(b));

        let restored = svc.restore_by_id(b).await?;
        assert_eq!(restored, before);
        assert!(matches!(svc.restore_by_id(b).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn deleted_parent_is_not_assignable() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let [_, _, c] = seed(&svc).await?;
        svc.delete_by_id(c).await?;
        let err = svc.save(named("late child", Some(c))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }
}
