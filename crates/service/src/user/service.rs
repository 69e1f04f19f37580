use std::sync::Arc;

use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use models::role::{self, DEFAULT_ROLE};
use models::user;
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{select_text, UserDraft, UserFilter, UserModel};
use super::repository::UserRepository;
use crate::crud::{check_version, CrudService, SelectItem};
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};
use crate::role::domain::RoleModel;

const ENTITY: &str = "user";

/// User business rules: unique user names, hashed passwords, role
/// resolution and the self-service `register` flow.
pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a user holding only the default `USER` role; supplied roles are ignored.
    #[instrument(skip(self, model), fields(user_name = ?model.user_name))]
    pub async fn register(&self, model: UserModel) -> Result<UserModel, ServiceError> {
        if model.id.is_some() {
            return Err(ServiceError::invalid("id", "must be null when registering"));
        }
        let default_role = self
            .repo
            .find_role_by_code(DEFAULT_ROLE)
            .await?
            .ok_or_else(|| ServiceError::Db(format!("default role {} is missing", DEFAULT_ROLE)))?;
        let model = UserModel { roles: Some(vec![RoleModel::from(default_role)]), ..model };
        let draft = self.draft(&model, true).await?;
        let saved = self.repo.insert(draft).await?;
        info!(user_id = saved.id, user_name = %saved.user_name, "user_registered");
        self.render(saved).await
    }

    async fn render(&self, row: user::Model) -> Result<UserModel, ServiceError> {
        let mut roles = self.repo.roles_of(&[row.id]).await?;
        let assigned = roles.remove(&row.id).unwrap_or_default();
        Ok(UserModel::from_entity(row, assigned))
    }

    async fn render_all(&self, rows: Vec<user::Model>) -> Result<Vec<UserModel>, ServiceError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut roles = self.repo.roles_of(&ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let assigned = roles.remove(&row.id).unwrap_or_default();
                UserModel::from_entity(row, assigned)
            })
            .collect())
    }

    /// Validate fields, hash the password and resolve role references.
    async fn draft(&self, model: &UserModel, creating: bool) -> Result<UserDraft, ServiceError> {
        let user_name = user::validate_user_name(model.user_name.as_deref())?.trim().to_string();
        let password_hash = match (&model.password, creating) {
            (None, false) => None,
            (password, _) => Some(hash_password(user::validate_password(password.as_deref())?)?),
        };
        user::validate_person_names(model.first_name.as_deref(), model.last_name.as_deref())?;

        if let Some(existing) = self.repo.find_by_user_name(&user_name).await? {
            if Some(existing.id) != model.id {
                debug!(user_name = %user_name, "user name taken");
                return Err(ServiceError::Conflict(format!("user {} already exists", user_name)));
            }
        }

        let role_ids = match &model.roles {
            Some(refs) => Some(self.resolve_roles(refs).await?),
            None if creating => Some(Vec::new()),
            None => None,
        };
        Ok(UserDraft {
            user_name,
            password_hash,
            first_name: model.first_name.clone(),
            last_name: model.last_name.clone(),
            role_ids,
        })
    }

    /// Role references may carry an id or a role code; every one must exist.
    async fn resolve_roles(&self, refs: &[RoleModel]) -> Result<Vec<i32>, ServiceError> {
        let mut ids = Vec::with_capacity(refs.len());
        for r in refs {
            let id = match (r.id, r.role.as_deref()) {
                (Some(id), _) => id,
                (None, Some(code)) => {
                    self.repo
                        .find_role_by_code(code)
                        .await?
                        .ok_or_else(|| ServiceError::invalid("roles", format!("role {} not found", code)))?
                        .id
                }
                (None, None) => return Err(ServiceError::invalid("roles", "each role needs an id or a role code")),
            };
            ids.push(id);
        }
        ids.sort_unstable();
        ids.dedup();

        let found = self.repo.find_roles(&ids).await?;
        if let Some(missing) = ids.iter().find(|id| !found.iter().any(|r: &role::Model| r.id == **id)) {
            return Err(ServiceError::invalid("roles", format!("role {} not found", missing)));
        }
        Ok(ids)
    }
}

fn hash_password(plain: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| ServiceError::Hash(e.to_string()))?
        .to_string();
    Ok(hash)
}

#[async_trait]
impl<R: UserRepository + 'static> CrudService for UserService<R> {
    type Model = UserModel;
    type Id = i32;

    fn entity_name(&self) -> &'static str { ENTITY }

    async fn find_by_id(&self, id: i32) -> Result<UserModel, ServiceError> {
        let row = self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        self.render(row).await
    }

    async fn find_all(&self, filter: UserModel, page: PageRequest) -> Result<Page<UserModel>, ServiceError> {
        let (rows, total) = self.repo.find_page(&UserFilter::from(&filter), page).await?;
        let content = self.render_all(rows).await?;
        Ok(Page::new(content, total, page))
    }

    async fn count_all(&self, filter: UserModel) -> Result<u64, ServiceError> {
        self.repo.count(&UserFilter::from(&filter)).await
    }

    #[instrument(skip(self, model), fields(id = ?model.id))]
    async fn save(&self, model: UserModel) -> Result<UserModel, ServiceError> {
        let saved = match model.id {
            None => {
                let draft = self.draft(&model, true).await?;
                self.repo.insert(draft).await?
            }
            Some(id) => {
                let existing = self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
                check_version(ENTITY, id, model.version, existing.version)?;
                let draft = self.draft(&model, false).await?;
                self.repo.update(existing, draft).await?
            }
        };
        info!(user_id = saved.id, version = saved.version, "user_saved");
        self.render(saved).await
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(ENTITY, id));
        }
        info!(user_id = id, "user_deleted");
        Ok(())
    }

    async fn find_all_select(&self, filter: UserModel, page: PageRequest) -> Result<Page<SelectItem<i32>>, ServiceError> {
        let (rows, total) = self.repo.find_page(&UserFilter::from(&filter), page).await?;
        Ok(Page::new(rows, total, page).map(|u| SelectItem { id: u.id, text: select_text(&u) }))
    }
}
