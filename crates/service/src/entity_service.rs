//! Generic CRUD service shared by all six entity types.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::domain::DomainEntity;
use crate::errors::ServiceError;
use crate::repository::{ForeignKeyLookup, RepoError, Repository};

/// Run one repository call under `ctx` and translate its outcome.
pub(crate) async fn guarded<O>(
    ctx: &RequestContext,
    op: &'static str,
    entity: &'static str,
    call: impl Future<Output = Result<O, RepoError>>,
) -> Result<O, ServiceError> {
    match ctx.run(call).await? {
        Ok(value) => Ok(value),
        Err(RepoError::Backend(message)) => {
            error!(op, entity, error = %message, "repository_failure");
            Err(ServiceError::Persistence { op, entity, message })
        }
        Err(other) => Err(ServiceError::from_repo(op, entity, other)),
    }
}

/// Current time at the precision `timestamptz` keeps (microseconds).
fn stamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Bridges a domain entity to its repository.
///
/// Identity and timestamps are owned here: `create` assigns both, `update`
/// refreshes `updated_at` and nothing else the caller did not patch.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use service::context::RequestContext;
/// use service::domain::{Employee, EmployeePatch};
/// use service::entity_service::EntityService;
/// use service::repository::mock::InMemoryRepository;
///
/// let svc = EntityService::new(Arc::new(InMemoryRepository::<Employee>::new()));
/// let ctx = RequestContext::background();
/// let created = tokio_test::block_on(svc.create(&ctx, Employee::new(uuid::Uuid::new_v4(), vec!["go".into()]))).unwrap();
/// assert_eq!(created.created_at, created.updated_at);
///
/// let patch = EmployeePatch { tags: Some(vec!["rust".into()]) };
/// tokio_test::block_on(svc.update(&ctx, patch, created.id)).unwrap();
/// let stored = tokio_test::block_on(svc.get(&ctx, created.id)).unwrap();
/// assert_eq!(stored.tags, vec!["rust".to_string()]);
/// ```
pub struct EntityService<T, R: ?Sized> {
    repo: Arc<R>,
    _entity: PhantomData<fn() -> T>,
}

impl<T, R: ?Sized> Clone for EntityService<T, R> {
    fn clone(&self) -> Self {
        Self { repo: self.repo.clone(), _entity: PhantomData }
    }
}

impl<T, R> EntityService<T, R>
where
    T: DomainEntity,
    R: Repository<T> + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo, _entity: PhantomData }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    #[instrument(skip_all, fields(entity = T::NAME))]
    pub async fn create(&self, ctx: &RequestContext, mut entity: T) -> Result<T, ServiceError> {
        entity.stamp_new(Uuid::new_v4(), stamp_now());
        guarded(ctx, "create", T::NAME, self.repo.create(&entity)).await?;
        info!(id = %entity.id(), "entity_created");
        Ok(entity)
    }

    #[instrument(skip(self, ctx), fields(entity = T::NAME))]
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<T, ServiceError> {
        guarded(ctx, "get", T::NAME, self.repo.get(id)).await
    }

    /// Read-modify-write without locking: two concurrent updates of the same
    /// row both rewrite the full record, so the later write wins wholesale.
    #[instrument(skip(self, ctx, patch), fields(entity = T::NAME))]
    pub async fn update(&self, ctx: &RequestContext, patch: T::Patch, id: Uuid) -> Result<(), ServiceError> {
        let mut current = self.get(ctx, id).await?;
        current.apply_patch(patch);
        current.touch(stamp_now());
        guarded(ctx, "update", T::NAME, self.repo.update(&current)).await?;
        info!(%id, "entity_updated");
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(entity = T::NAME))]
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), ServiceError> {
        guarded(ctx, "delete", T::NAME, self.repo.delete(id)).await?;
        info!(%id, "entity_deleted");
        Ok(())
    }
}

impl<T, R> EntityService<T, R>
where
    T: DomainEntity,
    R: ForeignKeyLookup<T> + ?Sized,
{
    #[instrument(skip(self, ctx), fields(entity = T::NAME))]
    pub async fn get_by_foreign_key(&self, ctx: &RequestContext, fk: Uuid) -> Result<T, ServiceError> {
        guarded(ctx, "get_by_foreign_key", T::NAME, self.repo.get_by_foreign_key(fk)).await
    }
}
