use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::domain::{User, UserPatch};
use crate::entity_service::EntityService;
use crate::errors::ServiceError;
use crate::hashing::CredentialHasher;
use crate::repository::Repository;

pub type UserStore = dyn Repository<User>;

/// Create input: the user plus an optional plaintext password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user: User,
    pub password: Option<String>,
}

/// Update input: field patch plus an optional replacement password.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub patch: UserPatch,
    pub password: Option<String>,
}

/// User CRUD with passwords routed through the hasher before storage.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use service::context::RequestContext;
/// use service::domain::{Role, User};
/// use service::hashing::Argon2Hasher;
/// use service::repository::mock::InMemoryRepository;
/// use service::user_service::{NewUser, UserService};
///
/// let svc = UserService::new(Arc::new(InMemoryRepository::<User>::new()), Arc::new(Argon2Hasher));
/// let input = NewUser { user: User::new("alice", "1001", Role::Employee), password: Some("Secret123".into()) };
/// let created = tokio_test::block_on(svc.create(&RequestContext::background(), input)).unwrap();
/// assert!(created.password_hash.unwrap().starts_with("$argon2"));
/// ```
#[derive(Clone)]
pub struct UserService {
    users: EntityService<User, UserStore>,
    hasher: Arc<dyn CredentialHasher>,
}

impl UserService {
    pub fn new(repo: Arc<UserStore>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users: EntityService::new(repo), hasher }
    }

    /// Plain entity service, for composition with other services.
    pub fn entities(&self) -> &EntityService<User, UserStore> {
        &self.users
    }

    #[instrument(skip_all, fields(username = %input.user.username))]
    pub async fn create(&self, ctx: &RequestContext, input: NewUser) -> Result<User, ServiceError> {
        let mut user = input.user;
        if let Some(password) = input.password {
            user.password_hash = Some(self.hasher.hash(&password)?);
            debug!("password hashed");
        }
        self.users.create(ctx, user).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<User, ServiceError> {
        self.users.get(ctx, id).await
    }

    #[instrument(skip(self, ctx, changes))]
    pub async fn update(&self, ctx: &RequestContext, changes: UserChanges, id: Uuid) -> Result<(), ServiceError> {
        let mut patch = changes.patch;
        if let Some(password) = changes.password {
            patch.password_hash = Some(self.hasher.hash(&password)?);
        }
        self.users.update(ctx, patch, id).await
    }

    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), ServiceError> {
        self.users.delete(ctx, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::repository::mock::InMemoryRepository;

    /// Cheap deterministic stand-in for argon2.
    struct PrefixHasher;

    impl CredentialHasher for PrefixHasher {
        fn hash(&self, plain: &str) -> Result<String, ServiceError> {
            Ok(format!("hashed:{plain}"))
        }
    }

    struct BrokenHasher;

    impl CredentialHasher for BrokenHasher {
        fn hash(&self, _plain: &str) -> Result<String, ServiceError> {
            Err(ServiceError::Persistence { op: "hash", entity: "user", message: "rng unavailable".into() })
        }
    }

    fn service(hasher: Arc<dyn CredentialHasher>) -> (Arc<InMemoryRepository<User>>, UserService) {
        let repo = Arc::new(InMemoryRepository::<User>::new());
        (repo.clone(), UserService::new(repo, hasher))
    }

    #[tokio::test]
    async fn password_is_hashed_before_storage() {
        let (_, svc) = service(Arc::new(PrefixHasher));
        let ctx = RequestContext::background();
        let created = svc
            .create(&ctx, NewUser { user: User::new("bob", "7", Role::Employer), password: Some("pw123456".into()) })
            .await
            .unwrap();
        let stored = svc.get(&ctx, created.id).await.unwrap();
        assert_eq!(stored.password_hash.as_deref(), Some("hashed:pw123456"));
    }

    #[tokio::test]
    async fn update_rehashes_only_when_password_given() {
        let (_, svc) = service(Arc::new(PrefixHasher));
        let ctx = RequestContext::background();
        let created = svc
            .create(&ctx, NewUser { user: User::new("bob", "7", Role::Employee), password: Some("first1".into()) })
            .await
            .unwrap();

        let rename = UserChanges {
            patch: UserPatch { username: Some("robert".into()), ..Default::default() },
            password: None,
        };
        svc.update(&ctx, rename, created.id).await.unwrap();
        let stored = svc.get(&ctx, created.id).await.unwrap();
        assert_eq!(stored.username, "robert");
        assert_eq!(stored.password_hash.as_deref(), Some("hashed:first1"));

        svc.update(&ctx, UserChanges { password: Some("second2".into()), ..Default::default() }, created.id)
            .await
            .unwrap();
        let stored = svc.get(&ctx, created.id).await.unwrap();
        assert_eq!(stored.password_hash.as_deref(), Some("hashed:second2"));
        assert_eq!(stored.username, "robert");
    }

    #[tokio::test]
    async fn hashing_failure_stops_before_repository() {
        let (repo, svc) = service(Arc::new(BrokenHasher));
        let ctx = RequestContext::background();
        let err = svc
            .create(&ctx, NewUser { user: User::new("eve", "9", Role::Employee), password: Some("pw".into()) })
            .await
            .unwrap_err();
        assert_eq!(err.code(), 1200);
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn user_without_password_has_no_hash() {
        let (_, svc) = service(Arc::new(PrefixHasher));
        let ctx = RequestContext::background();
        let created = svc
            .create(&ctx, NewUser { user: User::new("carol", "3", Role::Employee), password: None })
            .await
            .unwrap();
        assert!(created.password_hash.is_none());
        svc.delete(&ctx, created.id).await.unwrap();
        assert_eq!(svc.get(&ctx, created.id).await, Err(ServiceError::NotFound("user")));
    }
}
