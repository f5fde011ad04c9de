use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use service::domain::{Employee, Employer, Reaction, Resume, User, Vacancy};
use service::entity_service::EntityService;
use service::hashing::{Argon2Hasher, CredentialHasher};
use service::repo::SeaOrmStore;
use service::repository::mock::InMemoryRepository;
use service::{
    EmployeeService, EmployerService, ProfileResolver, ReactionService, RequestContext, ResumeService, UserService,
    VacancyService,
};

/// Services shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub employees: EmployeeService,
    pub employers: EmployerService,
    pub resumes: ResumeService,
    pub vacancies: VacancyService,
    pub reactions: ReactionService,
    pub profiles: ProfileResolver,
    pub request_timeout: Duration,
}

impl AppState {
    /// Wire every service to the one pooled connection.
    pub fn with_database(db: DatabaseConnection, request_timeout: Duration) -> Self {
        let store = Arc::new(SeaOrmStore::new(db));
        Self::assemble(
            UserService::new(store.clone(), Arc::new(Argon2Hasher)),
            EntityService::new(store.clone()),
            EntityService::new(store.clone()),
            EntityService::new(store.clone()),
            EntityService::new(store.clone()),
            EntityService::new(store),
            request_timeout,
        )
    }

    /// Process-local storage; used by tests and database-less local runs.
    pub fn in_memory(hasher: Arc<dyn CredentialHasher>, request_timeout: Duration) -> Self {
        Self::assemble(
            UserService::new(Arc::new(InMemoryRepository::<User>::new()), hasher),
            EntityService::new(Arc::new(InMemoryRepository::<Employee>::new())),
            EntityService::new(Arc::new(InMemoryRepository::<Employer>::new())),
            EntityService::new(Arc::new(InMemoryRepository::<Resume>::new())),
            EntityService::new(Arc::new(InMemoryRepository::<Vacancy>::new())),
            EntityService::new(Arc::new(InMemoryRepository::<Reaction>::new())),
            request_timeout,
        )
    }

    fn assemble(
        users: UserService,
        employees: EmployeeService,
        employers: EmployerService,
        resumes: ResumeService,
        vacancies: VacancyService,
        reactions: ReactionService,
        request_timeout: Duration,
    ) -> Self {
        let profiles = ProfileResolver::new(users.entities().clone(), employees.clone(), employers.clone());
        Self { users, employees, employers, resumes, vacancies, reactions, profiles, request_timeout }
    }

    /// Fresh context carrying the configured request deadline.
    pub fn context(&self) -> RequestContext {
        RequestContext::with_timeout(self.request_timeout)
    }
}
