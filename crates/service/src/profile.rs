use tracing::{instrument, warn};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::domain::{Role, User, UserProfile};
use crate::entity_service::EntityService;
use crate::errors::ServiceError;
use crate::user_service::UserStore;
use crate::{EmployeeService, EmployerService};

/// Resolves a user's role into the matching profile row.
///
/// Every call re-reads both rows; nothing is cached.
#[derive(Clone)]
pub struct ProfileResolver {
    users: EntityService<User, UserStore>,
    employees: EmployeeService,
    employers: EmployerService,
}

impl ProfileResolver {
    pub fn new(users: EntityService<User, UserStore>, employees: EmployeeService, employers: EmployerService) -> Self {
        Self { users, employees, employers }
    }

    /// A missing profile row for a role-bearing user is returned as
    /// `NotFound`, never masked as an empty profile.
    #[instrument(skip(self, ctx))]
    pub async fn get_user_profile(&self, ctx: &RequestContext, user_id: Uuid) -> Result<UserProfile, ServiceError> {
        let user = self.users.get(ctx, user_id).await?;
        match &user.role {
            Role::Employee => {
                let employee = self.employees.get_by_foreign_key(ctx, user_id).await?;
                Ok(UserProfile { user, employee: Some(employee), employer: None })
            }
            Role::Employer => {
                let employer = self.employers.get_by_foreign_key(ctx, user_id).await?;
                Ok(UserProfile { user, employee: None, employer: Some(employer) })
            }
            other => {
                warn!(role = %other, "profile_unknown_role");
                Err(ServiceError::UnknownRole(other.as_str().to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Company, Employee, Employer};
    use crate::repository::mock::InMemoryRepository;
    use std::sync::Arc;

    struct Fixture {
        resolver: ProfileResolver,
        users: EntityService<User, UserStore>,
        employees: EmployeeService,
        employers: EmployerService,
    }

    fn fixture() -> Fixture {
        let users: EntityService<User, UserStore> = EntityService::new(Arc::new(InMemoryRepository::<User>::new()));
        let employees: EmployeeService = EntityService::new(Arc::new(InMemoryRepository::<Employee>::new()));
        let employers: EmployerService = EntityService::new(Arc::new(InMemoryRepository::<Employer>::new()));
        let resolver = ProfileResolver::new(users.clone(), employees.clone(), employers.clone());
        Fixture { resolver, users, employees, employers }
    }

    #[tokio::test]
    async fn employee_role_populates_employee_only() {
        let f = fixture();
        let ctx = RequestContext::background();
        let user = f.users.create(&ctx, User::new("ann", "11", Role::Employee)).await.unwrap();
        let emp = f.employees.create(&ctx, Employee::new(user.id, vec!["go".into()])).await.unwrap();

        let profile = f.resolver.get_user_profile(&ctx, user.id).await.unwrap();
        assert_eq!(profile.user.id, user.id);
        assert_eq!(profile.employee.map(|e| e.id), Some(emp.id));
        assert!(profile.employer.is_none());
    }

    #[tokio::test]
    async fn employer_role_populates_employer_only() {
        let f = fixture();
        let ctx = RequestContext::background();
        let user = f.users.create(&ctx, User::new("acme-hr", "12", Role::Employer)).await.unwrap();
        let company = Company { name: "Acme".into(), ..Default::default() };
        f.employers.create(&ctx, Employer::new(user.id, company)).await.unwrap();

        let profile = f.resolver.get_user_profile(&ctx, user.id).await.unwrap();
        assert!(profile.employee.is_none());
        assert_eq!(profile.employer.map(|e| e.company.name), Some("Acme".to_string()));
    }

    #[tokio::test]
    async fn unknown_and_admin_roles_are_rejected() {
        let f = fixture();
        let ctx = RequestContext::background();
        let odd = f.users.create(&ctx, User::new("x", "13", Role::from_raw("unknown"))).await.unwrap();
        assert_eq!(
            f.resolver.get_user_profile(&ctx, odd.id).await,
            Err(ServiceError::UnknownRole("unknown".into()))
        );
        let admin = f.users.create(&ctx, User::new("root", "14", Role::Admin)).await.unwrap();
        assert_eq!(
            f.resolver.get_user_profile(&ctx, admin.id).await,
            Err(ServiceError::UnknownRole("admin".into()))
        );
    }

    #[tokio::test]
    async fn missing_rows_surface_as_not_found() {
        let f = fixture();
        let ctx = RequestContext::background();
        assert_eq!(
            f.resolver.get_user_profile(&ctx, Uuid::new_v4()).await,
            Err(ServiceError::NotFound("user"))
        );
        let orphan = f.users.create(&ctx, User::new("lost", "15", Role::Employee)).await.unwrap();
        assert_eq!(
            f.resolver.get_user_profile(&ctx, orphan.id).await,
            Err(ServiceError::NotFound("employee"))
        );
    }
}
