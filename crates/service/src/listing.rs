//! Ownership-scoped queries for vacancies and reactions.
//!
//! Lists are unpaginated: every call materialises the full result, newest
//! first. An owner without rows yields an empty list.

use tracing::instrument;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::domain::{EmployeeReactionList, EmployerVacancyList, Reaction, Vacancy};
use crate::entity_service::{guarded, EntityService};
use crate::errors::ServiceError;
use crate::repository::OwnedListing;

impl<R> EntityService<Vacancy, R>
where
    R: OwnedListing<Vacancy> + ?Sized,
{
    #[instrument(skip(self, ctx))]
    pub async fn get_vacancies_by_employer(
        &self,
        ctx: &RequestContext,
        employer_id: Uuid,
    ) -> Result<EmployerVacancyList, ServiceError> {
        let vacancies = guarded(ctx, "list_by_owner", "vacancy", self.repository().list_by_owner(employer_id)).await?;
        Ok(EmployerVacancyList { employer_id, vacancies })
    }

    #[instrument(skip(self, ctx))]
    pub async fn get_vacancy_list(&self, ctx: &RequestContext) -> Result<Vec<Vacancy>, ServiceError> {
        guarded(ctx, "list_all", "vacancy", self.repository().list_all()).await
    }
}

impl<R> EntityService<Reaction, R>
where
    R: OwnedListing<Reaction> + ?Sized,
{
    #[instrument(skip(self, ctx))]
    pub async fn get_reactions_by_employee(
        &self,
        ctx: &RequestContext,
        employee_id: Uuid,
    ) -> Result<EmployeeReactionList, ServiceError> {
        let reactions = guarded(ctx, "list_by_owner", "reaction", self.repository().list_by_owner(employee_id)).await?;
        Ok(EmployeeReactionList { employee_id, reactions })
    }
}
