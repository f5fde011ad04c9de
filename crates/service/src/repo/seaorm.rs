//! PostgreSQL-backed repositories on a shared SeaORM connection pool.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};
use uuid::Uuid;

use models::{employee, employer, reaction, resume, user, vacancy};

use crate::domain::{Company, Employee, Employer, Reaction, ReactionKind, Resume, Role, User, Vacancy};
use crate::repository::{ForeignKeyLookup, OwnedListing, RepoError, Repository};

/// One pooled handle, injected at startup, serving every entity table.
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// Foreign keys declared by the migrations and the entity each one points at.
const FOREIGN_KEYS: [(&str, &str); 6] = [
    ("fk_employee_user", "user"),
    ("fk_employer_user", "user"),
    ("fk_resume_employee", "employee"),
    ("fk_vacancy_employer", "employer"),
    ("fk_reaction_employee", "employee"),
    ("fk_reaction_vacancy", "vacancy"),
];

fn referenced_entity(message: &str) -> &'static str {
    FOREIGN_KEYS
        .iter()
        .find(|(constraint, _)| message.contains(constraint))
        .map(|(_, parent)| *parent)
        .unwrap_or("referenced row")
}

fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => return RepoError::AlreadyExists,
        Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
            return RepoError::MissingParent(referenced_entity(&message))
        }
        _ => {}
    }
    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        other => RepoError::Backend(other.to_string()),
    }
}

fn tz(at: DateTime<Utc>) -> DateTimeWithTimeZone {
    at.into()
}

fn utc(at: DateTimeWithTimeZone) -> DateTime<Utc> {
    at.with_timezone(&Utc)
}

/// Mapping between a domain entity and its table row.
trait Row: Sized {
    type Model;
    type Active;

    fn to_active(&self) -> Self::Active;
    fn from_model(model: Self::Model) -> Result<Self, RepoError>;
}

impl Row for User {
    type Model = user::Model;
    type Active = user::ActiveModel;

    fn to_active(&self) -> user::ActiveModel {
        user::ActiveModel {
            id: Set(self.id),
            username: Set(self.username.clone()),
            chat_id: Set(self.chat_id.clone()),
            is_active: Set(self.is_active),
            is_premium: Set(self.is_premium),
            role: Set(self.role.as_str().to_string()),
            password_hash: Set(self.password_hash.clone()),
            created_at: Set(tz(self.created_at)),
            updated_at: Set(tz(self.updated_at)),
        }
    }

    fn from_model(m: user::Model) -> Result<Self, RepoError> {
        Ok(User {
            id: m.id,
            username: m.username,
            chat_id: m.chat_id,
            is_active: m.is_active,
            is_premium: m.is_premium,
            role: Role::from_raw(&m.role),
            password_hash: m.password_hash,
            created_at: utc(m.created_at),
            updated_at: utc(m.updated_at),
        })
    }
}

impl Row for Employee {
    type Model = employee::Model;
    type Active = employee::ActiveModel;

    fn to_active(&self) -> employee::ActiveModel {
        employee::ActiveModel {
            id: Set(self.id),
            user_id: Set(self.user_id),
            tags: Set(self.tags.clone()),
            created_at: Set(tz(self.created_at)),
            updated_at: Set(tz(self.updated_at)),
        }
    }

    fn from_model(m: employee::Model) -> Result<Self, RepoError> {
        Ok(Employee {
            id: m.id,
            user_id: m.user_id,
            tags: m.tags,
            created_at: utc(m.created_at),
            updated_at: utc(m.updated_at),
        })
    }
}

impl Row for Employer {
    type Model = employer::Model;
    type Active = employer::ActiveModel;

    fn to_active(&self) -> employer::ActiveModel {
        employer::ActiveModel {
            id: Set(self.id),
            user_id: Set(self.user_id),
            company_name: Set(self.company.name.clone()),
            company_description: Set(self.company.description.clone()),
            company_website: Set(self.company.website.clone()),
            company_location: Set(self.company.location.clone()),
            company_size: Set(self.company.size.clone()),
            created_at: Set(tz(self.created_at)),
            updated_at: Set(tz(self.updated_at)),
        }
    }

    fn from_model(m: employer::Model) -> Result<Self, RepoError> {
        Ok(Employer {
            id: m.id,
            user_id: m.user_id,
            company: Company {
                name: m.company_name,
                description: m.company_description,
                website: m.company_website,
                location: m.company_location,
                size: m.company_size,
            },
            created_at: utc(m.created_at),
            updated_at: utc(m.updated_at),
        })
    }
}

impl Row for Resume {
    type Model = resume::Model;
    type Active = resume::ActiveModel;

    fn to_active(&self) -> resume::ActiveModel {
        resume::ActiveModel {
            id: Set(self.id),
            employee_id: Set(self.employee_id),
            file_id: Set(self.file_id.clone()),
            created_at: Set(tz(self.created_at)),
            updated_at: Set(tz(self.updated_at)),
        }
    }

    fn from_model(m: resume::Model) -> Result<Self, RepoError> {
        Ok(Resume {
            id: m.id,
            employee_id: m.employee_id,
            file_id: m.file_id,
            created_at: utc(m.created_at),
            updated_at: utc(m.updated_at),
        })
    }
}

impl Row for Vacancy {
    type Model = vacancy::Model;
    type Active = vacancy::ActiveModel;

    fn to_active(&self) -> vacancy::ActiveModel {
        vacancy::ActiveModel {
            id: Set(self.id),
            employer_id: Set(self.employer_id),
            tags: Set(self.tags.clone()),
            title: Set(self.title.clone()),
            description: Set(self.description.clone()),
            location: Set(self.location.clone()),
            salary: Set(self.salary.clone()),
            created_at: Set(tz(self.created_at)),
            updated_at: Set(tz(self.updated_at)),
        }
    }

    fn from_model(m: vacancy::Model) -> Result<Self, RepoError> {
        Ok(Vacancy {
            id: m.id,
            employer_id: m.employer_id,
            title: m.title,
            description: m.description,
            location: m.location,
            salary: m.salary,
            tags: m.tags,
            created_at: utc(m.created_at),
            updated_at: utc(m.updated_at),
        })
    }
}

impl Row for Reaction {
    type Model = reaction::Model;
    type Active = reaction::ActiveModel;

    fn to_active(&self) -> reaction::ActiveModel {
        reaction::ActiveModel {
            id: Set(self.id),
            employee_id: Set(self.employee_id),
            vacancy_id: Set(self.vacancy_id),
            kind: Set(self.kind.as_str().to_string()),
            created_at: Set(tz(self.created_at)),
            updated_at: Set(tz(self.updated_at)),
        }
    }

    fn from_model(m: reaction::Model) -> Result<Self, RepoError> {
        let kind = m.kind.parse::<ReactionKind>().map_err(RepoError::Backend)?;
        Ok(Reaction {
            id: m.id,
            employee_id: m.employee_id,
            vacancy_id: m.vacancy_id,
            kind,
            created_at: utc(m.created_at),
            updated_at: utc(m.updated_at),
        })
    }
}

fn from_models<T: Row>(rows: Vec<T::Model>) -> Result<Vec<T>, RepoError> {
    rows.into_iter().map(T::from_model).collect()
}

macro_rules! crud {
    ($domain:ty, $table:ident) => {
        #[async_trait]
        impl Repository<$domain> for SeaOrmStore {
            async fn create(&self, entity: &$domain) -> Result<(), RepoError> {
                $table::Entity::insert(entity.to_active())
                    .exec_without_returning(&self.db)
                    .await
                    .map(|_| ())
                    .map_err(map_db_err)
            }

            async fn get(&self, id: Uuid) -> Result<$domain, RepoError> {
                let row = $table::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(map_db_err)?
                    .ok_or(RepoError::NotFound)?;
                <$domain as Row>::from_model(row)
            }

            async fn update(&self, entity: &$domain) -> Result<(), RepoError> {
                let res = $table::Entity::update_many()
                    .set(entity.to_active())
                    .filter($table::Column::Id.eq(entity.id))
                    .exec(&self.db)
                    .await
                    .map_err(map_db_err)?;
                if res.rows_affected == 0 {
                    return Err(RepoError::NotFound);
                }
                Ok(())
            }

            async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
                let res = $table::Entity::delete_by_id(id).exec(&self.db).await.map_err(map_db_err)?;
                if res.rows_affected == 0 {
                    return Err(RepoError::NotFound);
                }
                Ok(())
            }
        }
    };
}

crud!(User, user);
crud!(Employee, employee);
crud!(Employer, employer);
crud!(Resume, resume);
crud!(Vacancy, vacancy);
crud!(Reaction, reaction);

macro_rules! by_foreign_key {
    ($domain:ty, $table:ident, $column:ident) => {
        #[async_trait]
        impl ForeignKeyLookup<$domain> for SeaOrmStore {
            async fn get_by_foreign_key(&self, fk: Uuid) -> Result<$domain, RepoError> {
                let row = $table::Entity::find()
                    .filter($table::Column::$column.eq(fk))
                    .order_by_desc($table::Column::CreatedAt)
                    .one(&self.db)
                    .await
                    .map_err(map_db_err)?
                    .ok_or(RepoError::NotFound)?;
                <$domain as Row>::from_model(row)
            }
        }
    };
}

by_foreign_key!(Employee, employee, UserId);
by_foreign_key!(Employer, employer, UserId);
by_foreign_key!(Resume, resume, EmployeeId);

macro_rules! owned_listing {
    ($domain:ty, $table:ident, $column:ident) => {
        #[async_trait]
        impl OwnedListing<$domain> for SeaOrmStore {
            async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<$domain>, RepoError> {
                let rows = $table::Entity::find()
                    .filter($table::Column::$column.eq(owner))
                    .order_by_desc($table::Column::CreatedAt)
                    .all(&self.db)
                    .await
                    .map_err(map_db_err)?;
                from_models::<$domain>(rows)
            }

            async fn list_all(&self) -> Result<Vec<$domain>, RepoError> {
                let rows = $table::Entity::find()
                    .order_by_desc($table::Column::CreatedAt)
                    .all(&self.db)
                    .await
                    .map_err(map_db_err)?;
                from_models::<$domain>(rows)
            }
        }
    };
}

owned_listing!(Vacancy, vacancy, EmployerId);
owned_listing!(Reaction, reaction, EmployeeId);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RequestContext;
    use crate::domain::{VacancyDetails, VacancyPatch};
    use crate::entity_service::EntityService;
    use crate::errors::ServiceError;
    use crate::test_support::get_db;
    use std::sync::Arc;

    async fn store() -> Option<Arc<SeaOrmStore>> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return None;
        }
        get_db().await.ok().map(|db| Arc::new(SeaOrmStore::new(db)))
    }

    #[tokio::test]
    async fn crud_round_trip_against_postgres() -> anyhow::Result<()> {
        let Some(store) = store().await else { return Ok(()) };
        let ctx = RequestContext::background();
        let users: EntityService<User, SeaOrmStore> = EntityService::new(store.clone());
        let employers: EntityService<Employer, SeaOrmStore> = EntityService::new(store.clone());
        let vacancies: EntityService<Vacancy, SeaOrmStore> = EntityService::new(store.clone());

        let u = users.create(&ctx, User::new(format!("hr_{}", Uuid::new_v4()), "500", Role::Employer)).await?;
        let e = employers
            .create(&ctx, Employer::new(u.id, Company { name: "Acme".into(), ..Default::default() }))
            .await?;
        assert_eq!(
            employers.create(&ctx, Employer::new(u.id, Company::default())).await,
            Err(ServiceError::AlreadyExists("employer"))
        );
        assert_eq!(employers.get_by_foreign_key(&ctx, u.id).await?.id, e.id);

        let details = VacancyDetails { title: "Dev".into(), tags: vec!["rust".into()], ..Default::default() };
        let v = vacancies.create(&ctx, Vacancy::new(e.id, details)).await?;
        vacancies
            .update(&ctx, VacancyPatch { tags: Some(vec!["rust".into(), "sql".into()]), ..Default::default() }, v.id)
            .await?;
        let stored = vacancies.get(&ctx, v.id).await?;
        assert_eq!(stored.tags, vec!["rust".to_string(), "sql".to_string()]);
        assert_eq!(stored.title, "Dev");
        assert!(stored.updated_at >= stored.created_at);

        let listed = vacancies.get_vacancies_by_employer(&ctx, e.id).await?;
        assert_eq!(listed.vacancies.len(), 1);

        users.delete(&ctx, u.id).await?;
        assert_eq!(users.delete(&ctx, u.id).await, Err(ServiceError::NotFound("user")));
        assert_eq!(vacancies.get(&ctx, v.id).await, Err(ServiceError::NotFound("vacancy")));
        Ok(())
    }

    #[test]
    fn foreign_key_violation_names_the_parent() {
        let msg = r#"insert or update on table "resumes" violates foreign key constraint "fk_resume_employee""#;
        assert_eq!(referenced_entity(msg), "employee");
        assert_eq!(referenced_entity(r#"violates foreign key constraint "fk_reaction_vacancy""#), "vacancy");
        assert_eq!(referenced_entity("violates foreign key constraint \"fk_other\""), "referenced row");
    }

    #[tokio::test]
    async fn create_with_unknown_parent_is_not_found() -> anyhow::Result<()> {
        let Some(store) = store().await else { return Ok(()) };
        let ctx = RequestContext::background();
        let employees: EntityService<Employee, SeaOrmStore> = EntityService::new(store.clone());
        let resumes: EntityService<Resume, SeaOrmStore> = EntityService::new(store.clone());
        let vacancies: EntityService<Vacancy, SeaOrmStore> = EntityService::new(store.clone());

        assert_eq!(
            employees.create(&ctx, Employee::new(Uuid::new_v4(), vec![])).await,
            Err(ServiceError::NotFound("user"))
        );
        assert_eq!(
            resumes.create(&ctx, Resume::new(Uuid::new_v4(), "file-1")).await,
            Err(ServiceError::NotFound("employee"))
        );
        assert_eq!(
            vacancies.create(&ctx, Vacancy::new(Uuid::new_v4(), VacancyDetails::default())).await,
            Err(ServiceError::NotFound("employer"))
        );
        Ok(())
    }

    #[tokio::test]
    async fn created_entity_matches_stored_row() -> anyhow::Result<()> {
        let Some(store) = store().await else { return Ok(()) };
        let ctx = RequestContext::background();
        let users: EntityService<User, SeaOrmStore> = EntityService::new(store.clone());

        let created = users.create(&ctx, User::new(format!("u_{}", Uuid::new_v4()), "700", Role::Employee)).await?;
        assert_eq!(users.get(&ctx, created.id).await?, created);

        users
            .update(&ctx, crate::domain::UserPatch { is_premium: Some(true), ..Default::default() }, created.id)
            .await?;
        let stored = users.get(&ctx, created.id).await?;
        assert_eq!(stored.created_at, created.created_at);
        assert!(stored.is_premium);

        users.delete(&ctx, created.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn reaction_pair_is_unique_in_database() -> anyhow::Result<()> {
        let Some(store) = store().await else { return Ok(()) };
        let ctx = RequestContext::background();
        let users: EntityService<User, SeaOrmStore> = EntityService::new(store.clone());
        let employees: EntityService<Employee, SeaOrmStore> = EntityService::new(store.clone());
        let employers: EntityService<Employer, SeaOrmStore> = EntityService::new(store.clone());
        let vacancies: EntityService<Vacancy, SeaOrmStore> = EntityService::new(store.clone());
        let reactions: EntityService<Reaction, SeaOrmStore> = EntityService::new(store.clone());

        let seeker = users.create(&ctx, User::new("seeker", "600", Role::Employee)).await?;
        let hr = users.create(&ctx, User::new("hr", "601", Role::Employer)).await?;
        let emp = employees.create(&ctx, Employee::new(seeker.id, vec![])).await?;
        let co = employers.create(&ctx, Employer::new(hr.id, Company::default())).await?;
        let vac = vacancies.create(&ctx, Vacancy::new(co.id, VacancyDetails::default())).await?;

        reactions.create(&ctx, Reaction::new(emp.id, vac.id, ReactionKind::Like)).await?;
        assert_eq!(
            reactions.create(&ctx, Reaction::new(emp.id, vac.id, ReactionKind::Dislike)).await,
            Err(ServiceError::AlreadyExists("reaction"))
        );
        let list = reactions.get_reactions_by_employee(&ctx, emp.id).await?;
        assert_eq!(list.reactions.len(), 1);
        assert_eq!(list.reactions[0].kind, ReactionKind::Like);

        users.delete(&ctx, seeker.id).await?;
        users.delete(&ctx, hr.id).await?;
        Ok(())
    }
}
