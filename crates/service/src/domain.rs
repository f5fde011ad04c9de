//! Domain entities and their patch types.
//!
//! Identifiers and timestamps on a freshly constructed entity are
//! placeholders; [`EntityService::create`](crate::entity_service::EntityService::create)
//! stamps the real values.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Common contract of everything an `EntityService` manages.
pub trait DomainEntity: Clone + Send + Sync + 'static {
    /// Partial update; `None` fields leave the stored value unchanged.
    type Patch: Send + Sync;

    const NAME: &'static str;

    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
    fn stamp_new(&mut self, id: Uuid, now: DateTime<Utc>);
    fn touch(&mut self, now: DateTime<Utc>);
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Owning row used by foreign-key lookups and ownership-scoped lists.
    fn owner_id(&self) -> Option<Uuid> {
        None
    }

    /// Value that must be unique across the table, if any.
    fn unique_key(&self) -> Option<String> {
        None
    }
}

macro_rules! stamped {
    () => {
        fn id(&self) -> Uuid {
            self.id
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }

        fn updated_at(&self) -> DateTime<Utc> {
            self.updated_at
        }

        fn stamp_new(&mut self, id: Uuid, now: DateTime<Utc>) {
            self.id = id;
            self.created_at = now;
            self.updated_at = now;
        }

        fn touch(&mut self, now: DateTime<Utc>) {
            self.updated_at = now;
        }
    };
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Employee,
    Employer,
    Admin,
    /// Stored value outside the supported set.
    Unrecognized(String),
}

impl Role {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "employee" => Role::Employee,
            "employer" => Role::Employer,
            "admin" => Role::Admin,
            other => Role::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Employee => "employee",
            Role::Employer => "employer",
            Role::Admin => "admin",
            Role::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Dislike => "dislike",
        }
    }
}

impl FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(ReactionKind::Like),
            "dislike" => Ok(ReactionKind::Dislike),
            other => Err(format!("unsupported reaction kind {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub chat_id: String,
    pub is_active: bool,
    pub is_premium: bool,
    pub role: Role,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, chat_id: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::nil(),
            username: username.into(),
            chat_id: chat_id.into(),
            is_active: true,
            is_premium: false,
            role,
            password_hash: None,
            created_at: DateTime::default(),
            updated_at: DateTime::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub chat_id: Option<String>,
    pub is_active: Option<bool>,
    pub is_premium: Option<bool>,
    pub role: Option<Role>,
    pub password_hash: Option<String>,
}

impl DomainEntity for User {
    type Patch = UserPatch;
    const NAME: &'static str = "user";

    stamped!();

    fn apply_patch(&mut self, patch: UserPatch) {
        replace(&mut self.username, patch.username);
        replace(&mut self.chat_id, patch.chat_id);
        replace(&mut self.is_active, patch.is_active);
        replace(&mut self.is_premium, patch.is_premium);
        replace(&mut self.role, patch.role);
        if patch.password_hash.is_some() {
            self.password_hash = patch.password_hash;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn new(user_id: Uuid, tags: Vec<String>) -> Self {
        Self { id: Uuid::nil(), user_id, tags, created_at: DateTime::default(), updated_at: DateTime::default() }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeePatch {
    pub tags: Option<Vec<String>>,
}

impl DomainEntity for Employee {
    type Patch = EmployeePatch;
    const NAME: &'static str = "employee";

    stamped!();

    fn apply_patch(&mut self, patch: EmployeePatch) {
        replace(&mut self.tags, patch.tags);
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.user_id)
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.user_id.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Company {
    pub name: String,
    pub description: String,
    pub website: String,
    pub location: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: Company,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employer {
    pub fn new(user_id: Uuid, company: Company) -> Self {
        Self { id: Uuid::nil(), user_id, company, created_at: DateTime::default(), updated_at: DateTime::default() }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployerPatch {
    pub company_name: Option<String>,
    pub company_description: Option<String>,
    pub company_website: Option<String>,
    pub company_location: Option<String>,
    pub company_size: Option<String>,
}

impl DomainEntity for Employer {
    type Patch = EmployerPatch;
    const NAME: &'static str = "employer";

    stamped!();

    fn apply_patch(&mut self, patch: EmployerPatch) {
        replace(&mut self.company.name, patch.company_name);
        replace(&mut self.company.description, patch.company_description);
        replace(&mut self.company.website, patch.company_website);
        replace(&mut self.company.location, patch.company_location);
        replace(&mut self.company.size, patch.company_size);
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.user_id)
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.user_id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resume {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub file_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resume {
    pub fn new(employee_id: Uuid, file_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            employee_id,
            file_id: file_id.into(),
            created_at: DateTime::default(),
            updated_at: DateTime::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumePatch {
    pub file_id: Option<String>,
}

impl DomainEntity for Resume {
    type Patch = ResumePatch;
    const NAME: &'static str = "resume";

    stamped!();

    fn apply_patch(&mut self, patch: ResumePatch) {
        replace(&mut self.file_id, patch.file_id);
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.employee_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VacancyDetails {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vacancy {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vacancy {
    pub fn new(employer_id: Uuid, details: VacancyDetails) -> Self {
        Self {
            id: Uuid::nil(),
            employer_id,
            title: details.title,
            description: details.description,
            location: details.location,
            salary: details.salary,
            tags: details.tags,
            created_at: DateTime::default(),
            updated_at: DateTime::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VacancyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl DomainEntity for Vacancy {
    type Patch = VacancyPatch;
    const NAME: &'static str = "vacancy";

    stamped!();

    fn apply_patch(&mut self, patch: VacancyPatch) {
        replace(&mut self.title, patch.title);
        replace(&mut self.description, patch.description);
        replace(&mut self.location, patch.location);
        replace(&mut self.salary, patch.salary);
        replace(&mut self.tags, patch.tags);
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.employer_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub vacancy_id: Uuid,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(employee_id: Uuid, vacancy_id: Uuid, kind: ReactionKind) -> Self {
        Self {
            id: Uuid::nil(),
            employee_id,
            vacancy_id,
            kind,
            created_at: DateTime::default(),
            updated_at: DateTime::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReactionPatch {
    pub kind: Option<ReactionKind>,
}

impl DomainEntity for Reaction {
    type Patch = ReactionPatch;
    const NAME: &'static str = "reaction";

    stamped!();

    fn apply_patch(&mut self, patch: ReactionPatch) {
        replace(&mut self.kind, patch.kind);
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.employee_id)
    }

    // one reaction per (employee, vacancy)
    fn unique_key(&self) -> Option<String> {
        Some(format!("{}:{}", self.employee_id, self.vacancy_id))
    }
}

/// A user together with the profile its role selects.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user: User,
    pub employee: Option<Employee>,
    pub employer: Option<Employer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployerVacancyList {
    pub employer_id: Uuid,
    pub vacancies: Vec<Vacancy>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeReactionList {
    pub employee_id: Uuid,
    pub reactions: Vec<Reaction>,
}
