use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    Employee, EmployeeReactionList, Employer, EmployerVacancyList, Reaction, Resume, User, UserProfile, Vacancy,
};

/// Outward view of a user; the password hash is never included.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub chat_id: String,
    pub is_active: bool,
    pub is_premium: bool,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            chat_id: u.chat_id.clone(),
            is_active: u.is_active,
            is_premium: u.is_premium,
            role: u.role.to_string(),
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub user_id: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Employee> for EmployeeResponse {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id.to_string(),
            user_id: e.user_id.to_string(),
            tags: e.tags.clone(),
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployerResponse {
    pub id: String,
    pub user_id: String,
    pub company_name: String,
    pub company_description: String,
    pub company_website: String,
    pub company_location: String,
    pub company_size: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Employer> for EmployerResponse {
    fn from(e: &Employer) -> Self {
        Self {
            id: e.id.to_string(),
            user_id: e.user_id.to_string(),
            company_name: e.company.name.clone(),
            company_description: e.company.description.clone(),
            company_website: e.company.website.clone(),
            company_location: e.company.location.clone(),
            company_size: e.company.size.clone(),
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeResponse {
    pub id: String,
    pub employee_id: String,
    pub file_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Resume> for ResumeResponse {
    fn from(r: &Resume) -> Self {
        Self {
            id: r.id.to_string(),
            employee_id: r.employee_id.to_string(),
            file_id: r.file_id.clone(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VacancyResponse {
    pub id: String,
    pub employer_id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Vacancy> for VacancyResponse {
    fn from(v: &Vacancy) -> Self {
        Self {
            id: v.id.to_string(),
            employer_id: v.employer_id.to_string(),
            title: v.title.clone(),
            description: v.description.clone(),
            location: v.location.clone(),
            salary: v.salary.clone(),
            tags: v.tags.clone(),
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub id: String,
    pub employee_id: String,
    pub vacancy_id: String,
    pub kind: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Reaction> for ReactionResponse {
    fn from(r: &Reaction) -> Self {
        Self {
            id: r.id.to_string(),
            employee_id: r.employee_id.to_string(),
            vacancy_id: r.vacancy_id.to_string(),
            kind: r.kind.as_str(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProfileResponse {
    pub user: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer: Option<EmployerResponse>,
}

impl From<&UserProfile> for UserProfileResponse {
    fn from(p: &UserProfile) -> Self {
        Self {
            user: (&p.user).into(),
            employee: p.employee.as_ref().map(Into::into),
            employer: p.employer.as_ref().map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VacancyListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer_id: Option<String>,
    pub vacancies: Vec<VacancyResponse>,
}

impl From<&EmployerVacancyList> for VacancyListResponse {
    fn from(list: &EmployerVacancyList) -> Self {
        Self {
            employer_id: Some(list.employer_id.to_string()),
            vacancies: list.vacancies.iter().map(Into::into).collect(),
        }
    }
}

impl From<&[Vacancy]> for VacancyListResponse {
    fn from(all: &[Vacancy]) -> Self {
        Self { employer_id: None, vacancies: all.iter().map(Into::into).collect() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReactionListResponse {
    pub employee_id: String,
    pub reaction_ids: Vec<String>,
    pub reactions: Vec<ReactionResponse>,
}

impl From<&EmployeeReactionList> for ReactionListResponse {
    fn from(list: &EmployeeReactionList) -> Self {
        Self {
            employee_id: list.employee_id.to_string(),
            reaction_ids: list.reactions.iter().map(|r| r.id.to_string()).collect(),
            reactions: list.reactions.iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReactionKind, Role};
    use uuid::Uuid;

    #[test]
    fn user_response_omits_password_hash() {
        let mut u = User::new("dora", "77", Role::Employer);
        u.id = Uuid::new_v4();
        u.password_hash = Some("$argon2id$secret".into());
        let json = serde_json::to_value(UserResponse::from(&u)).unwrap();
        assert_eq!(json["id"], u.id.to_string());
        assert_eq!(json["role"], "employer");
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn profile_response_carries_only_resolved_side() {
        let mut u = User::new("ed", "78", Role::Employee);
        u.id = Uuid::new_v4();
        let e = Employee::new(u.id, vec!["sql".into()]);
        let profile = UserProfile { user: u, employee: Some(e), employer: None };
        let json = serde_json::to_value(UserProfileResponse::from(&profile)).unwrap();
        assert_eq!(json["employee"]["tags"][0], "sql");
        assert!(json.get("employer").is_none());
    }

    #[test]
    fn reaction_list_echoes_owner_and_ids() {
        let owner = Uuid::new_v4();
        let mut r = Reaction::new(owner, Uuid::new_v4(), ReactionKind::Like);
        r.id = Uuid::new_v4();
        let list = EmployeeReactionList { employee_id: owner, reactions: vec![r.clone()] };
        let resp = ReactionListResponse::from(&list);
        assert_eq!(resp.employee_id, owner.to_string());
        assert_eq!(resp.reaction_ids, vec![r.id.to_string()]);
        assert_eq!(resp.reactions[0].kind, "like");
    }
}
