use serde::Deserialize;

use models::{employee, employer, reaction, resume, user, vacancy};

use super::parse_id;
use crate::domain::{
    Company, Employee, EmployeePatch, Employer, EmployerPatch, Reaction, ReactionKind, ReactionPatch, Resume,
    ResumePatch, Role, User, UserPatch, Vacancy, VacancyDetails, VacancyPatch,
};
use crate::errors::ServiceError;
use crate::user_service::{NewUser, UserChanges};

fn parse_role(raw: &str) -> Result<Role, ServiceError> {
    user::validate_role(raw)?;
    Ok(Role::from_raw(raw))
}

fn parse_kind(raw: &str) -> Result<ReactionKind, ServiceError> {
    reaction::validate_kind(raw)?;
    raw.parse().map_err(ServiceError::Validation)
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub chat_id: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_premium: bool,
    pub role: String,
    #[serde(default)]
    pub password: Option<String>,
}

impl CreateUserRequest {
    pub fn into_domain(self) -> Result<NewUser, ServiceError> {
        user::validate_username(&self.username)?;
        user::validate_chat_id(&self.chat_id)?;
        let role = parse_role(&self.role)?;
        if let Some(password) = &self.password {
            user::validate_password(password)?;
        }
        let mut u = User::new(self.username, self.chat_id, role);
        u.is_active = self.is_active;
        u.is_premium = self.is_premium;
        Ok(NewUser { user: u, password: self.password })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub chat_id: Option<String>,
    pub is_active: Option<bool>,
    pub is_premium: Option<bool>,
    pub role: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_changes(self) -> Result<UserChanges, ServiceError> {
        if let Some(name) = &self.username {
            user::validate_username(name)?;
        }
        if let Some(chat_id) = &self.chat_id {
            user::validate_chat_id(chat_id)?;
        }
        if let Some(password) = &self.password {
            user::validate_password(password)?;
        }
        let role = self.role.as_deref().map(parse_role).transpose()?;
        let patch = UserPatch {
            username: self.username,
            chat_id: self.chat_id,
            is_active: self.is_active,
            is_premium: self.is_premium,
            role,
            password_hash: None,
        };
        Ok(UserChanges { patch, password: self.password })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployeeRequest {
    pub user_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateEmployeeRequest {
    pub fn into_domain(self) -> Result<Employee, ServiceError> {
        let user_id = parse_id("user_id", &self.user_id)?;
        employee::validate_tags(&self.tags)?;
        Ok(Employee::new(user_id, self.tags))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateEmployeeRequest {
    pub tags: Option<Vec<String>>,
}

impl UpdateEmployeeRequest {
    pub fn into_patch(self) -> Result<EmployeePatch, ServiceError> {
        if let Some(tags) = &self.tags {
            employee::validate_tags(tags)?;
        }
        Ok(EmployeePatch { tags: self.tags })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployerRequest {
    pub user_id: String,
    pub company_name: String,
    #[serde(default)]
    pub company_description: String,
    #[serde(default)]
    pub company_website: String,
    #[serde(default)]
    pub company_location: String,
    #[serde(default)]
    pub company_size: String,
}

impl CreateEmployerRequest {
    pub fn into_domain(self) -> Result<Employer, ServiceError> {
        let user_id = parse_id("user_id", &self.user_id)?;
        employer::validate_company_name(&self.company_name)?;
        employer::validate_company_website(&self.company_website)?;
        let company = Company {
            name: self.company_name,
            description: self.company_description,
            website: self.company_website,
            location: self.company_location,
            size: self.company_size,
        };
        Ok(Employer::new(user_id, company))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateEmployerRequest {
    pub company_name: Option<String>,
    pub company_description: Option<String>,
    pub company_website: Option<String>,
    pub company_location: Option<String>,
    pub company_size: Option<String>,
}

impl UpdateEmployerRequest {
    pub fn into_patch(self) -> Result<EmployerPatch, ServiceError> {
        if let Some(name) = &self.company_name {
            employer::validate_company_name(name)?;
        }
        if let Some(website) = &self.company_website {
            employer::validate_company_website(website)?;
        }
        Ok(EmployerPatch {
            company_name: self.company_name,
            company_description: self.company_description,
            company_website: self.company_website,
            company_location: self.company_location,
            company_size: self.company_size,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateResumeRequest {
    pub employee_id: String,
    pub file_id: String,
}

impl CreateResumeRequest {
    pub fn into_domain(self) -> Result<Resume, ServiceError> {
        let employee_id = parse_id("employee_id", &self.employee_id)?;
        resume::validate_file_id(&self.file_id)?;
        Ok(Resume::new(employee_id, self.file_id))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateResumeRequest {
    pub file_id: Option<String>,
}

impl UpdateResumeRequest {
    pub fn into_patch(self) -> Result<ResumePatch, ServiceError> {
        if let Some(file_id) = &self.file_id {
            resume::validate_file_id(file_id)?;
        }
        Ok(ResumePatch { file_id: self.file_id })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVacancyRequest {
    pub employer_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateVacancyRequest {
    pub fn into_domain(self) -> Result<Vacancy, ServiceError> {
        let employer_id = parse_id("employer_id", &self.employer_id)?;
        vacancy::validate_title(&self.title)?;
        employee::validate_tags(&self.tags)?;
        let details = VacancyDetails {
            title: self.title,
            description: self.description,
            location: self.location,
            salary: self.salary,
            tags: self.tags,
        };
        Ok(Vacancy::new(employer_id, details))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateVacancyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl UpdateVacancyRequest {
    pub fn into_patch(self) -> Result<VacancyPatch, ServiceError> {
        if let Some(title) = &self.title {
            vacancy::validate_title(title)?;
        }
        if let Some(tags) = &self.tags {
            employee::validate_tags(tags)?;
        }
        Ok(VacancyPatch {
            title: self.title,
            description: self.description,
            location: self.location,
            salary: self.salary,
            tags: self.tags,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReactionRequest {
    pub employee_id: String,
    pub vacancy_id: String,
    pub kind: String,
}

impl CreateReactionRequest {
    pub fn into_domain(self) -> Result<Reaction, ServiceError> {
        let employee_id = parse_id("employee_id", &self.employee_id)?;
        let vacancy_id = parse_id("vacancy_id", &self.vacancy_id)?;
        let kind = parse_kind(&self.kind)?;
        Ok(Reaction::new(employee_id, vacancy_id, kind))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateReactionRequest {
    pub kind: Option<String>,
}

impl UpdateReactionRequest {
    pub fn into_patch(self) -> Result<ReactionPatch, ServiceError> {
        Ok(ReactionPatch { kind: self.kind.as_deref().map(parse_kind).transpose()? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn absent_and_null_fields_both_leave_values_unchanged() {
        let absent: UpdateVacancyRequest = serde_json::from_str(r#"{"salary":"150k"}"#).unwrap();
        let null: UpdateVacancyRequest = serde_json::from_str(r#"{"salary":"150k","title":null,"tags":null}"#).unwrap();
        let a = absent.into_patch().unwrap();
        let b = null.into_patch().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.salary.as_deref(), Some("150k"));
        assert!(a.title.is_none() && a.tags.is_none());
    }

    #[test]
    fn empty_values_are_present_values() {
        let req: UpdateEmployeeRequest = serde_json::from_str(r#"{"tags":[]}"#).unwrap();
        assert_eq!(req.into_patch().unwrap().tags, Some(vec![]));
    }

    #[test]
    fn malformed_foreign_key_is_validation_error() {
        let req = CreateVacancyRequest {
            employer_id: "not-a-uuid".into(),
            title: "Dev".into(),
            description: String::new(),
            location: String::new(),
            salary: String::new(),
            tags: vec![],
        };
        assert!(matches!(req.into_domain(), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn create_conversion_leaves_identity_unstamped() {
        let user_id = Uuid::new_v4();
        let req: CreateEmployeeRequest =
            serde_json::from_value(serde_json::json!({"user_id": user_id.to_string(), "tags": ["go"]})).unwrap();
        let e = req.into_domain().unwrap();
        assert_eq!(e.user_id, user_id);
        assert!(e.id.is_nil());
        assert_eq!(e.tags, vec!["go".to_string()]);
    }

    #[test]
    fn user_role_must_be_supported() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"username":"a","chat_id":"1","role":"recruiter"}"#).unwrap();
        assert!(matches!(req.into_domain(), Err(ServiceError::Validation(_))));

        let req: CreateUserRequest =
            serde_json::from_str(r#"{"username":"a","chat_id":"1","role":"employer","password":"secret1"}"#).unwrap();
        let new_user = req.into_domain().unwrap();
        assert_eq!(new_user.user.role, Role::Employer);
        assert!(new_user.user.is_active);
        assert_eq!(new_user.password.as_deref(), Some("secret1"));

        let patch = UpdateUserRequest { role: Some("boss".into()), ..Default::default() };
        assert!(patch.into_changes().is_err());
    }

    #[test]
    fn reaction_kind_checked_on_create_and_update() {
        let req = CreateReactionRequest {
            employee_id: Uuid::new_v4().to_string(),
            vacancy_id: Uuid::new_v4().to_string(),
            kind: "dislike".into(),
        };
        assert_eq!(req.into_domain().unwrap().kind, ReactionKind::Dislike);
        let bad = UpdateReactionRequest { kind: Some("superlike".into()) };
        assert!(bad.into_patch().is_err());
        assert_eq!(UpdateReactionRequest::default().into_patch().unwrap(), ReactionPatch::default());
    }
}
