use crate::{employee, employer, reaction, resume, user, vacancy};

#[test]
fn role_validator_accepts_known_roles_only() {
    for role in user::ROLES {
        assert!(user::validate_role(role).is_ok(), "{role} should be accepted");
    }
    assert!(user::validate_role("recruiter").is_err());
    assert!(user::validate_role("").is_err());
    assert!(user::validate_role("Employee").is_err());
    assert_eq!(
        user::validate_role("recruiter").unwrap_err().to_string(),
        format!("role must be one of {}", user::ROLES.join(", "))
    );
}

#[test]
fn username_and_chat_id_required() {
    assert!(user::validate_username("alice").is_ok());
    assert!(user::validate_username("   ").is_err());
    assert!(user::validate_username(&"x".repeat(256)).is_err());
    assert!(user::validate_chat_id("100200").is_ok());
    assert!(user::validate_chat_id("").is_err());
}

#[test]
fn password_length_enforced() {
    assert!(user::validate_password("secret").is_ok());
    assert!(user::validate_password("short").is_err());
}

#[test]
fn reaction_kind_validator() {
    assert!(reaction::validate_kind("like").is_ok());
    assert!(reaction::validate_kind("dislike").is_ok());
    assert!(reaction::validate_kind("love").is_err());
    assert_eq!(reaction::validate_kind("love").unwrap_err().to_string(), "reaction must be one of like, dislike");
}

#[test]
fn tags_reject_blank_entries() {
    assert!(employee::validate_tags(&["rust".into(), "sql".into()]).is_ok());
    assert!(employee::validate_tags(&[]).is_ok());
    assert!(employee::validate_tags(&["rust".into(), " ".into()]).is_err());
}

#[test]
fn employer_and_vacancy_fields() {
    assert!(employer::validate_company_name("Acme").is_ok());
    assert!(employer::validate_company_name("").is_err());
    assert!(employer::validate_company_website("").is_ok());
    assert!(employer::validate_company_website("https://acme.io").is_ok());
    assert!(employer::validate_company_website("acme.io").is_err());
    assert!(vacancy::validate_title("Backend engineer").is_ok());
    assert!(vacancy::validate_title(" ").is_err());
    assert!(resume::validate_file_id("file-1").is_ok());
    assert!(resume::validate_file_id("").is_err());
}
