use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Role values accepted on input.
pub const ROLES: [&str; 3] = ["employee", "employer", "admin"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    pub chat_id: String,
    pub is_active: bool,
    pub is_premium: bool,
    pub role: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Employee,
    Employer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Employee => Entity::has_one(crate::employee::Entity).into(),
            Relation::Employer => Entity::has_one(crate::employer::Entity).into(),
        }
    }
}

impl Related<crate::employee::Entity> for Entity {
    fn to() -> RelationDef { Relation::Employee.def() }
}

impl Related<crate::employer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Employer.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_username(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() { return Err(ModelError::Validation("username required".into())); }
    if name.len() > 255 { return Err(ModelError::Validation("username too long (<=255)".into())); }
    Ok(())
}

pub fn validate_chat_id(chat_id: &str) -> Result<(), ModelError> {
    if chat_id.trim().is_empty() { return Err(ModelError::Validation("chat_id required".into())); }
    if chat_id.len() > 64 { return Err(ModelError::Validation("chat_id too long (<=64)".into())); }
    Ok(())
}

pub fn validate_role(role: &str) -> Result<(), ModelError> {
    if !ROLES.contains(&role) {
        return Err(ModelError::NotOneOf { field: "role", allowed: &ROLES });
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ModelError> {
    if password.len() < 6 { return Err(ModelError::Validation("password too short (>=6)".into())); }
    Ok(())
}
