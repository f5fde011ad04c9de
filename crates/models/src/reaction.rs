use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{employee, vacancy};

pub const KINDS: [&str; 2] = ["like", "dislike"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub vacancy_id: Uuid,
    pub kind: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Employee,
    Vacancy,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Employee => Entity::belongs_to(employee::Entity)
                .from(Column::EmployeeId)
                .to(employee::Column::Id)
                .into(),
            Relation::Vacancy => Entity::belongs_to(vacancy::Entity)
                .from(Column::VacancyId)
                .to(vacancy::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_kind(kind: &str) -> Result<(), ModelError> {
    if !KINDS.contains(&kind) {
        return Err(ModelError::NotOneOf { field: "reaction", allowed: &KINDS });
    }
    Ok(())
}
