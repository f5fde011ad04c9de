use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use service::converter::requests::{CreateEmployeeRequest, UpdateEmployeeRequest};
use service::converter::responses::{EmployeeResponse, ReactionListResponse, ResumeResponse};

use super::path_id;
use crate::errors::JsonApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees", post(create_employee))
        .route("/employees/:id", get(get_employee).put(update_employee).delete(delete_employee))
        .route("/employees/by-user/:user_id", get(get_employee_by_user))
        .route("/employees/:id/reactions", get(list_reactions))
        .route("/employees/:id/resume", get(get_resume))
}

pub async fn create_employee(
    State(state): State<AppState>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), JsonApiError> {
    let employee = req.into_domain()?;
    let created = state.employees.create(&state.context(), employee).await?;
    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(&created))))
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmployeeResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let employee = state.employees.get(&state.context(), id).await?;
    Ok(Json(EmployeeResponse::from(&employee)))
}

pub async fn get_employee_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<EmployeeResponse>, JsonApiError> {
    let user_id = path_id(&user_id)?;
    let employee = state.employees.get_by_foreign_key(&state.context(), user_id).await?;
    Ok(Json(EmployeeResponse::from(&employee)))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let patch = req.into_patch()?;
    let ctx = state.context();
    state.employees.update(&ctx, patch, id).await?;
    let employee = state.employees.get(&ctx, id).await?;
    Ok(Json(EmployeeResponse::from(&employee)))
}

pub async fn delete_employee(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = path_id(&id)?;
    state.employees.delete(&state.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_reactions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReactionListResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let list = state.reactions.get_reactions_by_employee(&state.context(), id).await?;
    Ok(Json(ReactionListResponse::from(&list)))
}

pub async fn get_resume(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ResumeResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let resume = state.resumes.get_by_foreign_key(&state.context(), id).await?;
    Ok(Json(ResumeResponse::from(&resume)))
}
