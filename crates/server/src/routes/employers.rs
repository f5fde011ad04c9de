use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use service::converter::requests::{CreateEmployerRequest, UpdateEmployerRequest};
use service::converter::responses::{EmployerResponse, VacancyListResponse};

use super::path_id;
use crate::errors::JsonApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employers", post(create_employer))
        .route("/employers/:id", get(get_employer).put(update_employer).delete(delete_employer))
        .route("/employers/by-user/:user_id", get(get_employer_by_user))
        .route("/employers/:id/vacancies", get(list_vacancies))
}

pub async fn create_employer(
    State(state): State<AppState>,
    Json(req): Json<CreateEmployerRequest>,
) -> Result<(StatusCode, Json<EmployerResponse>), JsonApiError> {
    let employer = req.into_domain()?;
    let created = state.employers.create(&state.context(), employer).await?;
    Ok((StatusCode::CREATED, Json(EmployerResponse::from(&created))))
}

pub async fn get_employer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmployerResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let employer = state.employers.get(&state.context(), id).await?;
    Ok(Json(EmployerResponse::from(&employer)))
}

pub async fn get_employer_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<EmployerResponse>, JsonApiError> {
    let user_id = path_id(&user_id)?;
    let employer = state.employers.get_by_foreign_key(&state.context(), user_id).await?;
    Ok(Json(EmployerResponse::from(&employer)))
}

pub async fn update_employer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateEmployerRequest>,
) -> Result<Json<EmployerResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let patch = req.into_patch()?;
    let ctx = state.context();
    state.employers.update(&ctx, patch, id).await?;
    let employer = state.employers.get(&ctx, id).await?;
    Ok(Json(EmployerResponse::from(&employer)))
}

pub async fn delete_employer(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = path_id(&id)?;
    state.employers.delete(&state.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_vacancies(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VacancyListResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let list = state.vacancies.get_vacancies_by_employer(&state.context(), id).await?;
    Ok(Json(VacancyListResponse::from(&list)))
}
