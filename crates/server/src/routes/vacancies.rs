use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use service::converter::requests::{CreateVacancyRequest, UpdateVacancyRequest};
use service::converter::responses::{VacancyListResponse, VacancyResponse};

use super::path_id;
use crate::errors::JsonApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vacancies", post(create_vacancy).get(list_vacancies))
        .route("/vacancies/:id", get(get_vacancy).put(update_vacancy).delete(delete_vacancy))
}

pub async fn create_vacancy(
    State(state): State<AppState>,
    Json(req): Json<CreateVacancyRequest>,
) -> Result<(StatusCode, Json<VacancyResponse>), JsonApiError> {
    let vacancy = req.into_domain()?;
    let created = state.vacancies.create(&state.context(), vacancy).await?;
    Ok((StatusCode::CREATED, Json(VacancyResponse::from(&created))))
}

/// Full unpaginated listing, newest first.
pub async fn list_vacancies(State(state): State<AppState>) -> Result<Json<VacancyListResponse>, JsonApiError> {
    let all = state.vacancies.get_vacancy_list(&state.context()).await?;
    Ok(Json(VacancyListResponse::from(all.as_slice())))
}

pub async fn get_vacancy(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<VacancyResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let vacancy = state.vacancies.get(&state.context(), id).await?;
    Ok(Json(VacancyResponse::from(&vacancy)))
}

pub async fn update_vacancy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateVacancyRequest>,
) -> Result<Json<VacancyResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let patch = req.into_patch()?;
    let ctx = state.context();
    state.vacancies.update(&ctx, patch, id).await?;
    let vacancy = state.vacancies.get(&ctx, id).await?;
    Ok(Json(VacancyResponse::from(&vacancy)))
}

pub async fn delete_vacancy(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = path_id(&id)?;
    state.vacancies.delete(&state.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
