use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use service::converter::requests::{CreateResumeRequest, UpdateResumeRequest};
use service::converter::responses::ResumeResponse;

use super::path_id;
use crate::errors::JsonApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resumes", post(create_resume))
        .route("/resumes/:id", get(get_resume).put(update_resume).delete(delete_resume))
}

pub async fn create_resume(
    State(state): State<AppState>,
    Json(req): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeResponse>), JsonApiError> {
    let resume = req.into_domain()?;
    let created = state.resumes.create(&state.context(), resume).await?;
    Ok((StatusCode::CREATED, Json(ResumeResponse::from(&created))))
}

pub async fn get_resume(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ResumeResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let resume = state.resumes.get(&state.context(), id).await?;
    Ok(Json(ResumeResponse::from(&resume)))
}

pub async fn update_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateResumeRequest>,
) -> Result<Json<ResumeResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let patch = req.into_patch()?;
    let ctx = state.context();
    state.resumes.update(&ctx, patch, id).await?;
    let resume = state.resumes.get(&ctx, id).await?;
    Ok(Json(ResumeResponse::from(&resume)))
}

pub async fn delete_resume(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = path_id(&id)?;
    state.resumes.delete(&state.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
