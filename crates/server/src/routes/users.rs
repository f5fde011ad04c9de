use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use service::converter::requests::{CreateUserRequest, UpdateUserRequest};
use service::converter::responses::{UserProfileResponse, UserResponse};

use super::path_id;
use crate::errors::JsonApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/users/:id/profile", get(get_profile))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), JsonApiError> {
    let input = req.into_domain()?;
    let user = state.users.create(&state.context(), input).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<UserResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let user = state.users.get(&state.context(), id).await?;
    Ok(Json(UserResponse::from(&user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let changes = req.into_changes()?;
    let ctx = state.context();
    state.users.update(&ctx, changes, id).await?;
    let user = state.users.get(&ctx, id).await?;
    Ok(Json(UserResponse::from(&user)))
}

pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = path_id(&id)?;
    state.users.delete(&state.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserProfileResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let profile = state.profiles.get_user_profile(&state.context(), id).await?;
    Ok(Json(UserProfileResponse::from(&profile)))
}
