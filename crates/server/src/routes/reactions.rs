use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use service::converter::requests::{CreateReactionRequest, UpdateReactionRequest};
use service::converter::responses::ReactionResponse;

use super::path_id;
use crate::errors::JsonApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reactions", post(create_reaction))
        .route("/reactions/:id", get(get_reaction).put(update_reaction).delete(delete_reaction))
}

pub async fn create_reaction(
    State(state): State<AppState>,
    Json(req): Json<CreateReactionRequest>,
) -> Result<(StatusCode, Json<ReactionResponse>), JsonApiError> {
    let reaction = req.into_domain()?;
    let created = state.reactions.create(&state.context(), reaction).await?;
    Ok((StatusCode::CREATED, Json(ReactionResponse::from(&created))))
}

pub async fn get_reaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReactionResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let reaction = state.reactions.get(&state.context(), id).await?;
    Ok(Json(ReactionResponse::from(&reaction)))
}

pub async fn update_reaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateReactionRequest>,
) -> Result<Json<ReactionResponse>, JsonApiError> {
    let id = path_id(&id)?;
    let patch = req.into_patch()?;
    let ctx = state.context();
    state.reactions.update(&ctx, patch, id).await?;
    let reaction = state.reactions.get(&ctx, id).await?;
    Ok(Json(ReactionResponse::from(&reaction)))
}

pub async fn delete_reaction(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = path_id(&id)?;
    state.reactions.delete(&state.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
