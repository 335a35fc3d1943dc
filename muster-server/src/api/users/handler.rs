//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;

use crate::core::ServerState;
use crate::db::repository::{self, RepoError};
use crate::utils::validation;
use shared::error::{AppError, AppResult};
use shared::models::{User, UserCreate};
use shared::util;

/// POST /users - create a user with a unique id
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<User>)> {
    let payload = validation::validate_user_create(&payload)?;

    let now = util::now();
    let user = User {
        user_id: payload.user_id,
        name: payload.name,
        created_at: now,
        updated_at: now,
    };

    match repository::user::create(&state.pool, &user).await {
        Ok(()) => Ok((StatusCode::CREATED, Json(user))),
        Err(RepoError::Duplicate(_)) => Err(AppError::duplicate_user(&user.user_id)),
        Err(err) => Err(err.into()),
    }
}

/// GET /users/{user_id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<User>> {
    let user = repository::user::find_by_id(&state.pool, &user_id)
        .await?
        .ok_or_else(|| AppError::user_not_found(&user_id))?;
    Ok(Json(user))
}
