use axum::{extract::State, Json};
use tracing::instrument;

use super::{dto::UsersResponse, repo::User};
use crate::{db::AppState, error::ApiError};

/// GET /users — public read, no auth in this service.
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UsersResponse>, ApiError> {
    let users = User::list_all(&state.db).await?;
    Ok(Json(UsersResponse {
        code: 200,
        msg: "Usuarios existentes obtenidos",
        users: users.iter().map(User::public).collect(),
    }))
}
