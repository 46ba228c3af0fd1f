use axum::{
    extract::{FromRef, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::{
    jwt::{CurrentUser, JwtKeys},
    password,
};
use crate::{db::AppState, error::ApiError, users::dto::PublicUser, users::repo::User};

/// Body for /signup and /token. Fields are optional so absence is
/// handled per endpoint (400 on signup, a generic 401 on login) rather
/// than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub pass: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub code: u16,
    pub mensaje: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct ProtectedResponse {
    pub code: u16,
    pub msg: &'static str,
    pub token: String,
    pub user: PublicUser,
}

fn require_credentials(body: CredentialsRequest) -> Result<(String, String), ApiError> {
    match (body.email, body.pass) {
        (Some(email), Some(pass)) if !email.is_empty() && !pass.is_empty() => Ok((email, pass)),
        _ => Err(ApiError::MissingField("Insert an email and password")),
    }
}

#[instrument(skip(state, body))]
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    let (email, pass) = require_credentials(body)?;

    let hash = password::hash_password(&pass)?;
    let user = User::create(&state.db, &email, &hash, true).await?;

    info!(user_id = user.id, email = %user.email, "user registered");
    // No token on signup; clients log in through /token.
    Ok(Json(SignupResponse {
        code: 200,
        mensaje: "Usuario creado correctamente",
    }))
}

#[instrument(skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    // Absent or empty credentials take the same generic exit as a failed
    // match; /token never answers anything but 401 on bad input.
    let (email, pass) = match (body.email, body.pass) {
        (Some(email), Some(pass)) if !email.is_empty() && !pass.is_empty() => (email, pass),
        _ => return Err(ApiError::InvalidCredentials),
    };

    // Unknown email and wrong password take the same exit.
    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !password::verify_password(&pass, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let identity = user.public();
    let token = keys.sign(&identity)?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(TokenResponse {
        token,
        user: identity,
    }))
}

#[instrument(skip(state))]
pub async fn protected(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<ProtectedResponse>, ApiError> {
    // Re-read the record so a stale claim never masks a changed user.
    let user = User::find_by_email(&state.db, &identity.email)
        .await?
        .ok_or_else(|| {
            ApiError::Internal(anyhow::anyhow!(
                "user {} vanished after token verification",
                identity.email
            ))
        })?;

    let keys = JwtKeys::from_ref(&state);
    let fresh = user.public();
    let token = keys.sign(&fresh)?;

    Ok(Json(ProtectedResponse {
        code: 200,
        msg: "Inicio de sesión correcto",
        token,
        user: fresh,
    }))
}
