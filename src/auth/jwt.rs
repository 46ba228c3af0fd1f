use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};

use crate::{config::JwtConfig, db::AppState, error::ApiError, users::dto::PublicUser};

/// JWT payload: the serialized user identity under `sub`, plus issue and
/// expiry times. Verification must hand back exactly what was signed.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: PublicUser,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl_minutes: i64,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            ttl_minutes,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }
}

impl JwtKeys {
    pub fn sign(&self, identity: &PublicUser) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::minutes(self.ttl_minutes);
        let claims = Claims {
            sub: identity.clone(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = identity.id, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| ApiError::InvalidToken("Invalid or expired token"))?;
        debug!(user_id = data.claims.sub.id, "jwt verified");
        Ok(data.claims)
    }
}

/// Authentication gate: rejects with 401 before the handler body runs, so
/// a bad token never reaches the store.
pub struct CurrentUser(pub PublicUser);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::InvalidToken("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::InvalidToken("Invalid Authorization header"))?;

        let claims = keys.verify(token).map_err(|e| {
            warn!("invalid or expired token");
            e
        })?;

        Ok(CurrentUser(claims.sub))
    }
}
