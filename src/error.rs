use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Domain errors raised by handlers and the auth gate. Conversion to an
/// HTTP response happens once, at the boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    MissingField(&'static str),
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Bad email or password")]
    InvalidCredentials,
    #[error("{0}")]
    InvalidToken(&'static str),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Envelope for domain errors: `{"message": ..., "status_code": ...}`
/// with the matching HTTP status.
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    message: String,
    status_code: u16,
}

fn envelope(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(ErrorEnvelope {
            message,
            status_code: status.as_u16(),
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Credential failures share one body so the caller cannot tell
            // an unknown email from a wrong password.
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "msg": "Bad email or password" })),
            )
                .into_response(),
            ApiError::InvalidToken(reason) => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "msg": reason })),
            )
                .into_response(),
            ApiError::MissingField(msg) => envelope(StatusCode::BAD_REQUEST, msg.to_string()),
            ApiError::DuplicateEmail => {
                envelope(StatusCode::CONFLICT, "Email already registered".into())
            }
            ApiError::Store(e) => {
                error!(error = %e, "store failure");
                envelope(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
            ApiError::Internal(e) => {
                error!(error = %e, "unhandled error");
                envelope(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_field_is_400_envelope() {
        let res = ApiError::MissingField("Insert an email and password").into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["status_code"], 400);
        assert_eq!(body["message"], "Insert an email and password");
    }

    #[tokio::test]
    async fn duplicate_email_is_409() {
        let res = ApiError::DuplicateEmail.into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body = body_json(res).await;
        assert_eq!(body["status_code"], 409);
    }

    #[tokio::test]
    async fn invalid_credentials_body_is_generic() {
        let res = ApiError::InvalidCredentials.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["msg"], "Bad email or password");
    }

    #[tokio::test]
    async fn internal_error_does_not_leak_details() {
        let res = ApiError::Internal(anyhow::anyhow!("secret connection string")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(res).await;
        assert_eq!(body["message"], "Internal server error");
    }
}
