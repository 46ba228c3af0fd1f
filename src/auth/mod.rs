use axum::{
    routing::{get, post},
    Router,
};

use crate::db::AppState;

pub mod handlers;
pub mod jwt;
pub mod password;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::signup))
        .route("/token", post(handlers::login))
        .route("/protected", get(handlers::protected))
}
