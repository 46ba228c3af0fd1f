use axum::{routing::get, Router};

use crate::db::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new().route("/users", get(handlers::list_users))
}
