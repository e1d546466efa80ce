//! Request errors and their HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::content::ContentError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::PostNotFound(_) => {
                tracing::debug!("{}", self);
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            _ => {
                tracing::error!("Request failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
