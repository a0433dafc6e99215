use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid signature")]
    InvalidSignature,

    #[error("cache purge failed with status {status}")]
    PurgeFailed { status: u16 },

    #[error("perma-cache listing failed with status {status}")]
    ListFailed { status: u16 },

    #[error("folder delete failed with status {status}")]
    DeleteFailed { status: u16 },

    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The webhook contract fixes the exact response bodies: a bare
        // "Invalid signature" on denial, "An error occurred: ..." otherwise.
        match self {
            AppError::InvalidSignature => {
                (StatusCode::FORBIDDEN, "Invalid signature".to_string()).into_response()
            }
            other => {
                tracing::error!("request failed: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("An error occurred: {other}"),
                )
                    .into_response()
            }
        }
    }
}
