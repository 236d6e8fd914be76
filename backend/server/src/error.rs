use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bank::StoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or empty required field. Reported as a 500, which the
    /// dashboard client already expects.
    #[error("{context}: {details}")]
    InvalidPayload {
        context: &'static str,
        details: &'static str,
    },

    #[error("Bill not found")]
    BillNotFound,

    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("{context}: {details}")]
    InternalError {
        context: &'static str,
        details: String,
    },
}

impl AppError {
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| match source {
            StoreError::NotFound(_) => AppError::BillNotFound,
            source => AppError::Store { context, source },
        }
    }

    pub fn internal(context: &'static str) -> impl FnOnce(tokio::task::JoinError) -> Self {
        move |e| AppError::InternalError {
            context,
            details: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::BillNotFound => (StatusCode::NOT_FOUND, json!({ "error": self.to_string() })),
            AppError::InvalidPayload { context, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": context, "details": details }),
            ),
            AppError::Store { context, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": context, "details": source.to_string() }),
            ),
            AppError::InternalError { context, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": context, "details": details }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
