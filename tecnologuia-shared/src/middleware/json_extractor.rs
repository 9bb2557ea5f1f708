use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::errors::{AppError, ErrorCode};

/// `axum::Json` whose rejections render as regular error bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                AppError::new(ErrorCode::ValidationError, "missing required fields")
            }
            JsonRejection::JsonDataError(e) => AppError::Validation(e.body_text()),
            JsonRejection::JsonSyntaxError(_) => {
                AppError::new(ErrorCode::BadRequest, "malformed JSON body")
            }
            other => {
                tracing::debug!(error = %other, "unreadable request body");
                AppError::new(ErrorCode::BadRequest, "could not read request body")
            }
        }
    }
}
