use serde_json::{json, Value};
use thiserror::Error;

use crate::layout::fitter::FitError;

/// Application-level error type.
/// `envelope()` renders the `{ "error": { "code", "message" } }` shape the job runner prints.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Fit error: {0}")]
    Fit(#[from] FitError),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Fit(_) => "FIT_ERROR",
            AppError::Notification(_) => "NOTIFICATION_ERROR",
            AppError::Url(_) => "URL_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Caller-facing envelope. Internal causes are logged and replaced with a generic message.
    pub fn envelope(&self) -> Value {
        let message = match self {
            AppError::Validation(msg) | AppError::Notification(msg) => msg.clone(),
            AppError::Fit(e) => e.to_string(),
            AppError::Url(e) => e.to_string(),
            AppError::Io(e) => {
                tracing::error!("I/O error: {e}");
                "An I/O error occurred".to_string()
            }
            AppError::Json(e) => e.to_string(),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal error occurred".to_string()
            }
        };

        json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        })
    }
}
