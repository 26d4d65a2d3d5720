use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

/// Application error, mapped onto HTTP statuses by [`ResponseError`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid Credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{entity} with id {id} does not exist")]
    NotFound { entity: &'static str, id: String },

    #[error("Employee with that email already exists")]
    DuplicateEmail,

    #[error("{0}")]
    Persistence(String),

    #[error("Report generation failed: {0}")]
    Report(String),

    #[error("Internal Server Error")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail
            | AppError::Persistence(_)
            | AppError::Report(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Persistence(msg) => error!(error = %msg, "Persistence failure"),
            AppError::Report(msg) => error!(error = %msg, "Report generation failure"),
            AppError::Internal(msg) => error!(error = %msg, "Internal error"),
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(json!({
            "isSuccess": false,
            "message": self.to_string(),
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            // 23000 = integrity constraint violation (unique email index)
            if db_err.code().as_deref() == Some("23000") {
                return AppError::DuplicateEmail;
            }
        }
        AppError::Persistence(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}
