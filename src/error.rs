use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,
    #[error("\"{0}\" is already in your list")]
    Conflict(String),
    #[error("invalid request: {0}")]
    InvalidInput(String),
    #[error("movie lookup failed: {0}")]
    Lookup(String),
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Lookup(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, crate::templates::not_found_page()),
            AppError::Conflict(title) => (
                StatusCode::CONFLICT,
                crate::templates::error_page(format!("\"{title}\" is already in your list.")),
            ),
            AppError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, crate::templates::error_page(msg.clone()))
            }
            AppError::Lookup(detail) => {
                tracing::error!(%detail, "movie lookup failed");
                (
                    StatusCode::BAD_GATEWAY,
                    crate::templates::error_page(
                        "The movie database is unavailable right now. Try again later.".to_string(),
                    ),
                )
            }
            AppError::Db(err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    crate::templates::error_page("Something went wrong.".to_string()),
                )
            }
        };
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
