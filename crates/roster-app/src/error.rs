use axum::response::{IntoResponse, Response};
use http::StatusCode;
use tracing::{debug, error};

pub type ApiResult<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(roster_dal::Error),
}

impl From<roster_dal::Error> for ApiError {
    fn from(error: roster_dal::Error) -> Self {
        match error {
            roster_dal::Error::RecordNotFound(what) => ApiError::NotFound(what),
            roster_dal::Error::InvalidInput(msg) => ApiError::InvalidInput(msg),
            other => ApiError::DatabaseError(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidInput(_) | ApiError::InvalidQuery(_) | ApiError::InvalidPath(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Request failed: {self}");
            (status, "Internal server error").into_response()
        } else {
            debug!("Request rejected: {self}");
            (status, self.to_string()).into_response()
        }
    }
}
