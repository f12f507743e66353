use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::error;

#[derive(Serialize)]
struct ErrorResponse {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: &'static str,
    details: Option<String>,
    plain_text: bool,
}

impl AppError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            message,
            details: None,
            plain_text: false,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Sends the message as a bare `text/plain` body instead of a JSON object
    pub fn as_plain_text(mut self) -> Self {
        self.plain_text = true;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    // Common error constructors
    pub fn bad_request(message: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized access")
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden access")
    }

    /// A bid for the same (email, jobId) pair already exists
    pub fn duplicate_bid() -> Self {
        Self::bad_request("You have already placed this job").as_plain_text()
    }

    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        error!("Store operation failed: {}", err);
        Self::internal_server_error()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::bad_request("validation error").with_details(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.plain_text {
            return (self.status, self.message).into_response();
        }
        let body = Json(ErrorResponse {
            message: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}
