use std::{fmt, io};
use axum::{http::StatusCode, response::{IntoResponse, Response}};

/// Custom error types for the wiki application
#[derive(Debug)]
pub enum WikiError {
    Io(io::Error),
    /// Request path is not `/(view|edit|save)/<alphanumeric title>`
    InvalidPath,
    PageNotFound(String),
    Persistence(io::Error),
    TemplateError(String),
    Config(String),
}

impl From<io::Error> for WikiError {
    fn from(err: io::Error) -> Self {
        WikiError::Io(err)
    }
}

impl fmt::Display for WikiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WikiError::Io(e) => write!(f, "I/O error: {}", e),
            WikiError::InvalidPath => write!(f, "Invalid page URL"),
            WikiError::PageNotFound(title) => write!(f, "Page not found: {}", title),
            WikiError::Persistence(e) => write!(f, "Save failed: {}", e),
            WikiError::TemplateError(e) => write!(f, "Template error: {}", e),
            WikiError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for WikiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WikiError::Io(e) | WikiError::Persistence(e) => Some(e),
            _ => None,
        }
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            WikiError::InvalidPath => (StatusCode::NOT_FOUND, "404 page not found").into_response(),
            WikiError::PageNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            WikiError::Io(_)
            | WikiError::Persistence(_)
            | WikiError::TemplateError(_)
            | WikiError::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}
