use crate::exception::Exception;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required collaborator was not supplied at construction time.
    #[error("Missing required argument: {name}")]
    MissingArgument { name: &'static str },

    #[error(transparent)]
    NotMapped(#[from] ExceptionNotMapped),
}

impl Error {
    pub(crate) fn missing(name: &'static str) -> Self {
        Error::MissingArgument { name }
    }
}

/// Raised when a status code was requested for an exception that has no
/// transformation and no default was given.
#[derive(Debug, Error)]
#[error("No status code mapped for exception of type {}", .exception.type_name())]
pub struct ExceptionNotMapped {
    exception: Exception,
}

impl ExceptionNotMapped {
    pub fn new(exception: Exception) -> Self {
        Self { exception }
    }

    /// The exception that could not be mapped.
    pub fn exception(&self) -> &Exception {
        &self.exception
    }

    pub fn into_exception(self) -> Exception {
        self.exception
    }
}

impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
        (status, self.to_string()).into_response()
    }
}
