use crate::error::{Error, Result};
use crate::exception::transformation::Transformations;
use crate::exception::{ExceptionContext, ExceptionFilter};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// A response that consists of nothing but a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCodeResult {
    status_code: u16,
}

impl StatusCodeResult {
    pub fn new(status_code: u16) -> Self {
        Self { status_code }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }
}

impl IntoResponse for StatusCodeResult {
    fn into_response(self) -> Response {
        http_status(self.status_code).into_response()
    }
}

/// Codes `http::StatusCode` cannot represent become 500.
pub(crate) fn http_status(status_code: u16) -> StatusCode {
    StatusCode::from_u16(status_code).unwrap_or_else(|_| {
        tracing::warn!(
            status_code,
            "Status code is not a valid HTTP status, responding with 500"
        );
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Exception filter that answers mapped exceptions with their status code.
///
/// Exceptions without a transformation are left alone so that later filters,
/// or the default rendering, can deal with them.
pub struct StatusCodeExceptionFilter {
    transformations: Arc<dyn Transformations>,
}

impl StatusCodeExceptionFilter {
    pub fn new(transformations: Option<Arc<dyn Transformations>>) -> Result<Self> {
        let transformations = transformations.ok_or_else(|| Error::missing("transformations"))?;
        Ok(Self { transformations })
    }

    pub fn transformations(&self) -> &Arc<dyn Transformations> {
        &self.transformations
    }
}

impl ExceptionFilter for StatusCodeExceptionFilter {
    fn on_exception(&self, context: Option<&mut ExceptionContext>) {
        let Some(context) = context else {
            return;
        };
        let outcome = match context.exception() {
            Some(exception) => self.transformations.transform(exception, None),
            None => return,
        };

        match outcome {
            Ok(status_code) => {
                tracing::debug!(status_code, "Exception transformed");
                context.set_result(StatusCodeResult::new(status_code));
            }
            Err(not_mapped) => {
                tracing::trace!(
                    exception = not_mapped.exception().type_name(),
                    "No transformation for exception"
                );
            }
        }
    }
}
