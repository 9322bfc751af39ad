use crate::config::ExceptionLayerConfig;
use crate::exception::status_code::http_status;
use crate::exception::{ExceptionContext, ExceptionFilter};
use axum::{Json, http::StatusCode};
use serde_json::json;

/// Renders any exception as a JSON error body.
///
/// Runs last in the [`super::layer::ExceptionFilterLayer`] chain and always
/// sets a result.
#[derive(Debug, Clone, Default)]
pub struct DefaultExceptionFilter {
    config: ExceptionLayerConfig,
}

impl DefaultExceptionFilter {
    pub fn new(config: ExceptionLayerConfig) -> Self {
        Self { config }
    }
}

impl ExceptionFilter for DefaultExceptionFilter {
    fn on_exception(&self, context: Option<&mut ExceptionContext>) {
        let Some(context) = context else {
            return;
        };

        let status = http_status(self.config.default_status);
        let reason = status.canonical_reason().unwrap_or("Error").to_string();

        let message = match context.exception() {
            Some(exception) => {
                tracing::error!(
                    exception = exception.type_name(),
                    method = ?context.method(),
                    uri = ?context.uri(),
                    "Unhandled exception: {}",
                    exception
                );
                if self.config.expose_message {
                    exception.to_string()
                } else {
                    reason
                }
            }
            None => reason,
        };

        context.set_result((
            status,
            Json(json!({
                "statusCode": status.as_u16(),
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })),
        ));
    }
}
