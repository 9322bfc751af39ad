use serde::Deserialize;

/// Settings for the default rendering of unhandled exceptions.
///
/// Deserializable from any serde source; missing keys keep their defaults.
///
/// ```
/// use exception_status::config::ExceptionLayerConfig;
///
/// let config: ExceptionLayerConfig = serde_json::from_str(r#"{"exposeMessage": true}"#).unwrap();
/// assert_eq!(config.default_status, 500);
/// assert!(config.expose_message);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExceptionLayerConfig {
    /// Status used when no filter handled the exception.
    pub default_status: u16,
    /// Put the exception's message in the response body instead of the
    /// canonical reason phrase.
    pub expose_message: bool,
}

impl Default for ExceptionLayerConfig {
    fn default() -> Self {
        Self {
            default_status: 500,
            expose_message: false,
        }
    }
}

impl ExceptionLayerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_status(mut self, status: u16) -> Self {
        self.default_status = status;
        self
    }

    pub fn with_expose_message(mut self, expose: bool) -> Self {
        self.expose_message = expose;
        self
    }
}
