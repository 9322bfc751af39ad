use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::any::{Any, TypeId};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

pub mod builder;
pub mod http;
pub mod layer;
pub mod status_code;
pub mod transformation;

/// Any error value a handler can raise.
///
/// Implemented for every `Error + Send + Sync + 'static`; the methods dispatch
/// on the concrete type so identity survives type erasure.
pub trait Throwable: Error + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;

    fn as_error(&self) -> &(dyn Error + Send + Sync + 'static);

    fn type_name(&self) -> &'static str;
}

impl<T> Throwable for T
where
    T: Error + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_error(&self) -> &(dyn Error + Send + Sync + 'static) {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A type-erased error raised while handling a request.
///
/// Handlers return `Result<_, Exception>` and use `?` on any error type.
/// Cloning is cheap and keeps the same underlying instance.
#[derive(Clone)]
pub struct Exception {
    inner: Arc<dyn Throwable>,
}

impl Exception {
    pub fn new<E: Throwable>(error: E) -> Self {
        Self {
            inner: Arc::new(error),
        }
    }

    /// Exact runtime type of the wrapped error.
    pub fn type_id(&self) -> TypeId {
        Any::type_id(self.inner.as_any())
    }

    pub fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    pub fn is<E: 'static>(&self) -> bool {
        self.inner.as_any().is::<E>()
    }

    pub fn downcast_ref<E: 'static>(&self) -> Option<&E> {
        self.inner.as_any().downcast_ref::<E>()
    }

    pub fn as_error(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.inner.as_error()
    }

    /// Whether both handles point at the same raised instance.
    pub fn ptr_eq(this: &Exception, other: &Exception) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }
}

impl<E> From<E> for Exception
where
    E: Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Exception::new(error)
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exception")
            .field("type", &self.type_name())
            .field("error", &self.inner)
            .finish()
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}

/// Without an [`layer::ExceptionFilterLayer`] the client sees a bare 500.
/// The exception rides along in the response extensions so the layer can
/// hand it to the filters.
impl IntoResponse for Exception {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Context handed to exception filters
pub struct ExceptionContext {
    exception: Option<Exception>,
    method: Option<Method>,
    uri: Option<Uri>,
    result: Option<Response>,
}

impl ExceptionContext {
    pub fn new(exception: Exception) -> Self {
        Self {
            exception: Some(exception),
            method: None,
            uri: None,
            result: None,
        }
    }

    /// A context that carries no exception.
    pub fn empty() -> Self {
        Self {
            exception: None,
            method: None,
            uri: None,
            result: None,
        }
    }

    pub fn with_request(mut self, method: Method, uri: Uri) -> Self {
        self.method = Some(method);
        self.uri = Some(uri);
        self
    }

    pub fn exception(&self) -> Option<&Exception> {
        self.exception.as_ref()
    }

    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    pub fn uri(&self) -> Option<&Uri> {
        self.uri.as_ref()
    }

    pub fn result(&self) -> Option<&Response> {
        self.result.as_ref()
    }

    /// Replace the default error response. Marks the exception as handled.
    pub fn set_result(&mut self, result: impl IntoResponse) {
        self.result = Some(result.into_response());
    }

    pub fn take_result(&mut self) -> Option<Response> {
        self.result.take()
    }

    pub fn is_handled(&self) -> bool {
        self.result.is_some()
    }
}

/// The ExceptionFilter trait
///
/// Filters are invoked when a handler raises an exception. A filter handles
/// it by setting the context's result; leaving the result unset lets the
/// next filter (and finally the default rendering) take over.
pub trait ExceptionFilter: Send + Sync + 'static {
    fn on_exception(&self, context: Option<&mut ExceptionContext>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("not found")]
    struct NotFound;

    #[derive(Debug, thiserror::Error)]
    #[error("specifically not found")]
    struct SpecificNotFound(#[source] NotFound);

    #[test]
    fn test_type_identity_survives_erasure() {
        let exception = Exception::from(NotFound);
        assert_eq!(exception.type_id(), TypeId::of::<NotFound>());
        assert!(exception.is::<NotFound>());
        assert!(exception.type_name().ends_with("NotFound"));
        assert!(exception.downcast_ref::<NotFound>().is_some());
    }

    #[test]
    fn test_wrapper_is_a_distinct_type() {
        let exception = Exception::from(SpecificNotFound(NotFound));
        assert_ne!(exception.type_id(), TypeId::of::<NotFound>());
        assert!(!exception.is::<NotFound>());
        assert!(exception.as_error().source().is_some());
    }

    #[test]
    fn test_clone_shares_instance() {
        let exception = Exception::from(NotFound);
        let copy = exception.clone();
        assert!(Exception::ptr_eq(&exception, &copy));
        assert!(!Exception::ptr_eq(&exception, &Exception::from(NotFound)));
    }

    #[test]
    fn test_into_response_carries_exception() {
        let response = Exception::from(NotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<Exception>().is_some());
    }

    #[test]
    fn test_context_result_slot() {
        let mut context = ExceptionContext::new(NotFound.into());
        assert!(!context.is_handled());
        context.set_result(StatusCode::GONE);
        assert_eq!(context.result().map(|r| r.status()), Some(StatusCode::GONE));
        assert!(context.take_result().is_some());
        assert!(context.result().is_none());
    }
}
