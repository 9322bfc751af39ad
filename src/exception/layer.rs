use crate::config::ExceptionLayerConfig;
use crate::exception::http::DefaultExceptionFilter;
use crate::exception::{Exception, ExceptionContext, ExceptionFilter};
use axum::{body::Body, http::Request, response::Response};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower Layer that runs exception filters over exceptions raised by handlers
///
/// Filters run in registration order; the first one to set a result wins.
/// Exceptions nobody handled are rendered by [`DefaultExceptionFilter`].
///
/// ```rust,no_run
/// use axum::{Router, routing::get};
/// use exception_status::prelude::*;
///
/// # fn app(transformations: Arc<dyn Transformations>) -> Router {
/// let filter = StatusCodeExceptionFilter::new(Some(transformations)).unwrap();
/// Router::new()
///     .route("/", get(|| async { "ok" }))
///     .layer(ExceptionFilterLayer::new().filter(filter))
/// # }
/// ```
#[derive(Clone)]
pub struct ExceptionFilterLayer {
    filters: Vec<Arc<dyn ExceptionFilter>>,
    fallback: Arc<DefaultExceptionFilter>,
}

impl ExceptionFilterLayer {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            fallback: Arc::new(DefaultExceptionFilter::default()),
        }
    }

    /// Append a filter to the chain.
    pub fn filter<F: ExceptionFilter>(mut self, filter: F) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn filter_arc(mut self, filter: Arc<dyn ExceptionFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_config(mut self, config: ExceptionLayerConfig) -> Self {
        self.fallback = Arc::new(DefaultExceptionFilter::new(config));
        self
    }
}

impl Default for ExceptionFilterLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for ExceptionFilterLayer {
    type Service = ExceptionFilterMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ExceptionFilterMiddleware {
            inner,
            filters: Arc::from(self.filters.as_slice()),
            fallback: self.fallback.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ExceptionFilterMiddleware<S> {
    inner: S,
    filters: Arc<[Arc<dyn ExceptionFilter>]>,
    fallback: Arc<DefaultExceptionFilter>,
}

impl<S> Service<Request<Body>> for ExceptionFilterMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let filters = self.filters.clone();
        let fallback = self.fallback.clone();
        // Take the service that was driven to readiness, leave a clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let method = req.method().clone();
        let uri = req.uri().clone();

        Box::pin(async move {
            let mut response = inner.call(req).await?;

            let Some(exception) = response.extensions_mut().remove::<Exception>() else {
                return Ok(response);
            };

            let mut context = ExceptionContext::new(exception).with_request(method, uri);
            for filter in filters.iter() {
                filter.on_exception(Some(&mut context));
                if context.is_handled() {
                    break;
                }
            }
            if !context.is_handled() {
                fallback.on_exception(Some(&mut context));
            }

            Ok(context.take_result().unwrap_or(response))
        })
    }
}
