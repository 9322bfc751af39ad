use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    routing::get,
};
use exception_status::prelude::*;
use tower::ServiceExt;

#[derive(Debug, thiserror::Error)]
#[error("entity not found")]
struct NotFoundError;

#[derive(Debug, thiserror::Error)]
#[error("bad request")]
struct BadRequestError;

#[derive(Debug, thiserror::Error)]
#[error("upstream timed out")]
struct TimeoutError;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

async fn throw_not_found() -> Result<&'static str, Exception> {
    Err(NotFoundError.into())
}

fn parse_page(raw: &str) -> Result<u32, BadRequestError> {
    raw.parse().map_err(|_| BadRequestError)
}

async fn throw_bad_request() -> Result<String, Exception> {
    let page = parse_page("first")?;
    Ok(format!("page {page}"))
}

async fn throw_timeout() -> Result<&'static str, Exception> {
    Err(TimeoutError.into())
}

fn app() -> Router {
    let transformations = TransformationCollectionBuilder::new()
        .declare_status(404)
        .map_type::<NotFoundError>()
        .declare_status(400)
        .map_type::<BadRequestError>()
        .transformations();
    let filter = StatusCodeExceptionFilter::new(Some(transformations)).unwrap();

    Router::new()
        .route("/throw-not-found", get(throw_not_found))
        .route("/throw-bad-request", get(throw_bad_request))
        .route("/throw-timeout", get(throw_timeout))
        .layer(ExceptionFilterLayer::new().filter(filter))
}

async fn get_status(uri: &str) -> Response {
    app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_not_found_maps_to_404() {
    init_tracing();
    let response = get_status("/throw-not-found").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_request_maps_to_400() {
    init_tracing();
    let response = get_status("/throw-bad-request").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unregistered_exception_falls_through_to_default() {
    init_tracing();
    let response = get_status("/throw-timeout").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["statusCode"], 500);
    assert_eq!(body["message"], "Internal Server Error");
}

#[test]
fn test_filter_scenario_without_router() {
    let transformations = TransformationCollectionBuilder::new()
        .declare_status(404)
        .map_type::<NotFoundError>()
        .declare_status(400)
        .map_type::<BadRequestError>()
        .transformations();
    let filter = StatusCodeExceptionFilter::new(Some(transformations.clone())).unwrap();

    let status_for = |exception: Exception| {
        let mut context = ExceptionContext::new(exception);
        filter.on_exception(Some(&mut context));
        context.result().map(|response| response.status())
    };

    assert_eq!(status_for(NotFoundError.into()), Some(StatusCode::NOT_FOUND));
    assert_eq!(status_for(BadRequestError.into()), Some(StatusCode::BAD_REQUEST));
    assert_eq!(status_for(TimeoutError.into()), None);

    let timeout = Exception::from(TimeoutError);
    assert_eq!(transformations.transform(&timeout, Some(504)).unwrap(), 504);
    let not_mapped = transformations.transform(&timeout, None).unwrap_err();
    assert!(Exception::ptr_eq(not_mapped.exception(), &timeout));
}
