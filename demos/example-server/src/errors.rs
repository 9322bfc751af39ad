use thiserror::Error;

/// An entity could not be found.
#[derive(Debug, Error)]
#[error("Entity not found: {0}")]
pub struct NotFoundError(pub String);

#[derive(Debug, Error)]
#[error("Bad request: {0}")]
pub struct BadRequestError(pub String);

/// Never mapped; shows the default rendering.
#[derive(Debug, Error)]
#[error("Upstream timed out after {0}ms")]
pub struct TimeoutError(pub u64);
