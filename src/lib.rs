//! # exception-status
//!
//! Map the error types raised by axum handlers to HTTP status codes.
//!
//! Mappings are declared once at startup with a fluent builder, handed to a
//! [`StatusCodeExceptionFilter`], and the filter is mounted on the router with
//! an [`ExceptionFilterLayer`]. Matching is on the exact type of the raised
//! error. Anything without a mapping falls through to the default JSON error
//! rendering.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use axum::{Router, routing::get};
//! use exception_status::prelude::*;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("user not found")]
//! struct NotFound;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("malformed request")]
//! struct BadRequest;
//!
//! async fn find_user() -> Result<&'static str, Exception> {
//!     Err(NotFound.into())
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     // 1. Declare the transformations
//!     let transformations = TransformationCollectionBuilder::new()
//!         .declare_status(404).map_type::<NotFound>()
//!         .declare_status(400).map_type::<BadRequest>()
//!         .transformations();
//!
//!     // 2. Build the filter
//!     let filter = StatusCodeExceptionFilter::new(Some(transformations)).unwrap();
//!
//!     // 3. Mount it
//!     let app: Router = Router::new()
//!         .route("/users/1", get(find_user))
//!         .layer(ExceptionFilterLayer::new().filter(filter));
//!
//!     // Serve your app...
//! }
//! ```

pub mod config;
pub mod error;
pub mod exception;

// Re-export core types
pub use config::ExceptionLayerConfig;
pub use error::{Error, ExceptionNotMapped, Result};
pub use exception::builder::TransformationCollectionBuilder;
pub use exception::layer::ExceptionFilterLayer;
pub use exception::status_code::{StatusCodeExceptionFilter, StatusCodeResult};
pub use exception::transformation::{TransformationCollection, Transformations};
pub use exception::{Exception, ExceptionContext, ExceptionFilter};

pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use exception_status::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ExceptionLayerConfig;
    pub use crate::error::{Error, ExceptionNotMapped};
    pub use crate::exception::builder::{
        ExceptionTransformationBuilder, MappedTransformationBuilder,
        TransformationCollectionBuilder,
    };
    pub use crate::exception::http::DefaultExceptionFilter;
    pub use crate::exception::layer::{ExceptionFilterLayer, ExceptionFilterMiddleware};
    pub use crate::exception::status_code::{StatusCodeExceptionFilter, StatusCodeResult};
    pub use crate::exception::transformation::{
        ExceptionType, Resolution, Transformation, TransformationCollection, Transformations,
    };
    pub use crate::exception::{Exception, ExceptionContext, ExceptionFilter, Throwable};
    pub use std::sync::Arc;
}
