//! Fluent declaration of exception transformations.
//!
//! ```
//! use exception_status::exception::builder::TransformationCollectionBuilder;
//! use exception_status::exception::transformation::Transformations;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("not found")]
//! struct NotFound;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("bad request")]
//! struct BadRequest;
//!
//! let transformations = TransformationCollectionBuilder::new()
//!     .declare_status(404).map_type::<NotFound>()
//!     .declare_status(400).map_type::<BadRequest>()
//!     .transformations();
//!
//! assert_eq!(transformations.transform(&NotFound.into(), None).unwrap(), 404);
//! ```

use crate::error::{Error, Result};
use crate::exception::Throwable;
use crate::exception::transformation::{TransformationCollection, Transformations};
use std::sync::Arc;

/// Entry point of the chain. Owns a fresh [`TransformationCollection`].
pub struct TransformationCollectionBuilder {
    transformations: Arc<dyn Transformations>,
}

impl TransformationCollectionBuilder {
    pub fn new() -> Self {
        Self {
            transformations: Arc::new(TransformationCollection::new()),
        }
    }

    /// Start mapping exceptions to `status_code`.
    pub fn declare_status(&self, status_code: u16) -> MappedTransformationBuilder {
        MappedTransformationBuilder::positioned(Arc::clone(&self.transformations), status_code)
    }

    pub fn transformations(&self) -> Arc<dyn Transformations> {
        Arc::clone(&self.transformations)
    }
}

impl Default for TransformationCollectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A status code has been declared, no exception mapped to it yet.
#[derive(Clone)]
pub struct MappedTransformationBuilder {
    transformations: Arc<dyn Transformations>,
    status_code: u16,
}

impl MappedTransformationBuilder {
    pub fn new(
        transformations: Option<Arc<dyn Transformations>>,
        status_code: u16,
    ) -> Result<Self> {
        let transformations = transformations.ok_or_else(|| Error::missing("transformations"))?;
        Ok(Self::positioned(transformations, status_code))
    }

    fn positioned(transformations: Arc<dyn Transformations>, status_code: u16) -> Self {
        Self {
            transformations,
            status_code,
        }
    }

    /// Map exceptions of type `T` to the declared status code.
    pub fn map_type<T: Throwable>(&self) -> ExceptionTransformationBuilder {
        self.transformations.add_mapping_for::<T>(self.status_code);
        ExceptionTransformationBuilder::positioned(
            Arc::clone(&self.transformations),
            self.status_code,
        )
    }

    /// Move on to another status code without mapping anything to this one.
    pub fn declare_status(&self, status_code: u16) -> MappedTransformationBuilder {
        Self::positioned(Arc::clone(&self.transformations), status_code)
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn transformations(&self) -> Arc<dyn Transformations> {
        Arc::clone(&self.transformations)
    }
}

/// At least one exception has been mapped to the current status code.
#[derive(Clone)]
pub struct ExceptionTransformationBuilder {
    transformations: Arc<dyn Transformations>,
    status_code: u16,
}

impl ExceptionTransformationBuilder {
    pub fn new(
        transformations: Option<Arc<dyn Transformations>>,
        status_code: u16,
    ) -> Result<Self> {
        let transformations = transformations.ok_or_else(|| Error::missing("transformations"))?;
        Ok(Self::positioned(transformations, status_code))
    }

    fn positioned(transformations: Arc<dyn Transformations>, status_code: u16) -> Self {
        Self {
            transformations,
            status_code,
        }
    }

    /// Start mapping exceptions to another status code. Earlier mappings are kept.
    pub fn declare_status(&self, status_code: u16) -> MappedTransformationBuilder {
        MappedTransformationBuilder::positioned(Arc::clone(&self.transformations), status_code)
    }

    /// Also map exceptions of type `T` to the current status code.
    pub fn or_type<T: Throwable>(&self) -> ExceptionTransformationBuilder {
        self.transformations.add_mapping_for::<T>(self.status_code);
        Self::positioned(Arc::clone(&self.transformations), self.status_code)
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn transformations(&self) -> Arc<dyn Transformations> {
        Arc::clone(&self.transformations)
    }
}
