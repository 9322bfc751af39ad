use crate::error::ExceptionNotMapped;
use crate::exception::{Exception, Throwable};
use dashmap::DashMap;
use std::any::TypeId;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of an exception type, used as the mapping key.
#[derive(Debug, Clone, Copy)]
pub struct ExceptionType {
    id: TypeId,
    name: &'static str,
}

impl ExceptionType {
    pub fn of<T: Throwable>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ExceptionType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ExceptionType {}

impl Hash for ExceptionType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A single exception type to status code rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    pub exception_type: ExceptionType,
    pub status_code: u16,
}

/// Outcome of looking up an exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A transformation exists for the exact type.
    Matched(u16),
    /// No transformation; the caller's default was used.
    Defaulted(u16),
    /// No transformation and no default.
    Unmapped,
}

impl Resolution {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Resolution::Matched(code) | Resolution::Defaulted(code) => Some(*code),
            Resolution::Unmapped => None,
        }
    }
}

/// Store of exception transformations.
///
/// Matching is on the exact runtime type of the exception; wrappers and
/// `source()` chains are never consulted.
pub trait Transformations: Send + Sync + 'static {
    /// Map `exception_type` to `status_code`, replacing any previous mapping.
    fn add_mapping(&self, exception_type: ExceptionType, status_code: u16);

    fn status_code_for(&self, exception: &Exception) -> Option<u16>;

    fn resolution(&self, exception: &Exception, default_status_code: Option<u16>) -> Resolution {
        match (self.status_code_for(exception), default_status_code) {
            (Some(code), _) => Resolution::Matched(code),
            (None, Some(code)) => Resolution::Defaulted(code),
            (None, None) => Resolution::Unmapped,
        }
    }

    /// Find the status code for `exception`, falling back to
    /// `default_status_code` when no transformation matches.
    fn transform(
        &self,
        exception: &Exception,
        default_status_code: Option<u16>,
    ) -> Result<u16, ExceptionNotMapped> {
        self.resolution(exception, default_status_code)
            .status_code()
            .ok_or_else(|| ExceptionNotMapped::new(exception.clone()))
    }
}

impl dyn Transformations {
    pub fn add_mapping_for<T: Throwable>(&self, status_code: u16) {
        self.add_mapping(ExceptionType::of::<T>(), status_code);
    }
}

/// Thread-safe [`Transformations`] backed by a concurrent map.
#[derive(Default)]
pub struct TransformationCollection {
    transformations: DashMap<TypeId, Transformation>,
}

impl TransformationCollection {
    pub fn new() -> Self {
        Self {
            transformations: DashMap::new(),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn add_mapping_for<T: Throwable>(&self, status_code: u16) {
        self.add_mapping(ExceptionType::of::<T>(), status_code);
    }

    pub fn get_for<T: Throwable>(&self) -> Option<u16> {
        self.transformations
            .get(&TypeId::of::<T>())
            .map(|entry| entry.status_code)
    }

    /// Snapshot of all rules, in no particular order.
    pub fn transformations(&self) -> Vec<Transformation> {
        self.transformations
            .iter()
            .map(|entry| *entry.value())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.transformations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformations.is_empty()
    }
}

impl Transformations for TransformationCollection {
    fn add_mapping(&self, exception_type: ExceptionType, status_code: u16) {
        let transformation = Transformation {
            exception_type,
            status_code,
        };
        match self.transformations.insert(exception_type.id(), transformation) {
            Some(previous) => tracing::debug!(
                exception = exception_type.name(),
                previous = previous.status_code,
                status_code,
                "Transformation replaced"
            ),
            None => tracing::debug!(
                exception = exception_type.name(),
                status_code,
                "Transformation added"
            ),
        }
    }

    fn status_code_for(&self, exception: &Exception) -> Option<u16> {
        self.transformations
            .get(&exception.type_id())
            .map(|entry| entry.status_code)
    }
}
