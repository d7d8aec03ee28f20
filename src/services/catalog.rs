use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::models::Property;

/// Errors that can occur when loading the property collection
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("property source failed: {0}")]
    Source(String),

    #[error("invalid property {id}: {reason}")]
    InvalidProperty { id: u32, reason: String },
}

/// A synchronous producer of the current full property collection
///
/// Persistence, schema management, and image metadata live behind this seam;
/// the engine only ever sees canonical `Property` records.
pub trait PropertySource: Send + Sync {
    fn load(&self) -> Result<Vec<Property>, CatalogError>;
}

/// Property source backed by an in-memory collection; used by tests and by
/// callers that manage persistence themselves
pub struct InMemorySource {
    properties: Vec<Property>,
}

impl InMemorySource {
    pub fn new(properties: Vec<Property>) -> Self {
        Self { properties }
    }
}

impl PropertySource for InMemorySource {
    fn load(&self) -> Result<Vec<Property>, CatalogError> {
        Ok(self.properties.clone())
    }
}

/// Immutable snapshot cache of the loaded property collection
///
/// A reload validates the incoming rows and swaps in a new `Arc` snapshot;
/// in-flight scoring and filtering calls keep whatever snapshot they already
/// hold, so concurrent readers always see a consistent view.
pub struct PropertyCatalog {
    snapshot: RwLock<Arc<Vec<Property>>>,
}

impl PropertyCatalog {
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Replace the current snapshot with a freshly loaded collection
    ///
    /// Returns the number of properties loaded. Rows violating the record
    /// invariants (negative price, out-of-range coordinates) are rejected
    /// as a whole so a bad import never half-replaces a good snapshot.
    pub fn reload(&self, source: &dyn PropertySource) -> Result<usize, CatalogError> {
        let properties = source.load()?;

        for property in &properties {
            validate_property(property)?;
        }

        let count = properties.len();
        let mut guard = self.snapshot.write().expect("catalog lock poisoned");
        *guard = Arc::new(properties);
        drop(guard);

        tracing::info!("Loaded {} properties", count);
        Ok(count)
    }

    /// The current snapshot; cheap to clone, safe to hold across a reload
    pub fn snapshot(&self) -> Arc<Vec<Property>> {
        self.snapshot.read().expect("catalog lock poisoned").clone()
    }
}

impl Default for PropertyCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_property(property: &Property) -> Result<(), CatalogError> {
    if property.nightly_price < 0.0 {
        return Err(CatalogError::InvalidProperty {
            id: property.id,
            reason: format!("negative nightly price {}", property.nightly_price),
        });
    }
    if let Some(latitude) = property.latitude {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CatalogError::InvalidProperty {
                id: property.id,
                reason: format!("latitude {} out of range", latitude),
            });
        }
    }
    if let Some(longitude) = property.longitude {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CatalogError::InvalidProperty {
                id: property.id,
                reason: format!("longitude {} out of range", longitude),
            });
        }
    }
    Ok(())
}
