// Service exports
pub mod catalog;
pub mod geocoder;
pub mod recommender;

pub use catalog::{CatalogError, InMemorySource, PropertyCatalog, PropertySource};
pub use geocoder::{GeocodeError, NominatimGeocoder};
pub use recommender::{RecommendError, Recommender};
