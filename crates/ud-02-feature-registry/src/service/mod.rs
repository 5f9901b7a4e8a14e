//! Service layer: the feature registry.

mod registry;

pub use registry::FeatureRegistry;
