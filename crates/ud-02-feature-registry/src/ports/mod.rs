//! Ports layer: the contract every feature implements.

pub mod descriptor;
pub mod inbound;

pub use descriptor::FeatureDescriptor;
pub use inbound::Feature;
