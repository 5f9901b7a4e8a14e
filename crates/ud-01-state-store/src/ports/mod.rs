//! Ports for the state store.

pub mod inbound;

pub use inbound::StateStoreApi;
