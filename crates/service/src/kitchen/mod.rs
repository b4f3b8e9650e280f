//! Kitchen module: store abstraction, MongoDB implementation, and the service
//! the HTTP handlers call into.

pub mod lazy;
pub mod repo;
pub mod service;
pub mod store;

pub use lazy::LazyStore;
pub use service::KitchenService;
pub use store::{DocumentFilter, DocumentStore};
