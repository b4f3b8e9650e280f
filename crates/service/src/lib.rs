//! Service layer for the Miah Kitchen backend.
//! - `kitchen`: the document store seam and the per-route operations on it.
//! - `auth`: signing and verifying the bearer tokens handed out by `POST /jwt`.

pub mod auth;
pub mod errors;
pub mod kitchen;

pub use auth::TokenService;
pub use kitchen::{DocumentStore, KitchenService};
