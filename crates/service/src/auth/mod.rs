//! Auth module: bearer tokens minted from a client payload and verified with a
//! shared secret. There is no user store and no password check.

pub mod domain;
pub mod errors;
pub mod service;

pub use service::TokenService;
