//! Authentication
//!
//! The HTTP layer only needs one contract from this module: turn a bearer
//! token into a user identity. Registration, password hashing, and token
//! issuance live outside this crate.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::AuthServiceError;
pub use service::*;
