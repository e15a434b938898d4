//! Storefront domain and persistence modules.
//!
//! The HTTP crate depends on the service traits defined here; production
//! wiring goes through [`context::AppContext`], tests swap in mocks or the
//! in-memory store.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod store;

mod uuids;

pub use uuids::TypedUuid;
