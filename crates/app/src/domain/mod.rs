//! Domain services.

pub mod carts;
pub mod products;
