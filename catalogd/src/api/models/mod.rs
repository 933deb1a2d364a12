//! Wire-format models for the HTTP API, one module per resource.

pub mod applications;
pub mod banners;
pub mod categories;
pub mod partners;
pub mod products;
pub mod stats;
pub mod users;
