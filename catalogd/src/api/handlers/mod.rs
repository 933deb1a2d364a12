//! HTTP request handlers, one module per resource.

pub mod applications;
pub mod auth;
pub mod banners;
pub mod categories;
pub mod partners;
pub mod products;
pub mod stats;
