//! Database request/response models, one module per entity.

pub mod applications;
pub mod banners;
pub mod categories;
pub mod partners;
pub mod products;
pub mod users;
