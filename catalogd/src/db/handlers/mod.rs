//! Repositories over the catalog tables.
//!
//! Each repository wraps a `&mut PgConnection` so callers decide whether a
//! group of operations shares a transaction. CRUD entities implement the
//! [`Repository`](repository::Repository) trait; natural-key lookups are
//! inherent methods.

pub mod applications;
pub mod banners;
pub mod categories;
pub mod partners;
pub mod products;
pub mod repository;
pub mod users;

pub use applications::{ApplicationFilter, Applications};
pub use banners::{BannerFilter, Banners};
pub use categories::{Categories, CategoryFilter};
pub use partners::{PartnerFilter, Partners};
pub use products::{ProductFilter, Products};
pub use repository::Repository;
pub use users::Users;
