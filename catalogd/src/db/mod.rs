//! Database layer: repositories, row models, and error mapping.

pub mod errors;
pub mod handlers;
pub mod models;
