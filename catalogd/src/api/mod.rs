//! The HTTP API surface: wire models and request handlers.

pub mod handlers;
pub mod models;
