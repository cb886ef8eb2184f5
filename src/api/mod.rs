//! HTTP surface.

pub mod handlers;

pub use handlers::AppState;
