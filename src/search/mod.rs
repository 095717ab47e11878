//! Search routing module
//!
//! Drives upstream requests through the engine and instance fallback order
//! until one answer carries results.

mod executor;
mod models;

pub use executor::FallbackRouter;
pub use models::*;
