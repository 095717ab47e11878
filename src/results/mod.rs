//! Search result types and the provenance-stripping normalizer

mod normalize;
mod types;

pub use normalize::normalize;
pub use types::*;
