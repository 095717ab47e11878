//! Engine selection module
//!
//! Maps a search category to the ordered list of SearXNG engines the
//! fallback router tries, one engine per upstream request.

mod selection;

pub use selection::EngineSelection;
