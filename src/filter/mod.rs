//! Stem filtering engine.
//!
//! Selectively removes previously injected stems from an expanded query
//! tree according to caller-supplied per-language rules, without breaking
//! the tree's boolean/ranking semantics.

pub mod engine;
pub mod stem_filter;

pub use self::engine::StemFilterEngine;
pub use self::stem_filter::{STEM_FILTER_PROP, StemFilter, stem_filters_from_json};
