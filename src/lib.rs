//! # Glossa
//!
//! Multilingual query expansion and stem filtering for full-text search queries.
//!
//! Glossa takes a parsed query tree, translates its terms into multiple
//! languages through an external translation service, stems the translated
//! terms with language-specific stemmers, and rebuilds the tree as a ranked
//! boolean expression: original term OR any stemmed translation, grouped per
//! language, with synonym equivalence classes. A second, independent pass can
//! selectively prune previously injected stems per language without breaking
//! the boolean/ranking semantics of the tree.
//!
//! ## Features
//!
//! - Closed query tree model with exhaustive pattern matching
//! - Language-grouped expansion with weak-and ranking semantics
//! - Synonym equivalence classes
//! - Recursive per-language stem pruning
//! - Pluggable language analysis and translation backends

pub mod analysis;
pub mod cli;
pub mod error;
pub mod expand;
pub mod filter;
pub mod metadata;
pub mod query;
pub mod translate;

pub mod prelude {
    //! Convenience re-exports for common usage.

    pub use crate::analysis::{LanguageAnalyzer, StandardLanguageAnalyzer};
    pub use crate::error::{GlossaError, Result};
    pub use crate::expand::{ExpandedQuery, ExpansionConfig, QueryExpansionBuilder};
    pub use crate::filter::{StemFilter, StemFilterEngine};
    pub use crate::query::{LanguageFilterNode, QueryNode};
    pub use crate::translate::{MultiTranslation, Translator};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
