//! Language analysis interfaces used by query expansion.
//!
//! Detection, tokenization, normalization, and stemming are deployment
//! concerns: the expansion engine only consumes the [`LanguageAnalyzer`]
//! trait. [`StandardLanguageAnalyzer`] provides a reasonable default built
//! on Unicode word segmentation and a per-language stemmer registry.

pub mod analyzer;
pub mod standard;
pub mod stemmer;

pub use self::analyzer::LanguageAnalyzer;
pub use self::standard::StandardLanguageAnalyzer;
pub use self::stemmer::{IdentityStemmer, PorterStemmer, Stemmer, SuffixStemmer};
