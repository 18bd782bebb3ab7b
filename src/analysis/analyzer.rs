//! Core language analyzer trait definition.

/// Trait for the language analysis operations query expansion depends on.
///
/// Implementations are free to delegate to any detection, segmentation, or
/// stemming backend. The trait requires `Send + Sync` so one analyzer can be
/// shared across request-handling threads.
pub trait LanguageAnalyzer: Send + Sync {
    /// Detect the language of a piece of query text.
    ///
    /// Returns an ISO 639-1 two-letter code (e.g. `"en"`).
    fn detect(&self, text: &str) -> String;

    /// Split text into indexable word tokens.
    ///
    /// Non-indexable segments such as punctuation and whitespace are
    /// stripped. Tokens keep their original surface form.
    fn tokenize(&self, text: &str, language: &str) -> Vec<String>;

    /// Normalize a single word (case folding and similar).
    ///
    /// An empty result means the word has no indexable content.
    fn normalize(&self, word: &str) -> String;

    /// Stem a normalized word with the stemmer for `language`.
    ///
    /// Multi-word input yields one stem per word unit, in order; an empty
    /// result means nothing usable survived stemming.
    fn stem(&self, word: &str, language: &str) -> Vec<String>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
