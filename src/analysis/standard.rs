//! Standard language analyzer implementation.

use ahash::AHashMap;
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::analyzer::LanguageAnalyzer;
use crate::analysis::stemmer::{IdentityStemmer, PorterStemmer, Stemmer};

/// A [`LanguageAnalyzer`] built on Unicode word segmentation (UAX #29) and a
/// per-language stemmer registry.
///
/// Tokenization splits on Unicode word boundaries and keeps only segments
/// containing alphanumeric content, so punctuation never reaches the
/// translator. Normalization lowercases. Stemming dispatches to the stemmer
/// registered for the language, defaulting to Porter for English and the
/// identity stemmer for everything else.
///
/// Real language *detection* is a deployment concern (usually a dedicated
/// service or model); this implementation reports its configured primary
/// language for any input.
pub struct StandardLanguageAnalyzer {
    primary_language: String,
    stemmers: AHashMap<String, Box<dyn Stemmer>>,
    fallback: IdentityStemmer,
}

impl std::fmt::Debug for StandardLanguageAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardLanguageAnalyzer")
            .field("primary_language", &self.primary_language)
            .field("stemmers", &self.stemmers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl StandardLanguageAnalyzer {
    /// Create an analyzer with English as the primary language and a Porter
    /// stemmer registered for it.
    pub fn new() -> Self {
        let mut analyzer = StandardLanguageAnalyzer {
            primary_language: "en".to_string(),
            stemmers: AHashMap::new(),
            fallback: IdentityStemmer::new(),
        };
        analyzer.register_stemmer("en", Box::new(PorterStemmer::new()));
        analyzer
    }

    /// Set the primary language reported by [`detect`](LanguageAnalyzer::detect).
    pub fn with_primary_language<S: Into<String>>(mut self, language: S) -> Self {
        self.primary_language = language.into();
        self
    }

    /// Register a stemmer for a language code, replacing any previous one.
    pub fn register_stemmer<S: Into<String>>(&mut self, language: S, stemmer: Box<dyn Stemmer>) {
        self.stemmers.insert(language.into(), stemmer);
    }

    fn stemmer_for(&self, language: &str) -> &dyn Stemmer {
        self.stemmers
            .get(language)
            .map(|s| s.as_ref())
            .unwrap_or(&self.fallback)
    }
}

impl Default for StandardLanguageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for StandardLanguageAnalyzer {
    fn detect(&self, _text: &str) -> String {
        self.primary_language.clone()
    }

    fn tokenize(&self, text: &str, _language: &str) -> Vec<String> {
        text.split_word_bounds()
            .filter(|segment| segment.chars().any(|c| c.is_alphanumeric()))
            .map(|segment| segment.to_string())
            .collect()
    }

    fn normalize(&self, word: &str) -> String {
        word.trim().to_lowercase()
    }

    fn stem(&self, word: &str, language: &str) -> Vec<String> {
        let stemmer = self.stemmer_for(language);
        word.unicode_words()
            .map(|unit| stemmer.stem(unit))
            .filter(|stem| !stem.trim().is_empty())
            .collect()
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}
