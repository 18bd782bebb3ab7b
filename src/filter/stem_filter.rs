//! Stem filter rule definitions.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Request property carrying the JSON-encoded filter rules.
pub const STEM_FILTER_PROP: &str = "stemFilter";

/// A caller-supplied pruning rule: the stems to remove wherever they occur
/// as injected alternatives for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StemFilter {
    /// ISO 639-1 code of the language the rule applies to.
    pub language: String,
    /// Stems to remove.
    pub stems: AHashSet<String>,
}

impl StemFilter {
    /// Create a filter rule.
    pub fn new<S, I, T>(language: S, stems: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        StemFilter {
            language: language.into(),
            stems: stems.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a term text is listed for removal.
    pub fn matches(&self, text: &str) -> bool {
        self.stems.contains(text)
    }
}

impl std::fmt::Display for StemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut stems: Vec<&str> = self.stems.iter().map(String::as_str).collect();
        stems.sort_unstable();
        write!(f, "language: {} | stems: {:?}", self.language, stems)
    }
}

/// Parse filter rules from a request property value.
///
/// Absent, empty, or malformed configuration all mean "no filtering": a
/// bad rule set degrades to an unfiltered query, never a failed request.
pub fn stem_filters_from_json(value: Option<&str>) -> Vec<StemFilter> {
    let Some(value) = value else {
        return Vec::new();
    };
    match serde_json::from_str(value) {
        Ok(filters) => filters,
        Err(e) => {
            tracing::debug!(error = %e, "malformed stem filter configuration ignored");
            Vec::new()
        }
    }
}
