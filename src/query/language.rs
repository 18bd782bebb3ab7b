//! Language filter nodes.
//!
//! A language filter is a field-match predicate over one or more language
//! codes. It is used both as a router ("is this branch for Spanish?") and,
//! wrapped in a negation, as an exclusion ("none of these languages").

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{GlossaError, Result};

/// The document field holding the language code.
pub const LANGUAGE_FIELD: &str = "language";

/// Maximum number of distinct language codes a single filter pattern may
/// list. Bounds tree growth when exclusion patterns are extended repeatedly.
pub const MAX_PATTERN_LANGUAGES: usize = 11;

/// A field-match predicate over a set of language codes.
///
/// The code list is deduplicated and capped at [`MAX_PATTERN_LANGUAGES`]
/// entries. The rendered pattern is a plain code for a single entry and a
/// regex disjunction `(code1|code2|...)` for several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageFilterNode {
    field: String,
    codes: Vec<String>,
}

impl LanguageFilterNode {
    /// Create a filter for a single language code on the default language field.
    pub fn new<S: Into<String>>(code: S) -> Self {
        LanguageFilterNode {
            field: LANGUAGE_FIELD.to_string(),
            codes: vec![code.into()],
        }
    }

    /// Create a filter from an iterator of codes, deduplicating and capping
    /// the list at [`MAX_PATTERN_LANGUAGES`] entries.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut filter = LanguageFilterNode {
            field: LANGUAGE_FIELD.to_string(),
            codes: Vec::new(),
        };
        for code in codes {
            let code = code.into();
            if !filter.extend(&code) && !filter.codes.contains(&code) {
                tracing::trace!(code, "language filter at capacity, code dropped");
            }
        }
        filter
    }

    /// Get the field this filter matches against.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the language codes in this filter.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// The single language code this filter routes to, if it lists exactly one.
    pub fn language(&self) -> Option<&str> {
        match self.codes.as_slice() {
            [code] => Some(code),
            _ => None,
        }
    }

    /// Add a code to this filter.
    ///
    /// Returns `true` only when the code was actually added: duplicates and
    /// additions past [`MAX_PATTERN_LANGUAGES`] leave the filter unchanged.
    pub fn extend<S: AsRef<str>>(&mut self, code: S) -> bool {
        let code = code.as_ref();
        if self.codes.iter().any(|c| c == code) {
            return false;
        }
        if self.codes.len() >= MAX_PATTERN_LANGUAGES {
            return false;
        }
        self.codes.push(code.to_string());
        true
    }

    /// Whether the given language code is accepted by this filter.
    pub fn matches(&self, language: &str) -> bool {
        self.codes.iter().any(|c| c == language)
    }

    /// Render the filter as the regex pattern consumed by a downstream
    /// retrieval engine: `en` for one code, `(en|fr|es)` for several.
    pub fn pattern(&self) -> String {
        match self.codes.as_slice() {
            [code] => code.clone(),
            codes => format!("({})", codes.join("|")),
        }
    }

    /// Compile the rendered pattern into an anchored [`Regex`].
    pub fn to_regex(&self) -> Result<Regex> {
        Regex::new(&format!("^(?:{})$", self.codes.join("|")))
            .map_err(|e| GlossaError::query(format!("invalid language pattern: {e}")))
    }
}
