//! Data transfer objects for the translation service.
//!
//! Field names follow the service's JSON wire format (camelCase).

use serde::{Deserialize, Serialize};

/// Request body for both translation endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    /// The tokenized text to translate.
    pub content: Vec<String>,
    /// ISO 639-1 code of the source language.
    pub source_language: String,
    /// Target language for single-target translation; `None` for
    /// multilingual translation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
}

/// Response of the single-target translation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    /// Translated tokens, positionally aligned with the request content.
    pub translation: Vec<String>,
}

/// One language's translation of the query tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationPart {
    /// ISO 639-1 code of this part's language.
    pub language_code: String,
    /// Translated tokens; index *i* corresponds to the *i*-th original token.
    pub content: Vec<String>,
}

impl TranslationPart {
    /// Create a translation part.
    pub fn new<S, I, T>(language_code: S, content: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        TranslationPart {
            language_code: language_code.into(),
            content: content.into_iter().map(Into::into).collect(),
        }
    }
}

/// A synonym equivalence group.
///
/// The main term is the canonical phrase appearing in the original query
/// text; the terms are its synonym candidates, language-unlabeled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynonymGroup {
    /// Canonical phrase found in the query.
    pub main_term: String,
    /// Synonym candidates for the main term.
    pub terms: Vec<String>,
}

impl SynonymGroup {
    /// Create a synonym group.
    pub fn new<S, I, T>(main_term: S, terms: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        SynonymGroup {
            main_term: main_term.into(),
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response of the multilingual translation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiTranslation {
    /// ISO 639-1 code of the detected/declared source language.
    #[serde(default)]
    pub source_language: String,
    /// All target language codes, in service order.
    #[serde(default)]
    pub languages: Vec<String>,
    /// One entry per language, positionally aligned with the original tokens.
    #[serde(default)]
    pub translations: Vec<TranslationPart>,
    /// Synonym groups found in the query text.
    #[serde(default)]
    pub synonyms: Vec<SynonymGroup>,
}
