//! Query expansion builder implementation.

use tracing::{debug, trace};

use crate::analysis::LanguageAnalyzer;
use crate::error::Result;
use crate::query::{LANGUAGE_FIELD, LanguageFilterNode, QueryNode};
use crate::translate::{MultiTranslation, SynonymGroup, TranslationPart, Translator};

/// Configuration for query expansion.
#[derive(Debug, Clone)]
pub struct ExpansionConfig {
    /// Whether synonym equivalence classes are added to expanded clauses.
    pub include_synonyms: bool,
    /// Language used to stem synonym main terms. Canonical synonym phrases
    /// are maintained in a single reference language.
    pub reference_language: String,
    /// Indexed fields whose clauses are eligible for expansion.
    pub body_fields: Vec<String>,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        ExpansionConfig {
            include_synonyms: false,
            reference_language: "en".to_string(),
            body_fields: vec!["body".to_string(), "default".to_string()],
        }
    }
}

impl ExpansionConfig {
    /// Set the synonym flag from a request property value.
    ///
    /// The property is boolean-as-integer: `"1"` enables synonyms, anything
    /// else (including an absent property) disables them.
    pub fn with_synonyms_property(mut self, value: Option<&str>) -> Self {
        self.include_synonyms = value.map(str::trim) == Some("1");
        self
    }
}

/// An expanded query tree together with the translation metadata captured
/// while building it.
#[derive(Debug, Clone)]
pub struct ExpandedQuery {
    /// The rewritten tree.
    pub root: QueryNode,
    /// Raw translator responses, one per expanded clause. Consumed by a
    /// downstream metadata renderer.
    pub translations: Vec<MultiTranslation>,
}

impl ExpandedQuery {
    /// Serialize the captured translation metadata for the renderer.
    pub fn metadata_json(&self) -> Result<String> {
        crate::metadata::render_translations(&self.translations)
    }
}

/// Rewrites query clauses as ranked boolean expressions combining original
/// terms with stemmed translations and synonym equivalence classes.
///
/// For each eligible clause the builder detects the query language,
/// tokenizes the clause text, fetches translations for every supported
/// language, stems each translated token with the language's stemmer, and
/// splices back a tree of shape:
///
/// ```text
/// WeakAnd(
///     Or(
///         And(WeakAnd(stemmed alternatives...), language~L1),
///         And(WeakAnd(stemmed alternatives...), language~L2),
///         And(Not(language~(L1|L2|...)), WeakAnd(original tokens)),
///     ),
///     Equiv(synonym class...),
/// )
/// ```
///
/// The final fallback branch is only built when the query carries no
/// language restriction of its own; synonym classes only when requested.
pub struct QueryExpansionBuilder<'a> {
    translator: &'a dyn Translator,
    analyzer: &'a dyn LanguageAnalyzer,
    config: ExpansionConfig,
}

impl<'a> QueryExpansionBuilder<'a> {
    /// Create a builder borrowing the translation and analysis backends.
    pub fn new(
        translator: &'a dyn Translator,
        analyzer: &'a dyn LanguageAnalyzer,
        config: ExpansionConfig,
    ) -> Self {
        QueryExpansionBuilder {
            translator,
            analyzer,
            config,
        }
    }

    /// Expand every eligible clause of the tree.
    ///
    /// A conjunction root is treated as a multi-part query: each child is an
    /// expansion candidate, and an embedded single-code language filter
    /// restricts the whole query to that language. Any other root is the
    /// sole candidate clause.
    ///
    /// Clauses whose translation fails are left untouched; the request as a
    /// whole still succeeds.
    pub fn expand(&self, root: QueryNode) -> Result<ExpandedQuery> {
        let mut translations = Vec::new();

        let root = match root {
            QueryNode::And(mut children) => {
                let filter_language = embedded_filter_language(&children);
                for i in 0..children.len() {
                    if let Some(expanded) =
                        self.expand_clause(&children[i], filter_language.as_deref(), &mut translations)?
                    {
                        children[i] = expanded;
                    }
                }
                QueryNode::And(children)
            }
            root => match self.expand_clause(&root, None, &mut translations)? {
                Some(expanded) => expanded,
                None => root,
            },
        };

        Ok(ExpandedQuery { root, translations })
    }

    /// Expand one clause, returning its replacement or `None` when the
    /// clause is not eligible or translation failed.
    fn expand_clause(
        &self,
        clause: &QueryNode,
        filter_language: Option<&str>,
        translations: &mut Vec<MultiTranslation>,
    ) -> Result<Option<QueryNode>> {
        let Some((field, text)) = clause_text(clause) else {
            return Ok(None);
        };
        if !self.config.body_fields.iter().any(|f| f == field) {
            return Ok(None);
        }

        let language = self.analyzer.detect(&text);
        trace!(clause = %text, language, "expanding clause");

        let tokens = self.analyzer.tokenize(&text, &language);
        if tokens.is_empty() {
            return Ok(None);
        }

        let mut translation = match self.translator.multi_translate(&tokens, &language) {
            Ok(translation) => translation,
            Err(e) => {
                debug!(error = %e, clause = %text, "translator failed, clause left unexpanded");
                return Ok(None);
            }
        };
        trace!(languages = ?translation.languages, "translator result");

        let mut branches = Vec::new();
        for part in &translation.translations {
            if let Some(restriction) = filter_language
                && restriction != part.language_code
            {
                continue;
            }
            let alternatives = self.stem_alternatives(part);
            if alternatives.is_empty() {
                trace!(language = %part.language_code, "no usable stems, language skipped");
                continue;
            }
            branches.push(QueryNode::And(vec![
                QueryNode::WeakAnd(alternatives),
                QueryNode::language_filter(&part.language_code),
            ]));
        }

        if filter_language.is_none() {
            branches.push(fallback_branch(&translation, &tokens));
        }

        let mut clause_children = vec![QueryNode::Or(branches)];

        if self.config.include_synonyms {
            for group in &translation.synonyms {
                clause_children.push(self.synonym_class(group));
            }
        } else {
            translation.synonyms.clear();
        }
        translations.push(translation);

        Ok(Some(QueryNode::WeakAnd(clause_children)))
    }

    /// One alternative per translated token: a word for a single stem, a
    /// phrase for multi-token stems. Blank stems are dropped.
    fn stem_alternatives(&self, part: &TranslationPart) -> Vec<QueryNode> {
        let mut alternatives = Vec::new();
        for word in &part.content {
            let normalized = self.analyzer.normalize(word);
            if normalized.is_empty() {
                continue;
            }
            let stems = self.analyzer.stem(&normalized, &part.language_code);
            match stems.as_slice() {
                [] => {}
                [stem] if stem.trim().is_empty() => {}
                [stem] => alternatives.push(QueryNode::word(stem)),
                _ => alternatives.push(QueryNode::phrase(stems.iter().cloned())),
            }
        }
        alternatives
    }

    /// Build the equivalence class for one synonym group.
    fn synonym_class(&self, group: &SynonymGroup) -> QueryNode {
        let mut members = Vec::with_capacity(group.terms.len() + 1);
        members.push(self.stemmed_term(&group.main_term, Some(&self.config.reference_language)));
        for term in &group.terms {
            members.push(self.stemmed_term(term, None));
        }
        QueryNode::Equiv(members)
    }

    /// Normalize and stem a synonym term, detecting its language when none
    /// is given. Terms that stem to nothing are kept as raw words.
    fn stemmed_term(&self, term: &str, language: Option<&str>) -> QueryNode {
        let normalized = self.analyzer.normalize(term);
        let stems = if normalized.is_empty() {
            Vec::new()
        } else {
            let language = match language {
                Some(language) => language.to_string(),
                None => {
                    let detected = self.analyzer.detect(&normalized);
                    trace!(term, language = %detected, "synonym language detected");
                    detected
                }
            };
            self.analyzer.stem(&normalized, &language)
        };

        match stems.as_slice() {
            [] => QueryNode::word(term),
            [stem] => QueryNode::word(stem),
            _ => QueryNode::phrase(stems.iter().cloned()),
        }
    }
}

/// The single language code an embedded language filter constrains the
/// query to, if any.
fn embedded_filter_language(children: &[QueryNode]) -> Option<String> {
    children.iter().find_map(|child| match child {
        QueryNode::LanguageFilter(f) if f.field() == LANGUAGE_FIELD => {
            f.language().map(str::to_string)
        }
        _ => None,
    })
}

/// The literal text of an expandable clause and the field it targets.
fn clause_text(clause: &QueryNode) -> Option<(&str, String)> {
    match clause {
        QueryNode::Word(w) => Some((w.field.as_deref().unwrap_or("default"), w.text.clone())),
        QueryNode::Phrase(p) => Some((p.field.as_deref().unwrap_or("default"), p.text())),
        _ => None,
    }
}

/// Fallback branch showing the untranslated terms to documents in any
/// language the translator did not cover.
fn fallback_branch(translation: &MultiTranslation, tokens: &[String]) -> QueryNode {
    let exclusion = LanguageFilterNode::from_codes(translation.languages.iter().cloned());
    QueryNode::And(vec![
        QueryNode::not(QueryNode::LanguageFilter(exclusion)),
        QueryNode::WeakAnd(tokens.iter().map(QueryNode::word).collect()),
    ])
}
