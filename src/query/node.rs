//! Query tree node definitions.

use serde::{Deserialize, Serialize};

use crate::query::language::{LANGUAGE_FIELD, LanguageFilterNode};

/// A leaf match term.
///
/// Terms parsed from the original query carry the indexed field they target;
/// terms injected during expansion carry no field and match the default one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordNode {
    /// The term text.
    pub text: String,
    /// The indexed field this term targets, `None` for the default field.
    pub field: Option<String>,
}

impl WordNode {
    /// Create a word for the default field.
    pub fn new<S: Into<String>>(text: S) -> Self {
        WordNode {
            text: text.into(),
            field: None,
        }
    }

    /// Create a word targeting a specific indexed field.
    pub fn with_field<F: Into<String>, S: Into<String>>(field: F, text: S) -> Self {
        WordNode {
            text: text.into(),
            field: Some(field.into()),
        }
    }
}

/// A positional sequence of words.
///
/// Used when a stem or translation expands to multiple tokens that must
/// match in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseNode {
    /// The words of the phrase, in order.
    pub words: Vec<WordNode>,
    /// The indexed field this phrase targets, `None` for the default field.
    pub field: Option<String>,
}

impl PhraseNode {
    /// Create a phrase for the default field from term texts.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PhraseNode {
            words: terms.into_iter().map(WordNode::new).collect(),
            field: None,
        }
    }

    /// The phrase as a single whitespace-joined string.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A node of the query expression tree.
///
/// The tree is built fresh per request, mutated in place by the expansion
/// and filtering passes, and handed to a downstream retrieval engine. All
/// clones are deep: a cloned subtree never aliases the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryNode {
    /// Leaf match term.
    Word(WordNode),
    /// Positional word sequence.
    Phrase(PhraseNode),
    /// Conjunction.
    And(Vec<QueryNode>),
    /// Disjunction.
    Or(Vec<QueryNode>),
    /// Soft disjunction that ranks by accumulated score. Used for injected
    /// alternative terms so that none is individually mandatory.
    WeakAnd(Vec<QueryNode>),
    /// Equivalence class: children are interchangeable for matching and
    /// contribute identically to ranking.
    Equiv(Vec<QueryNode>),
    /// A filtering/matching clause (first child) combined with additional
    /// ranking-only signals.
    Rank(Vec<QueryNode>),
    /// Negation. Never stands alone: always paired with a positive sibling
    /// in the same conjunction.
    Not(Box<QueryNode>),
    /// Language routing/exclusion predicate.
    LanguageFilter(LanguageFilterNode),
}

impl QueryNode {
    /// Create a word leaf for the default field.
    pub fn word<S: Into<String>>(text: S) -> Self {
        QueryNode::Word(WordNode::new(text))
    }

    /// Create a word leaf targeting a specific field.
    pub fn word_in<F: Into<String>, S: Into<String>>(field: F, text: S) -> Self {
        QueryNode::Word(WordNode::with_field(field, text))
    }

    /// Create a phrase leaf for the default field.
    pub fn phrase<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryNode::Phrase(PhraseNode::new(terms))
    }

    /// Create a negation.
    pub fn not(child: QueryNode) -> Self {
        QueryNode::Not(Box::new(child))
    }

    /// Create a single-language filter leaf.
    pub fn language_filter<S: Into<String>>(code: S) -> Self {
        QueryNode::LanguageFilter(LanguageFilterNode::new(code))
    }

    /// Borrow the children of a composite node.
    ///
    /// Returns `None` for leaves and for `Not`, whose single child is
    /// reachable through pattern matching instead.
    pub fn children(&self) -> Option<&[QueryNode]> {
        match self {
            QueryNode::And(c)
            | QueryNode::Or(c)
            | QueryNode::WeakAnd(c)
            | QueryNode::Equiv(c)
            | QueryNode::Rank(c) => Some(c),
            _ => None,
        }
    }

    /// Mutably borrow the children of a composite node.
    pub fn children_mut(&mut self) -> Option<&mut Vec<QueryNode>> {
        match self {
            QueryNode::And(c)
            | QueryNode::Or(c)
            | QueryNode::WeakAnd(c)
            | QueryNode::Equiv(c)
            | QueryNode::Rank(c) => Some(c),
            _ => None,
        }
    }

    /// Whether this node is a language filter leaf.
    pub fn is_language_filter(&self) -> bool {
        matches!(self, QueryNode::LanguageFilter(_))
    }

    /// The single language code a conjunction is constrained to, if any.
    ///
    /// Looks for a direct [`LanguageFilter`](QueryNode::LanguageFilter)
    /// child on the language field listing exactly one code. A negated
    /// filter (`Not(LanguageFilter)`) is an exclusion, not a constraint,
    /// and is ignored here.
    pub fn constrained_language(&self) -> Option<&str> {
        let QueryNode::And(children) = self else {
            return None;
        };
        children.iter().find_map(|child| match child {
            QueryNode::LanguageFilter(f) if f.field() == LANGUAGE_FIELD => f.language(),
            _ => None,
        })
    }

    /// A compact single-line rendering of the tree, for traces and tests.
    pub fn description(&self) -> String {
        fn join(children: &[QueryNode]) -> String {
            children
                .iter()
                .map(|c| c.description())
                .collect::<Vec<_>>()
                .join(" ")
        }

        match self {
            QueryNode::Word(w) => match &w.field {
                Some(field) => format!("{}:{}", field, w.text),
                None => w.text.clone(),
            },
            QueryNode::Phrase(p) => format!("\"{}\"", p.text()),
            QueryNode::And(c) => format!("AND({})", join(c)),
            QueryNode::Or(c) => format!("OR({})", join(c)),
            QueryNode::WeakAnd(c) => format!("WAND({})", join(c)),
            QueryNode::Equiv(c) => format!("EQUIV({})", join(c)),
            QueryNode::Rank(c) => format!("RANK({})", join(c)),
            QueryNode::Not(child) => format!("NOT({})", child.description()),
            QueryNode::LanguageFilter(f) => format!("{}~{}", f.field(), f.pattern()),
        }
    }
}
