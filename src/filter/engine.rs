//! Stem filter engine implementation.

use tracing::{debug, trace};

use crate::filter::stem_filter::StemFilter;
use crate::query::{LANGUAGE_FIELD, LanguageFilterNode, QueryNode};

/// Removes previously injected stems from an expanded query tree.
///
/// Pure tree surgery: the engine never consults the translator, and any
/// root or branch shape it does not recognize is left untouched rather
/// than treated as an error.
#[derive(Debug, Clone, Default)]
pub struct StemFilterEngine;

impl StemFilterEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        StemFilterEngine
    }

    /// Apply the filter rules to the tree.
    ///
    /// With no rules the tree is returned unchanged. A language-constrained
    /// conjunction root (an `And` whose first child is a `WeakAnd`) is
    /// filtered in place with the rule matching its language, or returned
    /// unchanged when no rule matches. A bare `WeakAnd` root is split into
    /// one filtered branch per rule plus the original guarded by an
    /// exclusion of every filtered language. Any other root shape is
    /// returned unchanged.
    pub fn filter(&self, root: QueryNode, filters: &[StemFilter]) -> QueryNode {
        if filters.is_empty() {
            return root;
        }

        let constrained_conjunction = matches!(
            &root,
            QueryNode::And(children) if matches!(children.first(), Some(QueryNode::WeakAnd(_)))
        );

        if constrained_conjunction {
            match root.constrained_language().map(str::to_string) {
                Some(language) => {
                    if let Some(filter) = filters.iter().find(|f| f.language == language) {
                        let mut root = root;
                        filter_stems(&mut root, filter);
                        trace!(language, "stem filtering done in place");
                        root
                    } else {
                        // Query is constrained to a language no rule covers.
                        root
                    }
                }
                None => self.split_by_language(root, filters),
            }
        } else if matches!(root, QueryNode::WeakAnd(_)) {
            self.split_by_language(root, filters)
        } else {
            debug!("unsupported tree shape, stem filtering skipped");
            root
        }
    }

    /// Build one filtered clone per rule, routed to that rule's language,
    /// and keep the original behind an exclusion of all filtered languages.
    fn split_by_language(&self, root: QueryNode, filters: &[StemFilter]) -> QueryNode {
        let exclusion =
            LanguageFilterNode::from_codes(filters.iter().map(|f| f.language.clone()));

        let mut branches = Vec::with_capacity(filters.len() + 1);
        for filter in filters {
            let mut clone = root.clone();
            filter_stems(&mut clone, filter);
            trace!(filter = %filter, "filtered language branch built");
            branches.push(QueryNode::And(vec![
                clone,
                QueryNode::language_filter(&filter.language),
            ]));
        }
        branches.insert(
            0,
            QueryNode::And(vec![
                root,
                QueryNode::not(QueryNode::LanguageFilter(exclusion)),
            ]),
        );
        QueryNode::Or(branches)
    }
}

/// Recursively prune the filter's stems from the children of a composite
/// node, left to right, adjusting the index on every removal.
fn filter_stems(node: &mut QueryNode, filter: &StemFilter) {
    if let QueryNode::Phrase(phrase) = node {
        phrase.words.retain(|w| !filter.matches(&w.text));
        return;
    }
    if let QueryNode::Not(inner) = node {
        filter_stems(inner, filter);
        return;
    }
    let Some(children) = node.children_mut() else {
        return;
    };

    let mut i = 0;
    while i < children.len() {
        if let QueryNode::Word(word) = &children[i] {
            if filter.matches(&word.text) {
                children.remove(i);
            } else {
                i += 1;
            }
            continue;
        }

        if let QueryNode::Phrase(phrase) = &mut children[i] {
            phrase.words.retain(|w| !filter.matches(&w.text));
            if phrase.words.is_empty() {
                children.remove(i);
            } else {
                i += 1;
            }
            continue;
        }

        if matches!(children[i], QueryNode::Equiv(_)) {
            let mut filtered = children[i].clone();
            filter_stems(&mut filtered, filter);
            // A class the filter does not actually touch stays as it is;
            // splitting it would double the subtree for nothing.
            if filtered != children[i] {
                let placeholder = QueryNode::Or(Vec::new());
                let original = std::mem::replace(&mut children[i], placeholder);
                children[i] = split_equiv(original, filtered, &filter.language);
            }
            i += 1;
            continue;
        }

        if matches!(children[i], QueryNode::And(_)) {
            i += filter_and_child(children, i, filter);
            continue;
        }

        // Or, WeakAnd, Rank, Not, LanguageFilter.
        filter_stems(&mut children[i], filter);
        if children[i].children().is_some_and(|c| c.is_empty()) {
            children.remove(i);
        } else {
            i += 1;
        }
    }
}

/// Handle an `And` child of the node being filtered. Returns how far the
/// parent's index advances (0 when the child was removed).
fn filter_and_child(children: &mut Vec<QueryNode>, i: usize, filter: &StemFilter) -> usize {
    let language = children[i].constrained_language().map(str::to_string);
    match language.as_deref() {
        Some(language) if language == filter.language => {
            filter_stems(&mut children[i], filter);
            if positive_content_gone(&children[i]) {
                children.remove(i);
                0
            } else {
                1
            }
        }
        // Branch routed to a different language: not ours to touch.
        Some(_) => 1,
        None => match extend_exclusion_branch(&mut children[i], filter) {
            Some(new_branch) => {
                children.insert(i + 1, new_branch);
                2
            }
            None => 1,
        },
    }
}

/// After pruning, a language branch whose positive content vanished is
/// reduced to its bare language filter and must be dropped entirely.
fn positive_content_gone(node: &QueryNode) -> bool {
    match node.children() {
        Some([only]) => only.is_language_filter(),
        _ => false,
    }
}

/// For an `And(Not(LanguageFilter), Equiv)` fallback produced by an earlier
/// [`split_equiv`]: add the filter's language to the exclusion (bounded by
/// the pattern cap) and build the matching filtered branch to insert beside
/// it. `None` when the shape does not match or the exclusion cannot grow.
fn extend_exclusion_branch(node: &mut QueryNode, filter: &StemFilter) -> Option<QueryNode> {
    let QueryNode::And(children) = node else {
        return None;
    };
    let equiv_index = children
        .iter()
        .position(|c| matches!(c, QueryNode::Equiv(_)))?;
    let exclusion = children.iter_mut().find_map(|child| match child {
        QueryNode::Not(inner) => match inner.as_mut() {
            QueryNode::LanguageFilter(f) if f.field() == LANGUAGE_FIELD => Some(f),
            _ => None,
        },
        _ => None,
    })?;

    if !exclusion.extend(&filter.language) {
        trace!(language = %filter.language, "exclusion at capacity, branch not added");
        return None;
    }

    let mut filtered = children[equiv_index].clone();
    filter_stems(&mut filtered, filter);
    Some(QueryNode::And(vec![
        filtered,
        QueryNode::language_filter(&filter.language),
    ]))
}

/// Split an equivalence class the filter actually touched: documents routed
/// to the filtered language see the pruned class, everything else sees the
/// original.
fn split_equiv(original: QueryNode, filtered: QueryNode, language: &str) -> QueryNode {
    QueryNode::Or(vec![
        QueryNode::And(vec![
            QueryNode::not(QueryNode::language_filter(language)),
            original,
        ]),
        QueryNode::And(vec![filtered, QueryNode::language_filter(language)]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::MAX_PATTERN_LANGUAGES;

    fn fr_branch() -> QueryNode {
        QueryNode::And(vec![
            QueryNode::WeakAnd(vec![QueryNode::word("chaussur"), QueryNode::word("cours")]),
            QueryNode::language_filter("fr"),
        ])
    }

    fn es_branch() -> QueryNode {
        QueryNode::And(vec![
            QueryNode::WeakAnd(vec![
                QueryNode::word("zapatillas"),
                QueryNode::word("carrera"),
            ]),
            QueryNode::language_filter("es"),
        ])
    }

    /// The shape expansion produces for an unconstrained two-language query.
    fn expanded_tree() -> QueryNode {
        QueryNode::WeakAnd(vec![QueryNode::Or(vec![
            fr_branch(),
            es_branch(),
            QueryNode::And(vec![
                QueryNode::not(QueryNode::LanguageFilter(
                    LanguageFilterNode::from_codes(["fr", "es"]),
                )),
                QueryNode::WeakAnd(vec![QueryNode::word("running"), QueryNode::word("shoes")]),
            ]),
        ])])
    }

    #[test]
    fn test_empty_filters_leave_tree_unchanged() {
        let engine = StemFilterEngine::new();
        let tree = expanded_tree();

        assert_eq!(engine.filter(tree.clone(), &[]), tree);
    }

    #[test]
    fn test_unsupported_root_shape_is_untouched() {
        let engine = StemFilterEngine::new();
        let filters = [StemFilter::new("fr", ["chaussur"])];

        let tree = QueryNode::Or(vec![QueryNode::word("chaussur")]);
        assert_eq!(engine.filter(tree.clone(), &filters), tree);

        // Conjunction whose first child is not a weak-and.
        let tree = QueryNode::And(vec![QueryNode::word("chaussur")]);
        assert_eq!(engine.filter(tree.clone(), &filters), tree);
    }

    #[test]
    fn test_unconstrained_root_is_split_by_language() {
        let engine = StemFilterEngine::new();
        let filters = [StemFilter::new("fr", ["chaussur"])];

        let filtered = engine.filter(expanded_tree(), &filters);

        let QueryNode::Or(branches) = &filtered else {
            panic!("expected or root, got {}", filtered.description());
        };
        assert_eq!(branches.len(), 2);

        // Base branch: original tree guarded by the language exclusion.
        assert_eq!(
            branches[0],
            QueryNode::And(vec![
                expanded_tree(),
                QueryNode::not(QueryNode::language_filter("fr")),
            ])
        );

        // Filtered branch: stem removed from the fr weak-and only.
        let expected_fr = QueryNode::And(vec![
            QueryNode::WeakAnd(vec![QueryNode::word("cours")]),
            QueryNode::language_filter("fr"),
        ]);
        let expected = QueryNode::And(vec![
            QueryNode::WeakAnd(vec![QueryNode::Or(vec![
                expected_fr,
                es_branch(),
                QueryNode::And(vec![
                    QueryNode::not(QueryNode::LanguageFilter(
                        LanguageFilterNode::from_codes(["fr", "es"]),
                    )),
                    QueryNode::WeakAnd(vec![
                        QueryNode::word("running"),
                        QueryNode::word("shoes"),
                    ]),
                ]),
            ])]),
            QueryNode::language_filter("fr"),
        ]);
        assert_eq!(branches[1], expected);
    }

    #[test]
    fn test_constrained_root_is_filtered_in_place() {
        let engine = StemFilterEngine::new();
        let filters = [StemFilter::new("fr", ["chaussur"])];

        let root = QueryNode::And(vec![
            QueryNode::WeakAnd(vec![QueryNode::Or(vec![fr_branch()])]),
            QueryNode::language_filter("fr"),
        ]);
        let filtered = engine.filter(root, &filters);

        assert_eq!(
            filtered.description(),
            "AND(WAND(OR(AND(WAND(cours) language~fr))) language~fr)"
        );
    }

    #[test]
    fn test_constrained_root_without_matching_rule_is_untouched() {
        let engine = StemFilterEngine::new();
        let filters = [StemFilter::new("de", ["lauf"])];

        let root = QueryNode::And(vec![
            QueryNode::WeakAnd(vec![QueryNode::Or(vec![fr_branch()])]),
            QueryNode::language_filter("fr"),
        ]);

        assert_eq!(engine.filter(root.clone(), &filters), root);
    }

    #[test]
    fn test_branch_reduced_to_language_filter_is_dropped() {
        let engine = StemFilterEngine::new();
        let filters = [StemFilter::new("fr", ["chaussur", "cours"])];

        let root = QueryNode::And(vec![
            QueryNode::WeakAnd(vec![QueryNode::Or(vec![fr_branch(), es_branch()])]),
            QueryNode::language_filter("fr"),
        ]);
        let filtered = engine.filter(root, &filters);

        // Every fr alternative was pruned, so the whole fr branch is gone.
        assert_eq!(
            filtered.description(),
            "AND(WAND(OR(AND(WAND(zapatillas carrera) language~es))) language~fr)"
        );
    }

    #[test]
    fn test_untouched_equiv_is_not_wrapped() {
        let engine = StemFilterEngine::new();
        let filters = [StemFilter::new("fr", ["chaussur"])];

        let equiv = QueryNode::Equiv(vec![QueryNode::word("shoe"), QueryNode::word("sneaker")]);
        let root = QueryNode::And(vec![
            QueryNode::WeakAnd(vec![QueryNode::Or(vec![fr_branch()]), equiv.clone()]),
            QueryNode::language_filter("fr"),
        ]);
        let filtered = engine.filter(root, &filters);

        let QueryNode::And(children) = &filtered else {
            panic!("expected and root");
        };
        let QueryNode::WeakAnd(children) = &children[0] else {
            panic!("expected weak-and");
        };
        // The synonym class contains no filtered stem: same structure, no
        // or-wrapper.
        assert_eq!(children[1], equiv);
    }

    #[test]
    fn test_touched_equiv_is_split_per_language() {
        let engine = StemFilterEngine::new();
        let filters = [StemFilter::new("fr", ["chaussur"])];

        let root = QueryNode::And(vec![
            QueryNode::WeakAnd(vec![
                QueryNode::Or(vec![fr_branch()]),
                QueryNode::Equiv(vec![QueryNode::word("chaussur"), QueryNode::word("basket")]),
            ]),
            QueryNode::language_filter("fr"),
        ]);
        let filtered = engine.filter(root, &filters);

        let QueryNode::And(children) = &filtered else {
            panic!("expected and root");
        };
        let QueryNode::WeakAnd(children) = &children[0] else {
            panic!("expected weak-and");
        };
        assert_eq!(
            children[1],
            QueryNode::Or(vec![
                QueryNode::And(vec![
                    QueryNode::not(QueryNode::language_filter("fr")),
                    QueryNode::Equiv(vec![
                        QueryNode::word("chaussur"),
                        QueryNode::word("basket"),
                    ]),
                ]),
                QueryNode::And(vec![
                    QueryNode::Equiv(vec![QueryNode::word("basket")]),
                    QueryNode::language_filter("fr"),
                ]),
            ])
        );
    }

    #[test]
    fn test_exclusion_fallback_is_extended_for_new_language() {
        let filter = StemFilter::new("es", ["zapatilla"]);

        // The two-branch structure a previous split left behind, guarded
        // against fr.
        let mut parent = QueryNode::Or(vec![
            QueryNode::And(vec![
                QueryNode::not(QueryNode::language_filter("fr")),
                QueryNode::Equiv(vec![
                    QueryNode::word("zapatilla"),
                    QueryNode::word("sneaker"),
                ]),
            ]),
            QueryNode::And(vec![
                QueryNode::Equiv(vec![QueryNode::word("sneaker")]),
                QueryNode::language_filter("fr"),
            ]),
        ]);
        filter_stems(&mut parent, &filter);

        let QueryNode::Or(branches) = &parent else {
            panic!("expected or");
        };
        assert_eq!(branches.len(), 3);

        // The exclusion now also covers es.
        let QueryNode::And(guard) = &branches[0] else {
            panic!("expected and");
        };
        let QueryNode::Not(inner) = &guard[0] else {
            panic!("expected not");
        };
        let QueryNode::LanguageFilter(exclusion) = inner.as_ref() else {
            panic!("expected language filter");
        };
        assert_eq!(exclusion.codes(), &["fr", "es"]);

        // A filtered branch for es was inserted right after the fallback.
        assert_eq!(
            branches[1],
            QueryNode::And(vec![
                QueryNode::Equiv(vec![QueryNode::word("sneaker")]),
                QueryNode::language_filter("es"),
            ])
        );
    }

    #[test]
    fn test_exclusion_extension_respects_language_cap() {
        let filter = StemFilter::new("xx", ["stem"]);

        let codes: Vec<String> = (0..MAX_PATTERN_LANGUAGES).map(|i| format!("l{i}")).collect();
        let mut parent = QueryNode::Or(vec![QueryNode::And(vec![
            QueryNode::not(QueryNode::LanguageFilter(LanguageFilterNode::from_codes(
                codes.clone(),
            ))),
            QueryNode::Equiv(vec![QueryNode::word("stem"), QueryNode::word("other")]),
        ])]);
        let before = parent.clone();
        filter_stems(&mut parent, &filter);

        // At capacity: the exclusion gains no code and no branch is added.
        assert_eq!(parent, before);
    }

    #[test]
    fn test_rank_signals_are_pruned_like_any_composite() {
        let filter = StemFilter::new("fr", ["chaussur"]);

        let mut node = QueryNode::WeakAnd(vec![QueryNode::Rank(vec![
            QueryNode::word("cours"),
            QueryNode::word("chaussur"),
        ])]);
        filter_stems(&mut node, &filter);

        assert_eq!(
            node,
            QueryNode::WeakAnd(vec![QueryNode::Rank(vec![QueryNode::word("cours")])])
        );
    }

    #[test]
    fn test_stems_are_pruned_inside_phrases() {
        let filter = StemFilter::new("fr", ["chaussur"]);

        let mut node = QueryNode::WeakAnd(vec![
            QueryNode::phrase(["chaussur", "de", "cours"]),
            QueryNode::word("autre"),
        ]);
        filter_stems(&mut node, &filter);

        assert_eq!(
            node,
            QueryNode::WeakAnd(vec![
                QueryNode::phrase(["de", "cours"]),
                QueryNode::word("autre"),
            ])
        );
    }

    #[test]
    fn test_emptied_phrase_is_removed() {
        let filter = StemFilter::new("fr", ["chaussur", "cours"]);

        let mut node = QueryNode::WeakAnd(vec![
            QueryNode::phrase(["chaussur", "cours"]),
            QueryNode::word("autre"),
        ]);
        filter_stems(&mut node, &filter);

        assert_eq!(node, QueryNode::WeakAnd(vec![QueryNode::word("autre")]));
    }

    #[test]
    fn test_multiple_filters_build_one_branch_each() {
        let engine = StemFilterEngine::new();
        let filters = [
            StemFilter::new("fr", ["chaussur"]),
            StemFilter::new("es", ["zapatillas"]),
        ];

        let filtered = engine.filter(expanded_tree(), &filters);

        let QueryNode::Or(branches) = &filtered else {
            panic!("expected or root");
        };
        assert_eq!(branches.len(), 3);

        // The base guard excludes both filtered languages.
        let QueryNode::And(base) = &branches[0] else {
            panic!("expected and");
        };
        let QueryNode::Not(inner) = &base[1] else {
            panic!("expected not");
        };
        let QueryNode::LanguageFilter(exclusion) = inner.as_ref() else {
            panic!("expected language filter");
        };
        assert_eq!(exclusion.pattern(), "(fr|es)");
    }
}
