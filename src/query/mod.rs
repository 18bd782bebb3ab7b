//! Query tree model shared by the expansion and filtering engines.
//!
//! The tree is a closed tagged-variant type ([`QueryNode`]) with exhaustive
//! pattern matching per node kind. Mutation is performed by producing new
//! child lists and replacing them in the parent, so a clone of a subtree
//! never aliases the original.

pub mod language;
pub mod node;

pub use self::language::{LANGUAGE_FIELD, LanguageFilterNode, MAX_PATTERN_LANGUAGES};
pub use self::node::{PhraseNode, QueryNode, WordNode};
