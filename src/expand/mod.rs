//! Query expansion engine.
//!
//! Rewrites eligible query clauses as ranked boolean expressions combining
//! the original terms with stemmed translations and synonym equivalence
//! classes, grouped per language.

pub mod builder;

pub use self::builder::{ExpandedQuery, ExpansionConfig, QueryExpansionBuilder};
