//! Core translator trait definition.

use crate::error::Result;
use crate::translate::model::MultiTranslation;

/// Trait for services that translate tokenized query text.
///
/// One call per expandable clause, blocking. Every failure mode (transport,
/// deserialization, non-success status) surfaces as
/// [`GlossaError::Translation`](crate::error::GlossaError::Translation), and
/// the caller recovers by leaving the clause unexpanded.
pub trait Translator: Send + Sync {
    /// Translate the tokens from the source language into all languages the
    /// service supports.
    fn multi_translate(&self, tokens: &[String], source_language: &str)
    -> Result<MultiTranslation>;

    /// Get the name of this translator (for debugging and configuration).
    fn name(&self) -> &'static str;
}
