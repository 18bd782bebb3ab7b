//! Translation service interface, data transfer objects, and HTTP glue.
//!
//! The expansion engine only depends on the [`Translator`] trait;
//! [`HttpTranslator`] implements it against a word-to-word translation
//! service speaking JSON over HTTP.

pub mod http;
pub mod model;
pub mod translator;

pub use self::http::{HttpTranslator, HttpTranslatorConfig};
pub use self::model::{
    MultiTranslation, SynonymGroup, Translation, TranslationPart, TranslationRequest,
};
pub use self::translator::Translator;
