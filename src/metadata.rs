//! Request-scoped query metadata.
//!
//! Expansion records the raw translator responses so a downstream result
//! renderer can embed them in its output. This module holds the property
//! keys and the serialization; the renderer itself is not part of this
//! crate and only needs a "write raw JSON under this key" capability.

use serde_json::Value;

use crate::error::Result;
use crate::translate::MultiTranslation;

/// Top-level key the renderer groups all query metadata under.
pub const QUERY_METADATA: &str = "query-metadata";

/// Key for the captured translation metadata.
pub const TRANSLATIONS: &str = "translations";

/// All metadata keys a renderer should look up.
pub const METADATA_KEYS: &[&str] = &[TRANSLATIONS];

/// Serialize the captured translator responses as the value stored under
/// [`TRANSLATIONS`].
pub fn render_translations(translations: &[MultiTranslation]) -> Result<String> {
    Ok(serde_json::to_string(translations)?)
}

/// Assemble the full metadata object a renderer embeds below its root.
pub fn render_query_metadata(translations: &[MultiTranslation]) -> Result<Value> {
    Ok(serde_json::json!({ TRANSLATIONS: translations }))
}
