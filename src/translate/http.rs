//! HTTP client for the word-to-word translation service.

use std::time::Duration;

use crate::error::{GlossaError, Result};
use crate::translate::model::{MultiTranslation, Translation, TranslationRequest};
use crate::translate::translator::Translator;

/// Configuration for [`HttpTranslator`].
#[derive(Debug, Clone)]
pub struct HttpTranslatorConfig {
    /// Base URL of the translation service.
    pub base_url: String,
    /// Transport timeout for each request. The expansion core has no retry;
    /// this bound is the only failure deadline.
    pub timeout: Duration,
}

impl Default for HttpTranslatorConfig {
    fn default() -> Self {
        HttpTranslatorConfig {
            base_url: "http://translator:5000".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Blocking JSON-over-HTTP [`Translator`] implementation.
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    config: HttpTranslatorConfig,
    client: reqwest::blocking::Client,
}

impl HttpTranslator {
    /// Create a translator client from the given configuration.
    pub fn new(config: HttpTranslatorConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GlossaError::translation(e.to_string()))?;
        Ok(HttpTranslator { config, client })
    }

    /// Translate tokens into one target language.
    pub fn translate(
        &self,
        tokens: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>> {
        let request = TranslationRequest {
            content: tokens.to_vec(),
            source_language: source_language.to_string(),
            target_language: Some(target_language.to_string()),
        };
        let translation: Translation = self.post("translate", &request)?;
        Ok(translation.translation)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        request: &TranslationRequest,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(request)
            .send()
            .map_err(|e| GlossaError::translation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GlossaError::translation(format!(
                "translation service returned {status}"
            )));
        }
        response
            .json()
            .map_err(|e| GlossaError::translation(e.to_string()))
    }
}

impl Translator for HttpTranslator {
    fn multi_translate(
        &self,
        tokens: &[String],
        source_language: &str,
    ) -> Result<MultiTranslation> {
        let request = TranslationRequest {
            content: tokens.to_vec(),
            source_language: source_language.to_string(),
            target_language: None,
        };
        self.post("multilang-translate", &request)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: String) -> HttpTranslatorConfig {
        HttpTranslatorConfig {
            base_url,
            timeout: Duration::from_secs(2),
        }
    }

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[tokio::test]
    async fn test_multi_translate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/multilang-translate"))
            .and(body_json(json!({
                "content": ["running", "shoes"],
                "sourceLanguage": "en"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sourceLanguage": "en",
                "languages": ["fr", "es"],
                "translations": [
                    {"languageCode": "fr", "content": ["course", "chaussures"]},
                    {"languageCode": "es", "content": ["carrera", "zapatillas"]}
                ],
                "synonyms": []
            })))
            .mount(&server)
            .await;

        let uri = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            let translator = HttpTranslator::new(config(uri))?;
            translator.multi_translate(&tokens(&["running", "shoes"]), "en")
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(result.languages, vec!["fr", "es"]);
        assert_eq!(result.translations[0].language_code, "fr");
    }

    #[tokio::test]
    async fn test_translate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_json(json!({
                "content": ["tree"],
                "sourceLanguage": "en",
                "targetLanguage": "de"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"translation": ["Baum"]})),
            )
            .mount(&server)
            .await;

        let uri = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            let translator = HttpTranslator::new(config(uri))?;
            translator.translate(&tokens(&["tree"]), "en", "de")
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(result, vec!["Baum"]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_translation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/multilang-translate"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let uri = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            let translator = HttpTranslator::new(config(uri))?;
            translator.multi_translate(&tokens(&["running"]), "en")
        })
        .await
        .unwrap();

        match result {
            Err(GlossaError::Translation(msg)) => assert!(msg.contains("400")),
            other => panic!("expected translation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_translation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/multilang-translate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let uri = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            let translator = HttpTranslator::new(config(uri))?;
            translator.multi_translate(&tokens(&["running"]), "en")
        })
        .await
        .unwrap();

        assert!(matches!(result, Err(GlossaError::Translation(_))));
    }
}
