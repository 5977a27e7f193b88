/*!
 * DeepL client for the v2 translate endpoint.
 */

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::providers::Provider;

const PAID_ENDPOINT: &str = "https://api.deepl.com/v2/translate";
const FREE_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";

/// DeepL API client
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Resolved translate endpoint URL
    endpoint: String,
}

/// DeepL translate response
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    /// One entry per submitted text, in submission order
    translations: Vec<Translation>,
}

/// Individual translation in a DeepL response
#[derive(Debug, Deserialize)]
struct Translation {
    /// The translated text
    text: String,
}

impl DeepL {
    /// Create a new DeepL client.
    ///
    /// Endpoint resolution: an explicit `base_url` wins; otherwise keys
    /// with the free-tier `:fx` suffix route to the free endpoint, and
    /// everything else to the paid one.
    pub fn new(api_key: impl Into<String>, base_url: Option<&str>) -> Self {
        let api_key = api_key.into();

        let endpoint = match base_url.map(str::trim) {
            Some(base) if !base.is_empty() => {
                format!("{}/v2/translate", base.trim_end_matches('/'))
            }
            _ if api_key.ends_with(":fx") => FREE_ENDPOINT.to_string(),
            _ => PAID_ENDPOINT.to_string(),
        };

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            api_key,
            endpoint,
        }
    }

    /// The resolved translate endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Provider for DeepL {
    fn name(&self) -> &str {
        "deepl"
    }

    fn translate_batch(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Vec<String>, ProviderError> {
        // DeepL takes one form-encoded `text` field per segment.
        let form: Vec<(&str, &str)> = texts.iter().map(|t| ("text", t.as_str())).collect();

        debug!(
            "POST {} ({} texts, {} -> {})",
            self.endpoint,
            texts.len(),
            source_lang,
            target_lang
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .query(&[
                ("source_lang", source_lang),
                ("target_lang", target_lang),
                ("preserve_formatting", "1"),
            ])
            .form(&form)
            .send()
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: truncate_body(&body, 400),
            });
        }

        let parsed: TranslateResponse = response
            .json()
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(parsed
            .translations
            .into_iter()
            .map(|translation| translation.text)
            .collect())
    }
}

/// Truncate an error body to a maximum number of characters
fn truncate_body(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        body.to_string()
    } else {
        let truncated: String = body.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
