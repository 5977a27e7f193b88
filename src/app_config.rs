use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO 639-1, uppercased for the provider)
    pub source_language: String,

    /// Target language code (ISO 639-1, uppercased for the provider)
    pub target_language: String,

    /// Translation config
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: DeepL batch translation API
    #[default]
    DeepL,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::DeepL => "DeepL",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::DeepL => "deepl".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "deepl" => Ok(Self::DeepL),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Provider selection
    #[serde(default)]
    pub provider: TranslationProvider,

    // @field: API key, usually supplied via TRANSLATE_API_KEY
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Override for the provider base URL (empty = auto)
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Max segments per provider call
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    // @field: Fixed pause between provider calls, in milliseconds
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,

    // @field: Translation cache store location
    #[serde(default = "default_cache_path")]
    pub cache_path: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            api_key: String::new(),
            endpoint: String::new(),
            batch_size: default_batch_size(),
            pause_ms: default_pause_ms(),
            cache_path: default_cache_path(),
        }
    }
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_batch_size() -> usize {
    30
}

fn default_pause_ms() -> u64 {
    600
}

fn default_cache_path() -> String {
    "translate_cache.json".to_string()
}

impl Config {
    /// Apply environment variable overrides.
    ///
    /// Recognized variables: TRANSLATE_PROVIDER, TRANSLATE_API_KEY,
    /// DEEPL_API_BASE, TRANSLATE_SRC, TRANSLATE_TGT.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(provider) = std::env::var("TRANSLATE_PROVIDER") {
            self.translation.provider = provider.parse()?;
        }
        if let Ok(api_key) = std::env::var("TRANSLATE_API_KEY") {
            self.translation.api_key = api_key;
        }
        if let Ok(base) = std::env::var("DEEPL_API_BASE") {
            self.translation.endpoint = base;
        }
        if let Ok(source) = std::env::var("TRANSLATE_SRC") {
            self.source_language = source.to_uppercase();
        }
        if let Ok(target) = std::env::var("TRANSLATE_TGT") {
            self.target_language = target.to_uppercase();
        }
        Ok(())
    }

    /// Validate the configuration, before any network activity.
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        if isolang::Language::from_639_1(&self.source_language.to_lowercase()).is_none() {
            return Err(anyhow!(
                "Invalid source language code: {}",
                self.source_language
            ));
        }
        if isolang::Language::from_639_1(&self.target_language.to_lowercase()).is_none() {
            return Err(anyhow!(
                "Invalid target language code: {}",
                self.target_language
            ));
        }

        if self.translation.batch_size == 0 {
            return Err(anyhow!("batch_size must be at least 1"));
        }

        // Validate API key
        match self.translation.provider {
            TranslationProvider::DeepL => {
                if self.translation.api_key.is_empty() {
                    return Err(anyhow!(
                        "Translation API key is required for the DeepL provider (set TRANSLATE_API_KEY)"
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "EN".to_string(),
            target_language: "FR".to_string(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
