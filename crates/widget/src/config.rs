use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::tone::Tone;

/// Id of the optional `<script type="application/toml">` element the host
/// page can use to override defaults.
pub const CONFIG_ELEMENT_ID: &str = "sentsay-config";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub results: ResultsConfig,
    #[serde(default)]
    pub tones: ToneConfig,
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    pub elements: ElementIds,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Absolute origin the endpoint is resolved against. The page origin
    /// when omitted.
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ResultsConfig {
    /// Upper bound on rendered result blocks per response.
    #[serde(default = "default_max_options")]
    pub max_options: usize,
    /// How long the copy confirmation replaces a block's content.
    #[serde(default = "default_copy_feedback_ms")]
    pub copy_feedback_ms: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ToneConfig {
    #[serde(default = "default_tone")]
    pub default: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LabelConfig {
    #[serde(default = "default_submit_idle")]
    pub submit_idle: String,
    #[serde(default = "default_submit_busy")]
    pub submit_busy: String,
    #[serde(default = "default_option_heading")]
    pub option_heading: String,
    #[serde(default = "default_copy_hint")]
    pub copy_hint: String,
    #[serde(default = "default_copied")]
    pub copied: String,
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
    #[serde(default = "default_empty_custom_situation")]
    pub empty_custom_situation: String,
    #[serde(default = "default_request_failed")]
    pub request_failed: String,
    #[serde(default = "default_copy_failed")]
    pub copy_failed: String,
}

/// Stable ids of the host page elements the widget drives.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ElementIds {
    #[serde(default = "default_tones_id")]
    pub tones: String,
    #[serde(default = "default_message_id")]
    pub message: String,
    #[serde(default = "default_situation_id")]
    pub situation: String,
    #[serde(default = "default_custom_container_id")]
    pub custom_situation_container: String,
    #[serde(default = "default_custom_input_id")]
    pub custom_situation: String,
    #[serde(default = "default_results_id")]
    pub results: String,
    #[serde(default = "default_error_id")]
    pub error: String,
    #[serde(default = "default_generate_id")]
    pub generate: String,
    /// Situation selector value that switches to free-text mode.
    #[serde(default = "default_custom_sentinel")]
    pub custom_sentinel: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_endpoint() -> String { "/api/generate".into() }
fn default_max_options() -> usize { 3 }
fn default_copy_feedback_ms() -> u64 { 1500 }
fn default_tone() -> String { Tone::default().key().into() }

fn default_submit_idle() -> String { "Get Response".into() }
fn default_submit_busy() -> String { "Generating...".into() }
fn default_option_heading() -> String { "Option".into() }
fn default_copy_hint() -> String { "Click to copy".into() }
fn default_copied() -> String { "✓ Copied to clipboard!".into() }
fn default_empty_message() -> String {
    "Please enter a message to generate a response for.".into()
}
fn default_empty_custom_situation() -> String { "Please describe your custom situation.".into() }
fn default_request_failed() -> String { "Request failed".into() }
fn default_copy_failed() -> String {
    "Failed to copy to clipboard. Please copy manually.".into()
}

fn default_tones_id() -> String { "tones".into() }
fn default_message_id() -> String { "message".into() }
fn default_situation_id() -> String { "situation".into() }
fn default_custom_container_id() -> String { "customSituationContainer".into() }
fn default_custom_input_id() -> String { "customSituation".into() }
fn default_results_id() -> String { "results".into() }
fn default_error_id() -> String { "error".into() }
fn default_generate_id() -> String { "generate".into() }
fn default_custom_sentinel() -> String { "custom".into() }

fn default_log_level() -> String { "info".into() }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            base_url: None,
        }
    }
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            max_options: default_max_options(),
            copy_feedback_ms: default_copy_feedback_ms(),
        }
    }
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self { default: default_tone() }
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            submit_idle: default_submit_idle(),
            submit_busy: default_submit_busy(),
            option_heading: default_option_heading(),
            copy_hint: default_copy_hint(),
            copied: default_copied(),
            empty_message: default_empty_message(),
            empty_custom_situation: default_empty_custom_situation(),
            request_failed: default_request_failed(),
            copy_failed: default_copy_failed(),
        }
    }
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            tones: default_tones_id(),
            message: default_message_id(),
            situation: default_situation_id(),
            custom_situation_container: default_custom_container_id(),
            custom_situation: default_custom_input_id(),
            results: default_results_id(),
            error: default_error_id(),
            generate: default_generate_id(),
            custom_sentinel: default_custom_sentinel(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

impl ResultsConfig {
    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

impl ToneConfig {
    /// Configured starting tone. Unknown keys fall back to the catalog
    /// default so the selection always names a catalog entry.
    pub fn initial(&self) -> Tone {
        match Tone::from_key(&self.default) {
            Some(tone) => tone,
            None => {
                warn!(tone = %self.default, "unknown default tone, using {}", Tone::default());
                Tone::default()
            }
        }
    }
}

impl Config {
    /// Parse TOML text, falling back to defaults when it is absent or
    /// malformed.
    pub fn load(source: Option<&str>) -> Config {
        let Some(contents) = source.filter(|s| !s.trim().is_empty()) else {
            return Config::default();
        };
        match toml::from_str(contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to parse widget config: {e}");
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_yields_defaults() {
        let config = Config::load(None);
        assert_eq!(config, Config::default());
        assert_eq!(config.api.endpoint, "/api/generate");
        assert_eq!(config.results.max_options, 3);
        assert_eq!(config.results.copy_feedback(), Duration::from_millis(1500));
        assert_eq!(config.elements.custom_sentinel, "custom");
        assert_eq!(config.tones.initial(), Tone::Flirty);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = Config::load(Some(
            r#"
            [results]
            max_options = 5

            [tones]
            default = "professional"

            [elements]
            results = "answers"
            "#,
        ));
        assert_eq!(config.results.max_options, 5);
        assert_eq!(config.results.copy_feedback_ms, 1500);
        assert_eq!(config.tones.initial(), Tone::Professional);
        assert_eq!(config.elements.results, "answers");
        assert_eq!(config.elements.error, "error");
        assert_eq!(config.labels.submit_idle, "Get Response");
    }

    #[test]
    fn malformed_source_falls_back_to_defaults() {
        let config = Config::load(Some("[results\nmax_options = "));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unknown_default_tone_falls_back_to_catalog_default() {
        let config = Config::load(Some("[tones]\ndefault = \"Sarcastic\"\n"));
        assert_eq!(config.tones.initial(), Tone::Flirty);
    }
}
