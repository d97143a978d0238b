//! Page behavior configuration.
//!
//! DESIGN
//! ======
//! Every id, selector and duration the engine depends on lives here with a
//! compiled default matching the templates. A page may override any subset
//! through a JSON block; missing fields keep their defaults and a malformed
//! block falls back to the defaults entirely.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::storage::keys;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

const DEFAULT_COOLDOWN_SECS: i64 = 30;
const DEFAULT_COOLDOWN_TICK_MS: u32 = 1_000;
const DEFAULT_SCROLL_DEBOUNCE_MS: u32 = 100;
const DEFAULT_SUBMIT_DELAY_MS: u32 = 50;
const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

/// Id of the `<script type="application/json">` block holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "course-ui-config";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiConfig {
    // Cooldown throttle.
    pub cooldown_secs: i64,
    pub cooldown_tick_ms: u32,
    pub cooldown_key: String,
    pub cooldown_button_id: String,
    pub cooldown_message_id: String,

    // Scroll tracking.
    pub scroll_debounce_ms: u32,
    pub scroll_container_selector: String,

    // Accordions and checkbox toggles.
    pub unit_id_prefix: String,
    pub topic_id_prefix: String,
    pub unit_toggle_selector: String,
    pub topic_toggle_selector: String,

    // Editor bridge.
    pub editor_mount_id: String,
    pub editor_form_selector: String,
    pub editor_input_id: String,
    pub submit_delay_ms: u32,
    pub dark_themes: Vec<String>,
    pub light_themes: Vec<String>,

    // Page chrome.
    pub modal_toggle_id: String,
    pub modal_body_id: String,
    pub csrf_input_selector: String,

    /// `error`, `warn`, `info`, `debug` or `trace`; case-insensitive.
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            cooldown_tick_ms: DEFAULT_COOLDOWN_TICK_MS,
            cooldown_key: keys::REFRESH_TIMESTAMP.to_owned(),
            cooldown_button_id: "refresh-dmoj-btn".to_owned(),
            cooldown_message_id: "dmoj-cooldown-msg".to_owned(),
            scroll_debounce_ms: DEFAULT_SCROLL_DEBOUNCE_MS,
            scroll_container_selector: ".overflow-auto".to_owned(),
            unit_id_prefix: "unit-".to_owned(),
            topic_id_prefix: "topic-".to_owned(),
            unit_toggle_selector: ".unit-toggle".to_owned(),
            topic_toggle_selector: ".topic-toggle".to_owned(),
            editor_mount_id: "monaco-editor".to_owned(),
            editor_form_selector: "form[action='/submit-code/']".to_owned(),
            editor_input_id: "code-input".to_owned(),
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            dark_themes: ["dark", "dracula", "night", "synthwave", "halloween", "forest", "black", "luxury", "business", "coffee", "dim", "sunset"]
                .map(str::to_owned)
                .to_vec(),
            light_themes: ["light", "cupcake", "emerald", "corporate", "garden", "lofi", "pastel", "fantasy", "wireframe", "cmyk", "autumn", "lemonade", "winter", "nord"]
                .map(str::to_owned)
                .to_vec(),
            modal_toggle_id: "modal-wrapper".to_owned(),
            modal_body_id: "modal-body".to_owned(),
            csrf_input_selector: "[name=csrfmiddlewaretoken]".to_owned(),
            log_level: DEFAULT_LOG_LEVEL.as_str().to_ascii_lowercase(),
        }
    }
}

impl UiConfig {
    /// Parse overrides from a JSON object, rejecting zero durations.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        // serde would also map a positional array onto the fields.
        if !value.is_object() {
            return Err(ConfigError::NotAnObject);
        }
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Console log level; unknown names keep the default.
    #[must_use]
    pub fn log_level(&self) -> log::Level {
        match self.log_level.parse() {
            Ok(level) => level,
            Err(_) => {
                log::warn!("unknown log level `{}`", self.log_level);
                DEFAULT_LOG_LEVEL
            }
        }
    }

    /// Parse overrides, falling back to defaults on any error.
    #[must_use]
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{err}; using defaults");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cooldown_secs <= 0 {
            return Err(ConfigError::Zero { field: "cooldownSecs" });
        }
        if self.cooldown_tick_ms == 0 {
            return Err(ConfigError::Zero { field: "cooldownTickMs" });
        }
        if self.scroll_debounce_ms == 0 {
            return Err(ConfigError::Zero { field: "scrollDebounceMs" });
        }
        Ok(())
    }
}
