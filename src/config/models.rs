use serde::Deserialize;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct AppConfig {
    /// Locale used for pictogram search.
    #[serde(default = "crate::config::defaults::default_locale")]
    pub locale: String,
    /// Language prefix used to pick the default narration voice.
    #[serde(default = "crate::config::defaults::default_voice_language")]
    pub voice_language: String,
    #[serde(default = "crate::config::defaults::default_rate")]
    pub rate: f32,
    #[serde(default = "crate::config::defaults::default_pitch")]
    pub pitch: f32,
    #[serde(default = "crate::config::defaults::default_volume")]
    pub volume: f32,
    #[serde(default = "crate::config::defaults::default_lookup_concurrency")]
    pub lookup_concurrency: usize,
    /// Only the first N unique words are looked up; unset means no cap.
    #[serde(default = "crate::config::defaults::default_lookup_word_cap")]
    pub lookup_word_cap: Option<usize>,
    #[serde(default = "crate::config::defaults::default_lookup_timeout_secs")]
    pub lookup_timeout_secs: u64,
    #[serde(default = "crate::config::defaults::default_arasaac_base_url")]
    pub arasaac_base_url: String,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            locale: crate::config::defaults::default_locale(),
            voice_language: crate::config::defaults::default_voice_language(),
            rate: crate::config::defaults::default_rate(),
            pitch: crate::config::defaults::default_pitch(),
            volume: crate::config::defaults::default_volume(),
            lookup_concurrency: crate::config::defaults::default_lookup_concurrency(),
            lookup_word_cap: crate::config::defaults::default_lookup_word_cap(),
            lookup_timeout_secs: crate::config::defaults::default_lookup_timeout_secs(),
            arasaac_base_url: crate::config::defaults::default_arasaac_base_url(),
            log_level: crate::config::defaults::default_log_level(),
        }
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
