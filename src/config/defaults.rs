pub(crate) fn default_locale() -> String {
    "fr".to_string()
}

pub(crate) fn default_voice_language() -> String {
    "fr".to_string()
}

pub(crate) fn default_rate() -> f32 {
    1.0
}

pub(crate) fn default_pitch() -> f32 {
    1.0
}

pub(crate) fn default_volume() -> f32 {
    1.0
}

pub(crate) fn default_lookup_concurrency() -> usize {
    5
}

pub(crate) fn default_lookup_word_cap() -> Option<usize> {
    Some(10)
}

pub(crate) fn default_lookup_timeout_secs() -> u64 {
    10
}

pub(crate) fn default_arasaac_base_url() -> String {
    "https://api.arasaac.org/api".to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}
