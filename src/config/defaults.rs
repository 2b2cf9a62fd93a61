use super::constants::*;

pub(crate) fn greeting() -> String {
    GREETING.to_string()
}

pub(crate) fn endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

pub(crate) fn log_level() -> Option<String> {
    Some("info".to_string())
}

pub(crate) fn log_file_path() -> String {
    LOG_FILE_PATH.to_string()
}

pub(crate) fn notice_display_ms() -> u64 {
    NOTICE_DISPLAY_MS
}

pub(crate) fn reload_delay_ms() -> u64 {
    RELOAD_DELAY_MS
}

pub(crate) fn default_true() -> bool {
    true
}
