//! Utility functions

use crate::constants::APP_NAME;
use std::path::PathBuf;

/// Get the app data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Text for a closed picker: the chosen value, or the placeholder while unset
pub fn selected_label<'a>(value: &'a str, unset: bool, placeholder: &'a str) -> &'a str {
    if unset || value.is_empty() {
        placeholder
    } else {
        value
    }
}
