//! Application constants and configuration

pub const APP_NAME: &str = "Ecoleta Picker";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// IBGE locality service (states and municipalities)
pub const IBGE_BASE_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";

/// Default per-request timeout for catalog reads
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Reserved "nothing selected" value for both pickers
pub const UNSET: &str = "0";

pub const LOG_FILE_NAME: &str = "ecoleta-picker.log";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
