use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".budget_forecast";
const HOME_ENV: &str = "BUDGET_FORECAST_HOME";
const CONFIG_FILE: &str = "config.json";
const STORE_FILE: &str = "budget.json";

/// Returns the application data directory, defaulting to `~/.budget_forecast`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Default location of the JSON document store inside `base`.
pub fn store_file_in(base: &std::path::Path) -> PathBuf {
    base.join(STORE_FILE)
}
