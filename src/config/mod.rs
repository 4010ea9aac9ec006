use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    domain::{Period, DEFAULT_TARGET_BUFFER},
    errors::{BudgetError, Result},
    utils::paths,
};

const TMP_SUFFIX: &str = "tmp";

/// User preferences for the CLI and the default forecast inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub default_period: Period,
    #[serde(default = "Config::default_target_buffer_value")]
    pub default_target_buffer: f64,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    /// Custom location of the JSON document store. Defaults to `<data dir>/budget.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            default_period: Period::Current,
            default_target_buffer: Self::default_target_buffer_value(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_file: None,
        }
    }
}

impl Config {
    fn default_target_buffer_value() -> f64 {
        DEFAULT_TARGET_BUFFER
    }

    fn default_ui_color_enabled() -> bool {
        true
    }

    /// `strftime` pattern used to show calendar dates for the configured locale.
    pub fn date_format(&self) -> &'static str {
        match self.locale.as_str() {
            "en-US" => "%m/%d/%Y",
            "en-GB" | "fr-FR" | "es-ES" | "it-IT" => "%d/%m/%Y",
            "pl-PL" | "de-DE" | "ru-RU" => "%d.%m.%Y",
            _ => "%Y-%m-%d",
        }
    }

    /// Formats an amount with the configured currency's symbol placement.
    pub fn format_money(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        let value = amount.abs();
        match self.currency.as_str() {
            "USD" => format!("{sign}${value:.2}"),
            "GBP" => format!("{sign}£{value:.2}"),
            "EUR" => format!("{sign}{value:.2} €"),
            "PLN" => format!("{sign}{value:.2} zł"),
            code => format!("{sign}{value:.2} {code}"),
        }
    }
}

/// Loads and saves [`Config`] as pretty JSON inside the application data directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        let path = paths::config_file_in(&base);
        Ok(Self { base, path })
    }

    /// Returns the stored config, or the defaults when none has been saved yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            BudgetError::ConfigError(format!("{}: {}", self.path.display(), err))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| BudgetError::ConfigError(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Store file named by the config, falling back to the data directory default.
    pub fn store_path(&self, config: &Config) -> PathBuf {
        config
            .data_file
            .clone()
            .unwrap_or_else(|| paths::store_file_in(&self.base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
