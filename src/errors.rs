use std::result::Result as StdResult;

use thiserror::Error;

use crate::domain::ParsePeriodError;

/// Unified error type for the storage, configuration and service layers.
///
/// The forecasting engine itself is total and never produces one of these.
#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, BudgetError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<ParsePeriodError> for BudgetError {
    fn from(err: ParsePeriodError) -> Self {
        BudgetError::InvalidInput(err.to_string())
    }
}

impl From<ParsePeriodError> for CliError {
    fn from(err: ParsePeriodError) -> Self {
        CliError::Input(err.to_string())
    }
}
