pub mod forecast_session;
pub mod history_service;

pub use forecast_session::{ForecastSession, RefreshOutcome};
pub use history_service::{HistoryService, PlannedTotals};
