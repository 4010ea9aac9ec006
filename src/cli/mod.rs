pub mod commands;
pub mod output;
pub mod report;

use std::{sync::Arc, thread, time::Duration};

use chrono::Utc;
use tracing::{debug, info};

use crate::{
    config::{Config, ConfigManager},
    core::{
        forecast::first_day_of_month,
        services::{ForecastSession, HistoryService, RefreshOutcome},
        Clock, FixedClock, SystemClock,
    },
    domain::{BudgetSettings, ForecastReport, Period},
    errors::{BudgetError, CliError},
    storage::{HistoryStore, JsonStorage},
    utils::build_info,
};

use commands::{parse_args, Command, USAGE};
use output::OutputPreferences;

/// Entry point used by the `budget_forecast_cli` binary.
pub fn run_cli() -> Result<(), CliError> {
    run_with_args(std::env::args().skip(1))
}

pub fn run_with_args<I, S>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let invocation = parse_args(args)?;
    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    output::set_preferences(OutputPreferences {
        plain_mode: invocation.flags.plain || !config.ui_color_enabled,
        quiet_mode: invocation.flags.quiet,
    });

    match invocation.command {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Version => {
            output::info(build_info::current().summary());
            Ok(())
        }
        command => {
            let store = Arc::new(JsonStorage::open(manager.store_path(&config))?);
            debug!(path = %store.path().display(), "opened budget store");
            CliApp { config, store }.execute(command)
        }
    }
}

struct CliApp {
    config: Config,
    store: Arc<JsonStorage>,
}

impl CliApp {
    fn execute(&self, command: Command) -> Result<(), CliError> {
        match command {
            Command::Forecast {
                period,
                buffer,
                today,
                json,
            } => self.forecast(period, buffer, today, json),
            Command::Record => self.record(),
            Command::Balance(amount) => self.set_balance(amount),
            Command::SetPeriod(period) => self.set_period(period),
            Command::SetBuffer(amount) => self.set_buffer(amount),
            Command::History => self.history(),
            Command::Backfill { date, balance } => {
                let snapshot = HistoryService::backfill(self.store.as_ref(), date, balance)?;
                output::success(format!(
                    "Stored {} with balance {}",
                    snapshot.date.format(self.config.date_format()),
                    self.config.format_money(snapshot.balance)
                ));
                Ok(())
            }
            Command::ClearHistory { confirmed } => self.clear_history(confirmed),
            Command::Watch {
                interval_secs,
                cycles,
            } => self.watch(interval_secs, cycles),
            Command::Version | Command::Help => Ok(()),
        }
    }

    /// Settings saved in the store, seeded from the config until the user saves their own.
    fn settings(&self) -> Result<BudgetSettings, CliError> {
        let mut settings = self.store.load_settings()?;
        if settings.updated_at.is_none() {
            settings.month_period = self.config.default_period;
            settings.target_buffer = self.config.default_target_buffer;
        }
        Ok(settings)
    }

    fn save_settings(&self, mut settings: BudgetSettings) -> Result<(), CliError> {
        settings.updated_at = Some(Utc::now());
        self.store.save_settings(&settings)?;
        Ok(())
    }

    fn session(
        &self,
        period: Option<Period>,
        buffer: Option<f64>,
        clock: Box<dyn Clock>,
    ) -> Result<(ForecastSession, f64), CliError> {
        let settings = self.settings()?;
        let buffer = buffer.unwrap_or(settings.target_buffer);
        let mut session = ForecastSession::new(Box::new(self.store.clone()), clock);
        session.set_period(Some(period.unwrap_or(settings.month_period)));
        session.set_target_buffer(Some(buffer));
        Ok((session, buffer))
    }

    fn forecast(
        &self,
        period: Option<Period>,
        buffer: Option<f64>,
        today: Option<chrono::NaiveDate>,
        json: bool,
    ) -> Result<(), CliError> {
        let clock: Box<dyn Clock> = match today {
            Some(date) => Box::new(FixedClock::new(date)),
            None => Box::new(SystemClock),
        };
        let (session, buffer) = self.session(period, buffer, clock)?;
        let report = session.compute()?;
        if json {
            let rendered = serde_json::to_string_pretty(&report).map_err(BudgetError::from)?;
            println!("{rendered}");
        } else {
            self.print_report(&report, buffer);
        }
        Ok(())
    }

    fn print_report(&self, report: &ForecastReport, buffer: f64) {
        for line in report::render_report(report, &self.config, buffer) {
            output::print(line.kind, line.text);
        }
    }

    fn record(&self) -> Result<(), CliError> {
        match HistoryService::record(self.store.as_ref(), &SystemClock)? {
            Some(snapshot) => output::success(format!(
                "Recorded balance {} (daily budget {})",
                self.config.format_money(snapshot.balance),
                self.config.format_money(snapshot.daily_budget_current_month)
            )),
            None => output::info("Nothing to record yet: balance and planned items are all zero."),
        }
        Ok(())
    }

    fn set_balance(&self, amount: f64) -> Result<(), CliError> {
        let mut settings = self.settings()?;
        settings.current_balance = amount;
        self.save_settings(settings)?;
        output::success(format!(
            "Current balance set to {}",
            self.config.format_money(amount)
        ));
        self.record()
    }

    fn set_period(&self, period: Period) -> Result<(), CliError> {
        let mut settings = self.settings()?;
        settings.month_period = period;
        self.save_settings(settings)?;
        output::success(format!("Budget period set to {}", period.label()));
        Ok(())
    }

    fn set_buffer(&self, amount: f64) -> Result<(), CliError> {
        if amount < 0.0 {
            return Err(CliError::Input("reserve buffer cannot be negative".into()));
        }
        let mut settings = self.settings()?;
        settings.target_buffer = amount;
        self.save_settings(settings)?;
        output::success(format!(
            "Reserve buffer set to {}",
            self.config.format_money(amount)
        ));
        Ok(())
    }

    fn history(&self) -> Result<(), CliError> {
        let from = first_day_of_month(SystemClock.today());
        let snapshots = self.store.list_snapshots_from(from)?;
        output::section("Balance history");
        for line in report::render_history(&snapshots, &self.config) {
            output::print(line.kind, line.text);
        }
        Ok(())
    }

    fn clear_history(&self, confirmed: bool) -> Result<(), CliError> {
        if !confirmed {
            output::warning("This removes every balance snapshot. Re-run with --yes to continue.");
            return Ok(());
        }
        let backup = self.store.backup(Some("before-clear"))?;
        let removed = self.store.clear_history()?;
        info!(removed, backup = %backup.display(), "cleared balance history");
        output::success(format!(
            "Removed {removed} snapshots (backup at {})",
            backup.display()
        ));
        Ok(())
    }

    /// Points the session at the saved period and buffer, then refreshes it.
    ///
    /// Returns the buffer the latest report was computed with.
    fn sync_session(&self, session: &mut ForecastSession) -> Result<(RefreshOutcome, f64), CliError> {
        let settings = self.settings()?;
        session.set_period(Some(settings.month_period));
        session.set_target_buffer(Some(settings.target_buffer));
        Ok((session.refresh()?, settings.target_buffer))
    }

    /// Polls the store and reprints the forecast whenever its inputs change.
    fn watch(&self, interval_secs: u64, cycles: Option<u32>) -> Result<(), CliError> {
        let mut session = ForecastSession::new(Box::new(self.store.clone()), Box::new(SystemClock));
        let mut pass = 0u32;
        loop {
            match self.sync_session(&mut session) {
                Ok((RefreshOutcome::Recomputed, buffer)) => {
                    if let Some(report) = session.latest() {
                        self.print_report(report, buffer);
                    }
                }
                Ok((RefreshOutcome::Unchanged, _)) => {}
                // keep polling; the next pass retries the read
                Err(err) => output::error(format!("Forecast refresh failed: {err}")),
            }
            pass += 1;
            if cycles.is_some_and(|limit| pass >= limit) {
                return Ok(());
            }
            thread::sleep(Duration::from_secs(interval_secs));
        }
    }
}
