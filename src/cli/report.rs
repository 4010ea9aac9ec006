//! Turns a forecast report into display lines. Kept free of I/O so it can be tested.

use crate::{
    config::Config,
    domain::{ForecastReport, Snapshot, TrendDirection},
};

use super::output::MessageKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub kind: MessageKind,
    pub text: String,
}

impl ReportLine {
    fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn value(label: &str, value: impl AsRef<str>, negative: bool) -> Self {
        let kind = if negative {
            MessageKind::Warning
        } else {
            MessageKind::Info
        };
        Self::new(kind, format!("{label}: {}", value.as_ref()))
    }
}

fn trend_label(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Up => "Rising",
        TrendDirection::Down => "Falling",
        TrendDirection::Stable => "Stable",
    }
}

fn signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

pub fn render_report(report: &ForecastReport, config: &Config, target_buffer: f64) -> Vec<ReportLine> {
    let mut lines = vec![
        ReportLine::new(MessageKind::Section, "Budget trend"),
        ReportLine::new(
            MessageKind::Info,
            format!(
                "Trend: {} {:.1}%",
                trend_label(report.trend.direction),
                report.trend.percentage.abs()
            ),
        ),
    ];
    if !report.has_history() {
        lines.push(ReportLine::new(MessageKind::Info, "No balance history yet."));
        return lines;
    }

    let forecast = &report.forecast;
    let money = |value: f64| config.format_money(value);
    lines.push(ReportLine::new(MessageKind::Section, "Forecasts"));
    lines.push(ReportLine::value(
        "Projected at period end at the current pace",
        money(forecast.projected_end_of_period),
        forecast.projected_end_of_period < 0.0,
    ));
    lines.push(ReportLine::value(
        "Average spending (last 7 days)",
        format!("{}/day", money(forecast.avg_daily_spending)),
        false,
    ));
    lines.push(ReportLine::value(
        "Spend per day to finish at zero",
        format!("{}/day", money(forecast.target_daily_to_zero)),
        forecast.target_daily_to_zero < 0.0,
    ));

    let streak = forecast.streak();
    if streak.is_active() {
        let line = match streak.direction {
            TrendDirection::Down => ReportLine::new(
                MessageKind::Warning,
                format!("Daily budget has fallen {} days in a row", streak.consecutive_days),
            ),
            _ => ReportLine::new(
                MessageKind::Success,
                format!("Daily budget has risen {} days in a row", streak.consecutive_days),
            ),
        };
        lines.push(line);
    }

    lines.push(ReportLine::value(
        "Change since the start of the month",
        signed_percent(forecast.vs_start_percent),
        forecast.vs_start_percent < 0.0,
    ));
    lines.push(ReportLine::value(
        "Days left in the period",
        forecast.days_remaining.to_string(),
        false,
    ));

    if let (true, Some(date)) = (forecast.days_money_will_last > 0, forecast.money_runs_out_date) {
        lines.push(ReportLine::value(
            "At the current pace the money lasts",
            format!(
                "{} days (until {})",
                forecast.days_money_will_last,
                date.format(config.date_format())
            ),
            forecast.runs_out_before_period_end(),
        ));
    }

    lines.push(ReportLine::value(
        &format!("To keep a reserve of {}", money(target_buffer)),
        format!("spend at most {}/day", money(forecast.target_daily_with_buffer)),
        forecast.target_daily_with_buffer < 0.0,
    ));
    lines
}

/// One line per stored snapshot, oldest first.
pub fn render_history(snapshots: &[Snapshot], config: &Config) -> Vec<ReportLine> {
    if snapshots.is_empty() {
        return vec![ReportLine::new(MessageKind::Info, "No balance history yet.")];
    }
    snapshots
        .iter()
        .map(|snapshot| {
            ReportLine::new(
                MessageKind::Info,
                format!(
                    "{}  balance {:>12}  daily {:>10} (current)  {:>10} (next)",
                    snapshot.date.format(config.date_format()),
                    config.format_money(snapshot.balance),
                    config.format_money(snapshot.daily_budget_current_month),
                    config.format_money(snapshot.daily_budget_next_month),
                ),
            )
        })
        .collect()
}
