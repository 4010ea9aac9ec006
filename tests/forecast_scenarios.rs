mod common;

use budget_forecast::{
    core::forecast::{
        ForecastEngine, ForecastInputs, SpendingRateEstimator, StreakDetector, StreakPolicy,
        TrendClassifier,
    },
    domain::{Period, Snapshot, TrendDirection},
};
use chrono::NaiveDate;
use common::{nov, november_series};

fn inputs<'a>(snapshots: &'a [Snapshot], balance: f64) -> ForecastInputs<'a> {
    ForecastInputs {
        snapshots,
        period: Period::Current,
        today: nov(21),
        current_balance: balance,
        total_planned_income: 0.0,
        total_planned_expenses: 0.0,
        target_buffer: 500.0,
    }
}

#[test]
fn falling_budget_over_the_month_reads_as_down() {
    let series = november_series(&[(1, 3000.0, 100.0), (8, 2600.0, 80.0)]);
    let trend = TrendClassifier::classify(&series, Period::Current);
    assert_eq!(trend.direction, TrendDirection::Down);
    assert_eq!(trend.percentage, -20.0);
}

#[test]
fn flat_days_do_not_count_as_spending() {
    let series = november_series(&[
        (18, 1000.0, 10.0),
        (19, 950.0, 10.0),
        (20, 950.0, 10.0),
        (21, 900.0, 10.0),
    ]);
    assert_eq!(SpendingRateEstimator::estimate_daily_spend(&series), 50.0);
}

#[test]
fn three_day_streaks_need_every_step_in_one_direction() {
    let falling = november_series(&[(19, 0.0, 10.0), (20, 0.0, 8.0), (21, 0.0, 5.0)]);
    let signal = StreakDetector::detect(&falling, Period::Current);
    assert_eq!(signal.direction, TrendDirection::Down);
    assert_eq!(signal.consecutive_days, 3);

    let broken = november_series(&[(19, 0.0, 10.0), (20, 0.0, 8.0), (21, 0.0, 9.0)]);
    let signal = StreakDetector::detect(&broken, Period::Current);
    assert_eq!(signal.direction, TrendDirection::Stable);
    assert_eq!(signal.consecutive_days, 0);
}

#[test]
fn unbounded_policy_reports_the_whole_run() {
    let series = november_series(&[
        (17, 0.0, 20.0),
        (18, 0.0, 16.0),
        (19, 0.0, 12.0),
        (20, 0.0, 10.0),
        (21, 0.0, 5.0),
    ]);
    assert_eq!(
        StreakDetector::detect(&series, Period::Current).consecutive_days,
        3
    );
    assert_eq!(
        StreakDetector::detect_with(&series, Period::Current, StreakPolicy::Unbounded)
            .consecutive_days,
        5
    );
}

#[test]
fn full_recompute_matches_worked_example() {
    let series = november_series(&[(19, 3100.0, 310.0), (20, 3050.0, 305.0), (21, 3000.0, 300.0)]);
    let report = ForecastEngine::recompute(&inputs(&series, 3000.0));
    let forecast = &report.forecast;

    assert!(report.has_history());
    assert_eq!(report.trend.direction, TrendDirection::Down);
    assert_eq!(report.trend.percentage, -3.2);
    assert_eq!(forecast.days_remaining, 10);
    assert_eq!(forecast.avg_daily_spending, 50.0);
    assert_eq!(forecast.projected_end_with_plans, 3000.0);
    assert_eq!(forecast.projected_end_of_period, 2500.0);
    assert_eq!(forecast.target_daily_to_zero, 300.0);
    assert_eq!(forecast.target_daily_with_buffer, 250.0);
    assert_eq!(forecast.consecutive_days, 3);
    assert_eq!(forecast.trend_direction, TrendDirection::Down);
    assert_eq!(forecast.vs_start_percent, -3.2);
    assert_eq!(forecast.days_money_will_last, 60);
    assert_eq!(forecast.money_runs_out_date, NaiveDate::from_ymd_opt(2026, 1, 20));
    assert!(!forecast.runs_out_before_period_end());
}

#[test]
fn no_spending_means_no_depletion_date() {
    let series = november_series(&[(20, 3000.0, 300.0), (21, 3000.0, 300.0)]);
    let forecast = ForecastEngine::recompute(&inputs(&series, 3000.0)).forecast;
    assert_eq!(forecast.avg_daily_spending, 0.0);
    assert_eq!(forecast.days_money_will_last, 0);
    assert_eq!(forecast.money_runs_out_date, None);
    assert_eq!(forecast.projected_end_of_period, 3000.0);
}

#[test]
fn empty_history_yields_neutral_report() {
    let report = ForecastEngine::recompute(&inputs(&[], 1200.0));
    assert!(!report.has_history());
    assert_eq!(report.trend.direction, TrendDirection::Stable);
    assert_eq!(report.trend.percentage, 0.0);
    assert_eq!(report.forecast.consecutive_days, 0);
    assert_eq!(report.forecast.vs_start_percent, 0.0);
    assert_eq!(report.forecast.target_daily_to_zero, 120.0);
}

#[test]
fn scaling_every_amount_keeps_relative_figures() {
    let base = november_series(&[(19, 3100.0, 310.0), (20, 3050.0, 305.0), (21, 3000.0, 300.0)]);
    let scaled: Vec<Snapshot> = base
        .iter()
        .map(|s| {
            Snapshot::new(s.date, s.balance * 7.0)
                .with_daily_budget(Period::Current, s.daily_budget_current_month * 7.0)
        })
        .collect();

    let original = ForecastEngine::recompute(&inputs(&base, 3000.0));
    let bigger = ForecastEngine::recompute(&inputs(&scaled, 21000.0));

    assert_eq!(original.trend, bigger.trend);
    assert_eq!(original.forecast.vs_start_percent, bigger.forecast.vs_start_percent);
    assert_eq!(
        original.forecast.days_money_will_last,
        bigger.forecast.days_money_will_last
    );
    assert!((bigger.forecast.avg_daily_spending - 350.0).abs() < 1e-9);
}

#[test]
fn zero_target_spreads_remaining_money_over_the_period() {
    let series = november_series(&[(20, 2000.0, 200.0), (21, 1900.0, 190.0)]);
    for period in [Period::Current, Period::Next] {
        let mut data = inputs(&series, 1900.0);
        data.period = period;
        data.total_planned_income = 400.0;
        data.total_planned_expenses = 250.0;
        let forecast = ForecastEngine::recompute(&data).forecast;
        let rebuilt = forecast.target_daily_to_zero * f64::from(forecast.days_remaining);
        assert!((rebuilt - forecast.projected_end_with_plans).abs() < 1e-6);
        assert!(forecast.target_daily_with_buffer < forecast.target_daily_to_zero);
    }
}
