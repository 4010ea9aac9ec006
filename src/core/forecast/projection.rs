use chrono::{Duration, NaiveDate};

use crate::domain::{ForecastResult, Period, Snapshot};

use super::{
    calendar::days_remaining,
    spending::SpendingRateEstimator,
    streak::StreakDetector,
    trend::{percent_change, round_one_decimal},
};

/// Everything a recompute pass needs. Callers rebuild this whenever any input changes.
#[derive(Debug, Clone, Copy)]
pub struct ForecastInputs<'a> {
    /// Ascending by date, at most one entry per date.
    pub snapshots: &'a [Snapshot],
    pub period: Period,
    pub today: NaiveDate,
    pub current_balance: f64,
    pub total_planned_income: f64,
    pub total_planned_expenses: f64,
    pub target_buffer: f64,
}

impl ForecastInputs<'_> {
    /// Balance once every planned item settles, ignoring ongoing daily spend.
    pub fn projected_end_with_plans(&self) -> f64 {
        self.current_balance + self.total_planned_income - self.total_planned_expenses
    }
}

/// Forward projections for the selected period.
pub struct ProjectionCalculator;

impl ProjectionCalculator {
    pub fn project(inputs: &ForecastInputs<'_>) -> ForecastResult {
        let days = days_remaining(inputs.today, inputs.period);
        let avg_daily_spending = SpendingRateEstimator::estimate_daily_spend(inputs.snapshots);
        let streak = StreakDetector::detect(inputs.snapshots, inputs.period);
        let with_plans = inputs.projected_end_with_plans();

        let days_money_will_last = days_money_will_last(inputs.current_balance, avg_daily_spending);
        // out-of-range day counts leave the date unset
        let money_runs_out_date = if days_money_will_last > 0 {
            Duration::try_days(days_money_will_last)
                .and_then(|span| inputs.today.checked_add_signed(span))
        } else {
            None
        };

        ForecastResult {
            projected_end_with_plans: with_plans,
            projected_end_of_period: with_plans - avg_daily_spending * f64::from(days),
            avg_daily_spending,
            target_daily_to_zero: per_day(with_plans, days),
            consecutive_days: streak.consecutive_days,
            trend_direction: streak.direction,
            vs_start_percent: vs_start_percent(inputs.snapshots, inputs.period),
            days_remaining: days,
            days_money_will_last,
            money_runs_out_date,
            target_daily_with_buffer: per_day(with_plans - inputs.target_buffer, days),
        }
    }
}

fn per_day(amount: f64, days: u32) -> f64 {
    if days == 0 {
        0.0
    } else {
        amount / f64::from(days)
    }
}

/// Whole days the balance covers at the current rate; never negative.
fn days_money_will_last(balance: f64, avg_daily_spending: f64) -> i64 {
    if avg_daily_spending <= 0.0 {
        return 0;
    }
    let days = (balance / avg_daily_spending).floor();
    if days.is_finite() && days > 0.0 {
        days as i64
    } else {
        0
    }
}

fn vs_start_percent(snapshots: &[Snapshot], period: Period) -> f64 {
    match (snapshots.first(), snapshots.last()) {
        (Some(first), Some(last)) => round_one_decimal(percent_change(
            first.daily_budget(period),
            last.daily_budget(period),
        )),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrendDirection;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn history(balances: &[f64], budgets: &[f64]) -> Vec<Snapshot> {
        balances
            .iter()
            .zip(budgets)
            .zip(date(2025, 11, 18).iter_days())
            .map(|((balance, budget), day)| {
                Snapshot::new(day, *balance).with_daily_budget(Period::Current, *budget)
            })
            .collect()
    }

    fn inputs(snapshots: &[Snapshot]) -> ForecastInputs<'_> {
        ForecastInputs {
            snapshots,
            period: Period::Current,
            today: date(2025, 11, 21),
            current_balance: 3000.0,
            total_planned_income: 0.0,
            total_planned_expenses: 0.0,
            target_buffer: 500.0,
        }
    }

    #[test]
    fn rounding_noise_in_balances_does_not_overflow_the_date() {
        let snapshots = history(&[0.1 + 0.2, 0.3], &[1.0, 1.0]);
        let result = ProjectionCalculator::project(&inputs(&snapshots));

        assert!(result.avg_daily_spending > 0.0);
        assert!(result.days_money_will_last > 0);
        assert_eq!(result.money_runs_out_date, None);
        assert!(!result.runs_out_before_period_end());
    }

    #[test]
    fn buffer_and_zero_targets_follow_remaining_days() {
        let snapshots = history(&[3100.0, 3050.0, 3000.0], &[110.0, 105.0, 100.0]);
        let result = ProjectionCalculator::project(&inputs(&snapshots));

        assert_eq!(result.days_remaining, 10);
        assert_eq!(result.avg_daily_spending, 50.0);
        assert_eq!(result.projected_end_of_period, 2500.0);
        assert_eq!(result.target_daily_to_zero, 300.0);
        assert_eq!(result.target_daily_with_buffer, 250.0);
        assert_eq!(result.days_money_will_last, 60);
        assert_eq!(result.money_runs_out_date, Some(date(2026, 1, 20)));
        assert_eq!(result.trend_direction, TrendDirection::Down);
        assert_eq!(result.consecutive_days, 3);
        assert_eq!(result.vs_start_percent, -9.1);
        assert!(!result.runs_out_before_period_end());
    }

    #[test]
    fn planned_items_shift_every_projection() {
        let snapshots = history(&[3100.0, 3050.0, 3000.0], &[100.0, 100.0, 100.0]);
        let mut input = inputs(&snapshots);
        input.total_planned_income = 1000.0;
        input.total_planned_expenses = 400.0;
        let result = ProjectionCalculator::project(&input);

        assert_eq!(result.projected_end_with_plans, 3600.0);
        assert_eq!(result.projected_end_of_period, 3100.0);
        assert_eq!(result.target_daily_to_zero, 360.0);
        assert_eq!(result.target_daily_with_buffer, 310.0);
        // depletion is measured on the balance alone
        assert_eq!(result.days_money_will_last, 60);
    }

    #[test]
    fn no_spending_means_no_depletion_date() {
        let snapshots = history(&[3000.0, 3000.0, 3200.0], &[100.0, 100.0, 100.0]);
        let result = ProjectionCalculator::project(&inputs(&snapshots));
        assert_eq!(result.avg_daily_spending, 0.0);
        assert_eq!(result.days_money_will_last, 0);
        assert_eq!(result.money_runs_out_date, None);
        assert_eq!(result.projected_end_of_period, 3000.0);
    }

    #[test]
    fn unreachable_buffer_yields_negative_allowance() {
        let snapshots = history(&[400.0, 300.0], &[10.0, 8.0]);
        let mut input = inputs(&snapshots);
        input.current_balance = 300.0;
        let result = ProjectionCalculator::project(&input);
        assert_eq!(result.target_daily_with_buffer, -20.0);
        assert_eq!(result.days_money_will_last, 3);
        assert!(result.runs_out_before_period_end());
    }

    #[test]
    fn negative_balance_never_reports_negative_days() {
        let snapshots = history(&[100.0, -50.0], &[10.0, -5.0]);
        let mut input = inputs(&snapshots);
        input.current_balance = -50.0;
        let result = ProjectionCalculator::project(&input);
        assert_eq!(result.days_money_will_last, 0);
        assert_eq!(result.money_runs_out_date, None);
    }

    #[test]
    fn empty_history_still_projects_plans() {
        let result = ProjectionCalculator::project(&inputs(&[]));
        assert_eq!(result.avg_daily_spending, 0.0);
        assert_eq!(result.vs_start_percent, 0.0);
        assert_eq!(result.consecutive_days, 0);
        assert_eq!(result.target_daily_to_zero, 300.0);
    }
}
