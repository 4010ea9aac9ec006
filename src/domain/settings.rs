use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Period;

pub const DEFAULT_TARGET_BUFFER: f64 = 500.0;

/// Live scalar inputs the user edits directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSettings {
    #[serde(default)]
    pub current_balance: f64,
    #[serde(default)]
    pub month_period: Period,
    #[serde(default = "BudgetSettings::default_target_buffer")]
    pub target_buffer: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BudgetSettings {
    fn default_target_buffer() -> f64 {
        DEFAULT_TARGET_BUFFER
    }
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            current_balance: 0.0,
            month_period: Period::Current,
            target_buffer: DEFAULT_TARGET_BUFFER,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlannedKind {
    Income,
    Expense,
}

/// A separately tracked income or expense line item that has not settled yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedItem {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

impl PlannedItem {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            created_at: Utc::now(),
        }
    }
}

/// Sums the amounts of a list of planned items.
pub fn total_amount(items: &[PlannedItem]) -> f64 {
    items.iter().map(|item| item.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_buffer_applies_to_partial_documents() {
        let settings: BudgetSettings =
            serde_json::from_str(r#"{ "currentBalance": 1200, "monthPeriod": "next" }"#).unwrap();
        assert_eq!(settings.current_balance, 1200.0);
        assert_eq!(settings.month_period, Period::Next);
        assert_eq!(settings.target_buffer, DEFAULT_TARGET_BUFFER);
    }

    #[test]
    fn totals_sum_item_amounts() {
        let items = vec![PlannedItem::new("Salary", 4200.0), PlannedItem::new("Bonus", 300.5)];
        assert_eq!(total_amount(&items), 4500.5);
        assert_eq!(total_amount(&[]), 0.0);
    }
}
