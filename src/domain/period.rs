use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Selects which calendar month a budget computation targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Current,
    Next,
}

impl Period {
    /// Number of months to move past the month of the reference date.
    pub fn month_offset(self) -> u32 {
        match self {
            Period::Current => 0,
            Period::Next => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Current => "current",
            Period::Next => "next",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown period `{0}` (expected `current` or `next`)")]
pub struct ParsePeriodError(String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "current" | "this" => Ok(Period::Current),
            "next" => Ok(Period::Next),
            other => Err(ParsePeriodError(other.to_string())),
        }
    }
}
