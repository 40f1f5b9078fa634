//! Reporting period tokens and the time windows they resolve to

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::analytics::error::AnalyticsError;

/// A reporting period accepted by the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "7d")]
    SevenDays,
    #[default]
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
    #[serde(rename = "1y")]
    OneYear,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::SevenDays,
        Period::ThirtyDays,
        Period::NinetyDays,
        Period::OneYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::SevenDays => "7d",
            Period::ThirtyDays => "30d",
            Period::NinetyDays => "90d",
            Period::OneYear => "1y",
        }
    }

    /// Length of the period in whole days
    pub fn days(&self) -> i64 {
        match self {
            Period::SevenDays => 7,
            Period::ThirtyDays => 30,
            Period::NinetyDays => 90,
            Period::OneYear => 365,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::days(self.days())
    }

    /// Resolve against the current wall-clock time
    pub fn resolve(&self) -> PeriodWindow {
        self.resolve_at(Utc::now())
    }

    /// Resolve against an explicit "now", truncated to whole seconds
    pub fn resolve_at(&self, now: DateTime<Utc>) -> PeriodWindow {
        let current_end = now.trunc_subsecs(0);
        let current_start = current_end - self.duration();
        PeriodWindow {
            current_start,
            current_end,
            previous_start: current_start - self.duration(),
            previous_end: current_start,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| AnalyticsError::InvalidPeriod(s.to_string()))
    }
}

/// Current and previous reporting windows, both half-open `[start, end)`.
///
/// The previous window ends exactly where the current one starts and has the
/// same length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub current_start: DateTime<Utc>,
    pub current_end: DateTime<Utc>,
    pub previous_start: DateTime<Utc>,
    pub previous_end: DateTime<Utc>,
}

impl PeriodWindow {
    pub fn in_current(&self, ts: i64) -> bool {
        self.current_start.timestamp() <= ts && ts < self.current_end.timestamp()
    }

    pub fn in_previous(&self, ts: i64) -> bool {
        self.previous_start.timestamp() <= ts && ts < self.previous_end.timestamp()
    }
}

/// Resolve a raw period token against the current wall-clock time.
pub fn resolve_period(token: &str) -> Result<(Period, PeriodWindow), AnalyticsError> {
    let period: Period = token.parse()?;
    Ok((period, period.resolve()))
}
