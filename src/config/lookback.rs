use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::models::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookbackUnit {
    Minute,
    Hour,
    Day,
    Week,
}

impl LookbackUnit {
    fn from_suffix(suffix: char) -> Option<Self> {
        match suffix {
            'm' => Some(LookbackUnit::Minute),
            'h' => Some(LookbackUnit::Hour),
            'd' => Some(LookbackUnit::Day),
            'w' => Some(LookbackUnit::Week),
            _ => None,
        }
    }

    fn suffix(&self) -> char {
        match self {
            LookbackUnit::Minute => 'm',
            LookbackUnit::Hour => 'h',
            LookbackUnit::Day => 'd',
            LookbackUnit::Week => 'w',
        }
    }

    fn name(&self) -> &'static str {
        match self {
            LookbackUnit::Minute => "minute",
            LookbackUnit::Hour => "hour",
            LookbackUnit::Day => "day",
            LookbackUnit::Week => "week",
        }
    }
}

/// How far back from "now" an item may have been added, e.g. `24h` or `1w`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct LookbackPeriod {
    pub magnitude: u32,
    pub unit: LookbackUnit,
}

impl LookbackPeriod {
    pub fn duration(&self) -> Duration {
        let n = i64::from(self.magnitude);
        match self.unit {
            LookbackUnit::Minute => Duration::minutes(n),
            LookbackUnit::Hour => Duration::hours(n),
            LookbackUnit::Day => Duration::days(n),
            LookbackUnit::Week => Duration::weeks(n),
        }
    }

    /// Oldest `addedAt` that still counts as new
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.duration())
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Human wording for the message header: "day", "24 hours", "2 weeks"
    pub fn label(&self) -> String {
        if self.magnitude == 1 {
            self.unit.name().to_string()
        } else {
            format!("{} {}s", self.magnitude, self.unit.name())
        }
    }
}

impl FromStr for LookbackPeriod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidLookback(s.to_string());
        let trimmed = s.trim();

        let suffix = trimmed.chars().last().ok_or_else(invalid)?;
        let unit = LookbackUnit::from_suffix(suffix).ok_or_else(invalid)?;
        let digits = &trimmed[..trimmed.len() - suffix.len_utf8()];
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let magnitude: u32 = digits.parse().map_err(|_| invalid())?;
        if magnitude == 0 {
            return Err(invalid());
        }

        Ok(Self { magnitude, unit })
    }
}

impl TryFrom<String> for LookbackPeriod {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.suffix())
    }
}
