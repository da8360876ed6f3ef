//! Expiry classification.
//!
//! Pure functions that turn an expiry date into a day count, an urgency tier and a
//! human-readable label. Nothing here touches the database or the clock: callers
//! pass "today" in, which keeps every result reproducible.
//!
//! One threshold ladder is used everywhere an urgency is computed:
//!
//! | days left | tier      |
//! |-----------|-----------|
//! | `< 0`     | `Expired` |
//! | `0..=3`   | `Urgent`  |
//! | `4..=7`   | `Soon`    |
//! | `> 7`     | `Safe`    |

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Last day count (inclusive) that is still `Urgent`.
pub const URGENT_MAX_DAYS: i64 = 3;
/// Last day count (inclusive) that is still `Soon`.
pub const SOON_MAX_DAYS: i64 = 7;

const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_YEAR: i64 = 365;

/// Urgency tier of an item, ordered by severity (most severe first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Expiry date has passed
    Expired,
    /// Expires within [`URGENT_MAX_DAYS`] days (today included)
    Urgent,
    /// Expires within [`SOON_MAX_DAYS`] days
    Soon,
    /// More than a week left
    Safe,
    /// No usable expiry date
    Unknown,
}

impl Urgency {
    /// Lowercase name used in stored records (`"urgent"`, `"soon"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Urgent => "urgent",
            Self::Soon => "soon",
            Self::Safe => "safe",
            Self::Unknown => "unknown",
        }
    }

    /// Emoji marker used by the bot when rendering lists.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Expired => "⚫",
            Self::Urgent => "🔴",
            Self::Soon => "🟡",
            Self::Safe => "🟢",
            Self::Unknown => "⚪",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of looking at one item's expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    /// Not yet expired. `urgency` is one of `Urgent`, `Soon` or `Safe`.
    Fresh {
        /// Whole days until expiry (0 means it expires today)
        days_left: i64,
        /// Tier for `days_left`
        urgency: Urgency,
    },
    /// Already expired
    Expired {
        /// Whole days since expiry, always at least 1
        days_ago: i64,
    },
    /// No expiry date, or one that could not be parsed
    Unknown,
}

impl Assessment {
    /// Tier of this assessment, `Unknown` included.
    #[must_use]
    pub const fn urgency(&self) -> Urgency {
        match self {
            Self::Fresh { urgency, .. } => *urgency,
            Self::Expired { .. } => Urgency::Expired,
            Self::Unknown => Urgency::Unknown,
        }
    }

    /// Signed days until expiry, `None` when the date is unknown.
    #[must_use]
    pub const fn days_left(&self) -> Option<i64> {
        match self {
            Self::Fresh { days_left, .. } => Some(*days_left),
            Self::Expired { days_ago } => Some(-*days_ago),
            Self::Unknown => None,
        }
    }

    /// Remaining-time label, recomputed on every call.
    #[must_use]
    pub fn label(&self) -> String {
        self.days_left()
            .map_or_else(|| "No expiry date".to_string(), format_remaining)
    }
}

/// Whole calendar days from `today` to `expiry`. Negative once expired.
#[must_use]
pub fn days_until(expiry: NaiveDate, today: NaiveDate) -> i64 {
    expiry.signed_duration_since(today).num_days()
}

/// Maps a day count onto an urgency tier. Never returns `Unknown`.
#[must_use]
pub const fn classify(days: i64) -> Urgency {
    if days < 0 {
        Urgency::Expired
    } else if days <= URGENT_MAX_DAYS {
        Urgency::Urgent
    } else if days <= SOON_MAX_DAYS {
        Urgency::Soon
    } else {
        Urgency::Safe
    }
}

/// Classifies an optional expiry date relative to `today`.
#[must_use]
pub fn assess(expiry: Option<NaiveDate>, today: NaiveDate) -> Assessment {
    let Some(expiry) = expiry else {
        return Assessment::Unknown;
    };
    let days = days_until(expiry, today);
    if days < 0 {
        Assessment::Expired { days_ago: -days }
    } else {
        Assessment::Fresh {
            days_left: days,
            urgency: classify(days),
        }
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Human-readable remaining time for a day count.
///
/// Exact days below 30, whole months (of 30 days) below 365, whole years beyond.
#[must_use]
pub fn format_remaining(days: i64) -> String {
    match days {
        d if d < 0 => format!("Expired {} ago", plural(-d, "day")),
        0 => "Expires today".to_string(),
        d if d < DAYS_PER_MONTH => plural(d, "day"),
        d if d < DAYS_PER_YEAR => plural(d / DAYS_PER_MONTH, "month"),
        d => plural(d / DAYS_PER_YEAR, "year"),
    }
}

/// Parses a stored expiry date.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps (the date part is kept). Anything
/// else yields `None` so the item is treated as having no expiry date.
#[must_use]
pub fn parse_expiry_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
