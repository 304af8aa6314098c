//! Duration strings reported by the VyOS CLI.
//!
//! BGP session uptimes come in three shapes depending on their magnitude:
//! `never`, `HH:MM:SS` below one day, and three letter-tagged groups above
//! (`4d23h40m`, `2w3d04h`, `1y12w3d`). System uptime comes from the
//! `uptime(1)`-style line of `show version`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ParseError, Result};

/// Seconds per calendar unit, shared by every duration parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationUnits {
    pub minute: i64,
    pub hour: i64,
    pub day: i64,
    pub week: i64,
    pub year: i64,
}

/// The unit table used by [`parse_bgp_uptime`] and [`parse_system_uptime`].
pub const UNITS: DurationUnits = DurationUnits {
    minute: 60,
    hour: 60 * 60,
    day: 24 * 60 * 60,
    week: 7 * 24 * 60 * 60,
    year: 365 * 24 * 60 * 60,
};

impl DurationUnits {
    /// Seconds for a unit letter of the letter-tagged form.
    pub fn letter(&self, unit: char) -> Option<i64> {
        match unit {
            'y' => Some(self.year),
            'w' => Some(self.week),
            'd' => Some(self.day),
            'h' => Some(self.hour),
            'm' => Some(self.minute),
            _ => None,
        }
    }

    /// Seconds for an `H:MM:SS` clock triple, `None` on overflow.
    pub fn clock(&self, hours: i64, minutes: i64, seconds: i64) -> Option<i64> {
        hours
            .checked_mul(self.hour)?
            .checked_add(minutes.checked_mul(self.minute)?)?
            .checked_add(seconds)
    }
}

/// Uptime reported for sessions that were never established.
pub const NEVER: i64 = -1;

static CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2})$").expect("static regex"));

static LETTER_TAGGED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)([a-z])(\d+)([a-z])(\d+)([a-z])$").expect("static regex")
});

fn clock_seconds(token: &str) -> Option<i64> {
    let caps = CLOCK.captures(token)?;
    let part = |i: usize| caps[i].parse::<i64>().ok();
    UNITS.clock(part(1)?, part(2)?, part(3)?)
}

/// Convert a BGP `Up/Down` column value into seconds.
///
/// `never` yields [`NEVER`]. Any token that is neither `H:MM:SS` nor exactly
/// three letter-tagged groups is rejected.
pub fn parse_bgp_uptime(token: &str) -> Result<i64> {
    let token = token.trim();
    if token == "never" {
        return Ok(NEVER);
    }

    if let Some(seconds) = clock_seconds(token) {
        return Ok(seconds);
    }

    let unknown = || ParseError::UnknownDuration(token.to_string());
    let caps = LETTER_TAGGED.captures(token).ok_or_else(unknown)?;

    let mut total: i64 = 0;
    for group in [1, 3, 5] {
        let count: i64 = caps[group].parse().map_err(|_| unknown())?;
        let unit = caps[group + 1].chars().next().ok_or_else(unknown)?;
        let seconds = UNITS.letter(unit).ok_or_else(unknown)?;
        total = count
            .checked_mul(seconds)
            .and_then(|s| total.checked_add(s))
            .ok_or_else(unknown)?;
    }
    Ok(total)
}

/// Convert the `Uptime:` line of `show version` into seconds.
///
/// The line carries an `uptime(1)` summary:
/// `Uptime: 08:28:44 up 23 days, 3:19, 1 user, load average: ...`.
/// The clock triple before `up` and the day count after it are summed.
/// When the system has been up for less than a day the count is absent and
/// treated as zero.
pub fn parse_system_uptime(line: &str) -> Result<i64> {
    let unexpected = || ParseError::UnexpectedFormat {
        context: "system uptime",
        line: line.to_string(),
    };

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let up = tokens.iter().position(|t| *t == "up").ok_or_else(unexpected)?;
    let clock = up.checked_sub(1).and_then(|i| tokens.get(i)).ok_or_else(unexpected)?;
    let seconds = clock_seconds(clock).ok_or_else(unexpected)?;

    let days = match (tokens.get(up + 1), tokens.get(up + 2)) {
        (Some(count), Some(unit)) if unit.starts_with("day") => count
            .parse::<i64>()
            .map_err(|_| unexpected())?,
        _ => 0,
    };

    Ok(days
        .checked_mul(UNITS.day)
        .and_then(|d| d.checked_add(seconds))
        .ok_or_else(unexpected)?)
}
