//! The four statistics reports printed for every session.
//!
//! Each report is computed into a plain struct first and then rendered through
//! its `Display` impl, framed by [`print_report`] with a heading, the elapsed
//! compute time and a dash rule.

use std::fmt;
use std::io::Write;
use std::time::Instant;

use polars::prelude::*;

use crate::aggregation::{mode, mode_i32, mode_str, reduce, tally_str, Reduce};
use crate::error::Result;
use crate::loader::TripTable;
use crate::schema::*;

const SECONDS_PER_DAY: i64 = 24 * 3600;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_MINUTE: i64 = 60;

const UNAVAILABLE: &str = "unavailable";

struct OrUnavailable<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrUnavailable<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str(UNAVAILABLE),
        }
    }
}

/// Print `heading`, compute the report, print it with the elapsed time and a
/// rule of `rule` dashes. Returns what was computed.
fn print_report<W, T, F>(out: &mut W, heading: &str, rule: usize, compute: F) -> Result<T>
where
    W: Write,
    T: fmt::Display,
    F: FnOnce() -> Result<T>,
{
    writeln!(out, "\n{heading}\n")?;
    let started = Instant::now();

    let stats = compute()?;
    writeln!(out, "{stats}")?;

    writeln!(
        out,
        "\n\nThis took {} seconds.",
        started.elapsed().as_secs_f64()
    )?;
    writeln!(out, "{}", "-".repeat(rule))?;
    Ok(stats)
}

// ── Time of travel ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    pub month: Option<i32>,
    pub day: Option<String>,
    pub hour: Option<i32>,
}

impl TimeStats {
    pub fn compute(table: &TripTable) -> Result<Self> {
        let df = table.frame();
        let hours = df
            .clone()
            .lazy()
            .select([col(trip::START_TIME)
                .dt()
                .hour()
                .cast(DataType::Int32)
                .alias(derived::HOUR)])
            .collect()?;

        Ok(Self {
            month: mode_i32(df, derived::MONTH)?,
            day: mode_str(df, derived::DAY_OF_WEEK)?,
            hour: mode_i32(&hours, derived::HOUR)?,
        })
    }
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most Common Month: {}", OrUnavailable(&self.month))?;
        writeln!(f, "Most Common Day of Week: {}", OrUnavailable(&self.day))?;
        write!(f, "Most Common Start Hour: {}", OrUnavailable(&self.hour))
    }
}

pub fn time_stats<W: Write>(table: &TripTable, out: &mut W) -> Result<TimeStats> {
    print_report(
        out,
        "Calculating The Most Frequent Times of Travel...",
        100,
        || TimeStats::compute(table),
    )
}

// ── Stations ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start: Option<String>,
    pub end: Option<String>,
    pub trip: Option<String>,
}

impl StationStats {
    pub fn compute(table: &TripTable) -> Result<Self> {
        let df = table.frame();
        let starts = df.column(trip::START_STATION)?.str()?;
        let ends = df.column(trip::END_STATION)?.str()?;

        let pairs = starts
            .into_iter()
            .zip(ends.into_iter())
            .map(|pair| match pair {
                (Some(start), Some(end)) => Some(format!("{start} -> {end}")),
                _ => None,
            });

        Ok(Self {
            start: mode_str(df, trip::START_STATION)?,
            end: mode_str(df, trip::END_STATION)?,
            trip: mode(pairs),
        })
    }
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most Common Start Station: {}", OrUnavailable(&self.start))?;
        writeln!(f, "Most Common End Station: {}", OrUnavailable(&self.end))?;
        write!(f, "Most Common Combination: {}", OrUnavailable(&self.trip))
    }
}

pub fn station_stats<W: Write>(table: &TripTable, out: &mut W) -> Result<StationStats> {
    print_report(
        out,
        "Calculating The Most Popular Stations and Trip...",
        100,
        || StationStats::compute(table),
    )
}

// ── Trip duration ───────────────────────────────────────────────────────────

/// A total travel time split into whole days, hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TotalDuration {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TotalDuration {
    /// Fractional seconds are floored away before splitting.
    pub fn from_seconds(total: f64) -> Self {
        let total = total.floor() as i64;
        let days = total.div_euclid(SECONDS_PER_DAY);
        let rest = total.rem_euclid(SECONDS_PER_DAY);
        Self {
            days,
            hours: rest / SECONDS_PER_HOUR,
            minutes: rest % SECONDS_PER_HOUR / SECONDS_PER_MINUTE,
            seconds: rest % SECONDS_PER_MINUTE,
        }
    }
}

/// A mean trip time as whole minutes and seconds, truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeanDuration {
    pub minutes: i64,
    pub seconds: i64,
}

impl MeanDuration {
    pub fn from_seconds(mean: f64) -> Self {
        Self {
            minutes: (mean / SECONDS_PER_MINUTE as f64).trunc() as i64,
            seconds: (mean % SECONDS_PER_MINUTE as f64).trunc() as i64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationStats {
    pub total: TotalDuration,
    pub mean: Option<MeanDuration>,
}

impl DurationStats {
    pub fn compute(table: &TripTable) -> Result<Self> {
        let df = table.frame();
        let total = reduce(df, trip::TRIP_DURATION, Reduce::Sum)?.unwrap_or(0.0);
        let mean = reduce(df, trip::TRIP_DURATION, Reduce::Mean)?;

        Ok(Self {
            total: TotalDuration::from_seconds(total),
            mean: mean.map(MeanDuration::from_seconds),
        })
    }
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let TotalDuration {
            days,
            hours,
            minutes,
            seconds,
        } = self.total;
        writeln!(
            f,
            "Total Travel Time: {days} days, {hours} hours, {minutes} minutes, {seconds} seconds"
        )?;
        match self.mean {
            Some(MeanDuration { minutes, seconds }) => write!(
                f,
                "Average Trip duration: {minutes} minutes and {seconds} seconds"
            ),
            None => write!(f, "Average Trip duration: {UNAVAILABLE}"),
        }
    }
}

pub fn trip_duration_stats<W: Write>(table: &TripTable, out: &mut W) -> Result<DurationStats> {
    print_report(out, "Calculating Trip Duration...", 100, || {
        DurationStats::compute(table)
    })
}

// ── Users ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demographics {
    pub genders: Vec<(String, usize)>,
    pub earliest_birth: Option<i32>,
    pub latest_birth: Option<i32>,
    pub common_birth: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    /// `None` for cities whose data has no Gender or Birth Year.
    pub demographics: Option<Demographics>,
}

impl UserStats {
    pub fn compute(table: &TripTable) -> Result<Self> {
        let df = table.frame();
        let user_types = tally_str(df, trip::USER_TYPE)?;

        let demographics = if table.city().has_demographics() {
            let year = |op| -> Result<Option<i32>> {
                Ok(reduce(df, demographics::BIRTH_YEAR, op)?.map(|y| y as i32))
            };
            Some(Demographics {
                genders: tally_str(df, demographics::GENDER)?,
                earliest_birth: year(Reduce::Min)?,
                latest_birth: year(Reduce::Max)?,
                common_birth: mode_i32(df, demographics::BIRTH_YEAR)?,
            })
        } else {
            None
        };

        Ok(Self {
            user_types,
            demographics,
        })
    }
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = self
            .user_types
            .iter()
            .map(|(kind, count)| format!("{kind} : {count}"))
            .collect();

        if let Some(d) = &self.demographics {
            lines.extend(
                d.genders
                    .iter()
                    .map(|(gender, count)| format!("{gender} : {count}")),
            );
            lines.push(format!(
                "Earliest birth year: {}",
                OrUnavailable(&d.earliest_birth)
            ));
            lines.push(format!(
                "Most recent birth year: {}",
                OrUnavailable(&d.latest_birth)
            ));
            lines.push(format!(
                "Most common birth year: {}",
                OrUnavailable(&d.common_birth)
            ));
        }

        f.write_str(&lines.join("\n"))
    }
}

pub fn user_stats<W: Write>(table: &TripTable, out: &mut W) -> Result<UserStats> {
    print_report(out, "Calculating User Stats...", 80, || {
        UserStats::compute(table)
    })
}
