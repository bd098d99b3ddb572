use std::path::{Path, PathBuf};

use log::{debug, info};
use polars::datatypes::TimeUnit;
use polars::prelude::StrptimeOptions;
use polars::prelude::*;

use crate::error::{BikeshareError, Result};
use crate::schema::*;
use crate::selection::{City, DayFilter, FilterSelection, MonthFilter};

/// Trips for one city, with the derived `month` and `day_of_week` columns.
#[derive(Debug, Clone)]
pub struct TripTable {
    city: City,
    frame: DataFrame,
}

impl TripTable {
    pub fn new(city: City, frame: DataFrame) -> Self {
        Self { city, frame }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }
}

/// Reads city files from a data directory.
pub struct TripLoader {
    data_dir: PathBuf,
}

impl TripLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the selected city's trips and apply the month and day filters.
    pub fn load(&self, selection: &FilterSelection) -> Result<TripTable> {
        let frame = self.load_city(selection.city)?;
        let loaded = frame.height();

        let frame = apply_filters(frame, selection.month, selection.day)?;
        info!(
            "{}: {} of {} trips match month={} day={}",
            selection.city,
            frame.height(),
            loaded,
            selection.month,
            selection.day
        );
        Ok(TripTable::new(selection.city, frame))
    }

    // ── Data loading ────────────────────────────────────────────────────────

    /// Load a city file unfiltered.
    ///
    /// Required columns: Start Time, End Time, Trip Duration, Start Station,
    /// End Station, User Type; plus Gender and Birth Year where the city has them.
    /// Start Time is parsed as datetime (%Y-%m-%d %H:%M:%S), Trip Duration as
    /// float seconds and Birth Year as an integer year. All other columns are
    /// preserved as strings.
    pub fn load_city(&self, city: City) -> Result<DataFrame> {
        let path = self.data_dir.join(city.file_name());
        if !path.is_file() {
            return Err(BikeshareError::DataFileNotFound(path));
        }
        debug!("reading {}", path.display());

        let raw = read_csv_as_strings(&path)?;
        require_columns(&raw, &trip::REQUIRED)?;
        if city.has_demographics() {
            require_columns(&raw, &demographics::ALL)?;
        }

        let df = parse_datetime_column(raw, trip::START_TIME, TIMESTAMP_FORMAT)?;

        let mut lazy = df.lazy().with_columns([parse_float(trip::TRIP_DURATION)]);
        if city.has_demographics() {
            lazy = lazy.with_columns([
                parse_float(demographics::BIRTH_YEAR).strict_cast(DataType::Int32)
            ]);
        }

        let df = lazy
            .with_columns([
                col(trip::START_TIME)
                    .dt()
                    .month()
                    .cast(DataType::Int32)
                    .alias(derived::MONTH),
                col(trip::START_TIME)
                    .dt()
                    .strftime("%A")
                    .alias(derived::DAY_OF_WEEK),
            ])
            .collect()?;

        debug!("{city}: loaded {} trips", df.height());
        Ok(df)
    }
}

// ── Filtering ───────────────────────────────────────────────────────────────

/// Keep rows whose derived month and weekday match the filters.
pub fn apply_filters(df: DataFrame, month: MonthFilter, day: DayFilter) -> Result<DataFrame> {
    let mut lazy = df.lazy();

    if let Some(number) = month.number() {
        lazy = lazy.filter(col(derived::MONTH).eq(lit(number)));
    }
    if let Some(title) = day.title() {
        debug!("filtering {} by {title}", derived::DAY_OF_WEEK);
        lazy = lazy.filter(col(derived::DAY_OF_WEEK).eq(lit(title)));
    }

    Ok(lazy.collect()?)
}

// ── Parse helpers ───────────────────────────────────────────────────────────

/// Read a CSV with every column as String and trimmed header names.
fn read_csv_as_strings(path: &Path) -> Result<DataFrame> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let trimmed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    df.set_column_names(trimmed.as_slice())?;

    Ok(df)
}

fn require_columns(df: &DataFrame, required: &[&str]) -> Result<()> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(BikeshareError::MissingColumn(col_name.to_string()));
        }
    }
    Ok(())
}

/// Parse a string column to Datetime. Any unparseable value is an error.
fn parse_datetime_column(df: DataFrame, column: &str, format: &str) -> Result<DataFrame> {
    let df = df
        .lazy()
        .with_columns([col(column)
            .str()
            .strip_chars(lit(" \t\r\n"))
            .str()
            .to_datetime(
                Some(TimeUnit::Microseconds),
                None,
                StrptimeOptions {
                    format: Some(format.into()),
                    strict: true,
                    ..Default::default()
                },
                lit("raise"),
            )])
        .collect()?;
    Ok(df)
}

/// Trimmed string column cast to Float64. Empty cells stay null; any other
/// unparseable value is an error.
fn parse_float(column: &str) -> Expr {
    col(column)
        .str()
        .strip_chars(lit(" \t\r\n"))
        .strict_cast(DataType::Float64)
}
