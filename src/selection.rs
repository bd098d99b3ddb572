//! The three categorical choices a session is filtered by.
//!
//! Parsing is case-insensitive and accepts exactly the values offered at the
//! prompts; anything else is an [`BikeshareError::UnknownChoice`].

use std::fmt;
use std::str::FromStr;

use chrono::{Month, Weekday};

use crate::error::BikeshareError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

/// City → data file, relative to the loader's data directory.
pub const CITY_DATA: [(City, &str); 3] = [
    (City::Chicago, "chicago.csv"),
    (City::NewYorkCity, "new_york_city.csv"),
    (City::Washington, "washington.csv"),
];

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase key typed at the prompt.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    pub fn file_name(self) -> &'static str {
        CITY_DATA
            .iter()
            .find(|(city, _)| *city == self)
            .map(|(_, file)| *file)
            .unwrap_or_default()
    }

    /// Whether the city's file carries Gender and Birth Year.
    pub fn has_demographics(self) -> bool {
        !matches!(self, City::Washington)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_lowercase();
        City::ALL
            .into_iter()
            .find(|city| city.key() == key)
            .ok_or(BikeshareError::UnknownChoice {
                kind: "city",
                value: s.to_string(),
            })
    }
}

/// Months covered by the data, in calendar order.
const MONTHS: [(&str, Month); 6] = [
    ("january", Month::January),
    ("february", Month::February),
    ("march", Month::March),
    ("april", Month::April),
    ("may", Month::May),
    ("june", Month::June),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Only(Month),
}

impl MonthFilter {
    /// 1-based month number to compare against the derived `month` column.
    pub fn number(self) -> Option<i32> {
        match self {
            MonthFilter::All => None,
            MonthFilter::Only(month) => Some(month.number_from_month() as i32),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Only(month) => f.write_str(month.name()),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_lowercase();
        if key == "all" {
            return Ok(MonthFilter::All);
        }
        MONTHS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, month)| MonthFilter::Only(*month))
            .ok_or(BikeshareError::UnknownChoice {
                kind: "month",
                value: s.to_string(),
            })
    }
}

const DAYS: [(&str, &str, Weekday); 7] = [
    ("monday", "Monday", Weekday::Mon),
    ("tuesday", "Tuesday", Weekday::Tue),
    ("wednesday", "Wednesday", Weekday::Wed),
    ("thursday", "Thursday", Weekday::Thu),
    ("friday", "Friday", Weekday::Fri),
    ("saturday", "Saturday", Weekday::Sat),
    ("sunday", "Sunday", Weekday::Sun),
];

/// Full English weekday name, as stored in the derived `day_of_week` column.
pub fn weekday_name(day: Weekday) -> &'static str {
    DAYS.iter()
        .find(|(_, _, weekday)| *weekday == day)
        .map(|(_, title, _)| *title)
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl DayFilter {
    /// Title-cased name to compare against the derived `day_of_week` column.
    pub fn title(self) -> Option<&'static str> {
        match self {
            DayFilter::All => None,
            DayFilter::Only(day) => Some(weekday_name(day)),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title().unwrap_or("all"))
    }
}

impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_lowercase();
        if key == "all" {
            return Ok(DayFilter::All);
        }
        DAYS.iter()
            .find(|(name, _, _)| *name == key)
            .map(|(_, _, day)| DayFilter::Only(*day))
            .ok_or(BikeshareError::UnknownChoice {
                kind: "day",
                value: s.to_string(),
            })
    }
}

/// A validated (city, month, day) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }

    /// Whole city, no month or day restriction.
    pub fn unfiltered(city: City) -> Self {
        Self::new(city, MonthFilter::All, DayFilter::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_keys_are_case_insensitive() {
        assert_eq!("Chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!("NEW YORK CITY".parse::<City>().unwrap(), City::NewYorkCity);
        assert_eq!("washington".parse::<City>().unwrap(), City::Washington);
    }

    #[test]
    fn test_city_rejects_unknown_and_partial_names() {
        for bad in ["boston", "new york", "", " chicago", "chicago "] {
            assert!(bad.parse::<City>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_city_file_mapping() {
        assert_eq!(City::Chicago.file_name(), "chicago.csv");
        assert_eq!(City::NewYorkCity.file_name(), "new_york_city.csv");
        assert_eq!(City::Washington.file_name(), "washington.csv");
        assert!(!City::Washington.has_demographics());
        assert!(City::NewYorkCity.has_demographics());
    }

    #[test]
    fn test_month_number_is_index_plus_one() {
        let expected = [
            ("january", 1),
            ("february", 2),
            ("march", 3),
            ("april", 4),
            ("may", 5),
            ("june", 6),
        ];
        for (name, number) in expected {
            let filter: MonthFilter = name.parse().unwrap();
            assert_eq!(filter.number(), Some(number));
        }
        assert_eq!("ALL".parse::<MonthFilter>().unwrap().number(), None);
    }

    #[test]
    fn test_month_outside_data_range_is_rejected() {
        for bad in ["july", "december", "jan", "1"] {
            assert!(bad.parse::<MonthFilter>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_day_title_case() {
        assert_eq!("monday".parse::<DayFilter>().unwrap().title(), Some("Monday"));
        assert_eq!("SUNDAY".parse::<DayFilter>().unwrap().title(), Some("Sunday"));
        assert_eq!("all".parse::<DayFilter>().unwrap(), DayFilter::All);
        assert!("mon".parse::<DayFilter>().is_err());
        assert!("someday".parse::<DayFilter>().is_err());
    }
}
