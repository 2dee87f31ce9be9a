use chrono::naive::NaiveDate;
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::error::CliError;
use crate::CliResult;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date {
    value: NaiveDate,
}

impl Default for Date {
    fn default() -> Self {
        Date::today()
    }
}

impl From<Date> for NaiveDate {
    fn from(source: Date) -> NaiveDate {
        source.value
    }
}

impl From<NaiveDate> for Date {
    fn from(value: NaiveDate) -> Date {
        Date { value }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for Date {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s)
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        Date::parse(&s).map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid format for date: {} (only accept %Y-%m-%d)",
                s
            ))
        })
    }
}

impl Date {
    pub fn today() -> Date {
        Local::now().date_naive().into()
    }

    pub fn month(self) -> Month {
        Month {
            year: self.value.year(),
            month: self.value.month(),
        }
    }

    pub fn parse(value: &str) -> CliResult<Date> {
        match value.trim() {
            "" => Ok(Date::today()),
            val => Ok(NaiveDate::parse_from_str(val, "%Y-%m-%d")?.into()),
        }
    }
}

/// Calendar month, the key of a monthly budget.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Default for Month {
    fn default() -> Self {
        Month::current()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for Month {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::parse(s)
    }
}

impl Serialize for Month {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        Month::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl Month {
    pub fn current() -> Month {
        Date::today().month()
    }

    pub fn new(year: i32, month: u32) -> CliResult<Month> {
        match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(_) => Ok(Month { year, month }),
            None => Err(CliError::InvalidMonth {
                value: format!("{}-{}", year, month),
            }),
        }
    }

    pub fn parse(value: &str) -> CliResult<Month> {
        let invalid = || CliError::InvalidMonth {
            value: value.to_string(),
        };

        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;

        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;

        Month::new(year, month).map_err(|_| invalid())
    }

    pub fn contains(self, date: Date) -> bool {
        date.month() == self
    }
}
