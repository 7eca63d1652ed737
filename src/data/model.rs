use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

// ---------------------------------------------------------------------------
// RaceTime – a climb time read as a time of day
// ---------------------------------------------------------------------------

/// A `MM:SS` race time, held as a time of day so that ordering and
/// formatting follow clock semantics (minutes and seconds both 0–59).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RaceTime(NaiveTime);

impl RaceTime {
    /// Build from seconds since midnight. Returns `None` past one day.
    pub fn from_secs(secs: u32) -> Option<Self> {
        NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).map(RaceTime)
    }

    /// Seconds since midnight.
    pub fn as_secs(&self) -> u32 {
        self.0.num_seconds_from_midnight()
    }
}

impl FromStr for RaceTime {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        // chrono needs an hour field; race times always sit in hour zero.
        let padded = format!("00:{}", s.trim());
        let time = NaiveTime::parse_from_str(&padded, "%H:%M:%S")
            .map_err(|_| ChartError::UnparsableTime(s.to_string()))?;
        // %S admits a leap second (":60"), which is not a valid race time.
        if time.nanosecond() >= 1_000_000_000 {
            return Err(ChartError::UnparsableTime(s.to_string()));
        }
        Ok(RaceTime(time))
    }
}

impl fmt::Display for RaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%M:%S"))
    }
}

// ---------------------------------------------------------------------------
// Record – one rider's climb
// ---------------------------------------------------------------------------

/// A single row of the input dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Nationality")]
    pub nationality: String,
    #[serde(rename = "Year")]
    pub year: i32,
    /// Raw `MM:SS` text, parsed when the dataset is assembled.
    #[serde(rename = "Time")]
    pub time: String,
    /// Empty means no allegation.
    #[serde(rename = "Doping", default)]
    pub doping: String,
    #[serde(rename = "Seconds", default)]
    pub seconds: Option<u32>,
    #[serde(rename = "Place", default)]
    pub place: Option<u32>,
    #[serde(rename = "URL", default)]
    pub url: Option<String>,
}

impl Record {
    pub fn has_allegation(&self) -> bool {
        !self.doping.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete validated dataset
// ---------------------------------------------------------------------------

/// Records together with their parsed race times. Built once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    times: Vec<RaceTime>,
}

impl Dataset {
    /// Validate records and parse every `Time` up front.
    ///
    /// Fails on an empty input (no axis domain exists) or on the first
    /// record whose time is not `MM:SS`.
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        if records.is_empty() {
            return Err(ChartError::EmptyDataset);
        }

        let times = records
            .iter()
            .enumerate()
            .map(|(row, rec)| {
                rec.time.parse::<RaceTime>().map_err(|_| ChartError::InvalidTime {
                    row,
                    value: rec.time.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some((row, rec)) = records
            .iter()
            .enumerate()
            .find(|(i, rec)| rec.seconds.is_some_and(|s| s != times[*i].as_secs()))
        {
            log::warn!(
                "Row {row}: Seconds={:?} disagrees with Time={}; using Time",
                rec.seconds,
                rec.time
            );
        }

        Ok(Dataset { records, times })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, idx: usize) -> Option<&Record> {
        self.records.get(idx)
    }

    pub fn time(&self, idx: usize) -> Option<RaceTime> {
        self.times.get(idx).copied()
    }

    /// Records paired with their parsed times, in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&Record, RaceTime)> {
        self.records.iter().zip(self.times.iter().copied())
    }

    /// `(min, max)` of the `Year` field.
    pub fn year_extent(&self) -> (i32, i32) {
        self.records
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), r| (lo.min(r.year), hi.max(r.year)))
    }

    /// `(min, max)` of the parsed race times.
    pub fn time_extent(&self) -> (RaceTime, RaceTime) {
        let first = self.times[0];
        self.times
            .iter()
            .fold((first, first), |(lo, hi), &t| (lo.min(t), hi.max(t)))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, time: &str, doping: &str) -> Record {
        Record {
            name: format!("Rider {year}"),
            nationality: "FRA".to_string(),
            year,
            time: time.to_string(),
            doping: doping.to_string(),
            seconds: None,
            place: None,
            url: None,
        }
    }

    #[test]
    fn race_time_parses_and_formats() {
        let t: RaceTime = "36:50".parse().unwrap();
        assert_eq!(t.as_secs(), 36 * 60 + 50);
        assert_eq!(t.to_string(), "36:50");

        let short: RaceTime = "5:07".parse().unwrap();
        assert_eq!(short.to_string(), "05:07");
    }

    #[test]
    fn race_time_rejects_garbage() {
        assert!("".parse::<RaceTime>().is_err());
        assert!("abc".parse::<RaceTime>().is_err());
        assert!("36:50:10".parse::<RaceTime>().is_err());
        assert!("75:00".parse::<RaceTime>().is_err());
        assert!("36:60".parse::<RaceTime>().is_err());
    }

    #[test]
    fn leap_second_time_fails_dataset() {
        let err = Dataset::from_records(vec![record(1994, "36:60", "")]).unwrap_err();
        assert!(matches!(err, ChartError::InvalidTime { row: 0, .. }));
    }

    #[test]
    fn race_times_order_by_clock() {
        let a: RaceTime = "35:10".parse().unwrap();
        let b: RaceTime = "36:40".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn dataset_extents_are_exact() {
        let ds = Dataset::from_records(vec![
            record(1994, "36:40", ""),
            record(2015, "35:10", "Admitted doping"),
            record(2001, "38:02", ""),
        ])
        .unwrap();

        assert_eq!(ds.year_extent(), (1994, 2015));
        let (lo, hi) = ds.time_extent();
        assert_eq!(lo.to_string(), "35:10");
        assert_eq!(hi.to_string(), "38:02");
    }

    #[test]
    fn dataset_rejects_empty_input() {
        assert!(matches!(
            Dataset::from_records(Vec::new()),
            Err(ChartError::EmptyDataset)
        ));
    }

    #[test]
    fn dataset_reports_bad_time_row() {
        let err = Dataset::from_records(vec![
            record(1994, "36:40", ""),
            record(1995, "36-50", ""),
        ])
        .unwrap_err();

        match err {
            ChartError::InvalidTime { row, value } => {
                assert_eq!(row, 1);
                assert_eq!(value, "36-50");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn allegation_is_non_empty_doping() {
        assert!(!record(1994, "36:40", "").has_allegation());
        assert!(record(1994, "36:40", "Admitted doping").has_allegation());
    }
}
