use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Record – one row of the day-level dataset
// ---------------------------------------------------------------------------

/// One day's observation.
///
/// `weather_code` is kept raw here; translation to a [`WeatherLabel`] happens
/// in the mapper so that unknown codes surface as a pipeline error instead of
/// a load failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub weather_code: i64,
    /// Normalised temperature as stored in the source file.
    pub temperature: f64,
    pub rental_count: u64,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All records in file order. Assumed sorted by date with one row per day.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    /// Number of records (days).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last date, taken from the first and last row.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((first.date, last.date))
    }
}

// ---------------------------------------------------------------------------
// DateRange – inclusive user-supplied bounds
// ---------------------------------------------------------------------------

/// Inclusive `[start, end]` bounds. Only constructible with `start <= end`
/// through `DateRange::new` in the filter module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
}

impl DateRange {
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// ---------------------------------------------------------------------------
// WeatherLabel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeatherLabel {
    ClearPartlyCloudy,
    MistCloudy,
    LightRainSnow,
}

impl WeatherLabel {
    /// Total over {1, 2, 3}; anything else has no label.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(WeatherLabel::ClearPartlyCloudy),
            2 => Some(WeatherLabel::MistCloudy),
            3 => Some(WeatherLabel::LightRainSnow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherLabel::ClearPartlyCloudy => "Clear/Partly Cloudy",
            WeatherLabel::MistCloudy => "Mist/Cloudy",
            WeatherLabel::LightRainSnow => "Light Rain/Snow",
        }
    }
}

impl fmt::Display for WeatherLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record after categorical mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRecord {
    pub date: NaiveDate,
    pub weather: WeatherLabel,
    pub temperature: f64,
    pub rental_count: u64,
}

// ---------------------------------------------------------------------------
// RentalCategory – fixed-threshold binning of rental counts
// ---------------------------------------------------------------------------

/// Lower edge of [`RentalCategory::Medium`].
pub const MEDIUM_THRESHOLD: u64 = 3000;
/// Lower edge of [`RentalCategory::High`].
pub const HIGH_THRESHOLD: u64 = 6000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RentalCategory {
    Low,
    Medium,
    High,
}

impl RentalCategory {
    pub const ALL: [RentalCategory; 3] = [
        RentalCategory::Low,
        RentalCategory::Medium,
        RentalCategory::High,
    ];

    /// `[0, 3000) → Low`, `[3000, 6000) → Medium`, `[6000, ∞) → High`.
    pub fn from_count(count: u64) -> Self {
        if count >= HIGH_THRESHOLD {
            RentalCategory::High
        } else if count >= MEDIUM_THRESHOLD {
            RentalCategory::Medium
        } else {
            RentalCategory::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RentalCategory::Low => "Low",
            RentalCategory::Medium => "Medium",
            RentalCategory::High => "High",
        }
    }
}

impl fmt::Display for RentalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn category_boundaries_are_inclusive_on_the_lower_edge() {
        assert_eq!(RentalCategory::from_count(0), RentalCategory::Low);
        assert_eq!(RentalCategory::from_count(2999), RentalCategory::Low);
        assert_eq!(RentalCategory::from_count(3000), RentalCategory::Medium);
        assert_eq!(RentalCategory::from_count(5999), RentalCategory::Medium);
        assert_eq!(RentalCategory::from_count(6000), RentalCategory::High);
        assert_eq!(RentalCategory::from_count(u64::MAX), RentalCategory::High);
    }

    #[test]
    fn weather_codes_map_to_labels() {
        assert_eq!(
            WeatherLabel::from_code(1).map(|l| l.as_str()),
            Some("Clear/Partly Cloudy")
        );
        assert_eq!(WeatherLabel::from_code(2), Some(WeatherLabel::MistCloudy));
        assert_eq!(WeatherLabel::from_code(3).unwrap().to_string(), "Light Rain/Snow");
        assert_eq!(WeatherLabel::from_code(0), None);
        assert_eq!(WeatherLabel::from_code(4), None);
    }

    #[test]
    fn span_uses_first_and_last_rows() {
        let rec = |date| Record {
            date,
            weather_code: 1,
            temperature: 0.3,
            rental_count: 100,
        };
        let ds = Dataset::new(vec![rec(day(2011, 1, 1)), rec(day(2011, 1, 2)), rec(day(2011, 1, 5))]);
        assert_eq!(ds.span(), Some((day(2011, 1, 1), day(2011, 1, 5))));
        assert_eq!(Dataset::default().span(), None);
    }
}
