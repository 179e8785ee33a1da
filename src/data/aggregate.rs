use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::model::{LabeledRecord, RentalCategory, WeatherLabel};

// ---------------------------------------------------------------------------
// Aggregators: pure transforms over the filtered + mapped view
// ---------------------------------------------------------------------------
//
// None of these mutate their input; each returns a fresh table for one chart.

/// Total rentals for one weather label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherTotal {
    pub label: WeatherLabel,
    pub total: u64,
}

/// Sum rentals per weather label, largest total first.
///
/// Ties keep the order in which labels were first seen.
pub fn weather_impact(records: &[LabeledRecord]) -> Vec<WeatherTotal> {
    let mut totals: Vec<WeatherTotal> = Vec::new();
    for rec in records {
        match totals.iter_mut().find(|t| t.label == rec.weather) {
            Some(t) => t.total += rec.rental_count,
            None => totals.push(WeatherTotal {
                label: rec.weather,
                total: rec.rental_count,
            }),
        }
    }
    // `sort_by` is stable, which gives the first-seen tie-break.
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// One scatter point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperaturePoint {
    pub temperature: f64,
    pub rental_count: u64,
}

pub fn temperature_impact(records: &[LabeledRecord]) -> Vec<TemperaturePoint> {
    records
        .iter()
        .map(|rec| TemperaturePoint {
            temperature: rec.temperature,
            rental_count: rec.rental_count,
        })
        .collect()
}

/// Total rentals for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthTotal {
    pub year: i32,
    pub month: u32,
    pub total: u64,
}

impl MonthTotal {
    /// `YYYY-MM`, as used on the trend chart's x axis.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Sum rentals per year-month, chronologically ascending.
pub fn monthly_trend(records: &[LabeledRecord]) -> Vec<MonthTotal> {
    let mut by_month: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for rec in records {
        *by_month
            .entry((rec.date.year(), rec.date.month()))
            .or_default() += rec.rental_count;
    }
    by_month
        .into_iter()
        .map(|((year, month), total)| MonthTotal { year, month, total })
        .collect()
}

/// Number of days falling in one rental category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: RentalCategory,
    pub days: usize,
}

/// One day annotated with its rental category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorizedDay {
    pub date: NaiveDate,
    pub rental_count: u64,
    pub category: RentalCategory,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Binning {
    /// Always one entry per category, in Low, Medium, High order.
    pub counts: Vec<CategoryCount>,
    /// Per-day series in input order.
    pub series: Vec<CategorizedDay>,
}

impl Binning {
    pub fn count_of(&self, category: RentalCategory) -> usize {
        self.counts
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.days)
    }
}

/// Bucket every day into Low / Medium / High.
pub fn binning(records: &[LabeledRecord]) -> Binning {
    let series: Vec<CategorizedDay> = records
        .iter()
        .map(|rec| CategorizedDay {
            date: rec.date,
            rental_count: rec.rental_count,
            category: RentalCategory::from_count(rec.rental_count),
        })
        .collect();

    let counts = RentalCategory::ALL
        .iter()
        .map(|&category| CategoryCount {
            category,
            days: series.iter().filter(|d| d.category == category).count(),
        })
        .collect();

    Binning { counts, series }
}
