use chrono::NaiveDate;

use super::aggregate::{
    self, Binning, MonthTotal, TemperaturePoint, WeatherTotal,
};
use super::filter::filter_by_range;
use super::mapper::map_weather;
use super::model::{DateRange, Dataset};
use crate::error::PipelineError;

/// Everything the central panel draws for one date selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardViews {
    pub days_in_range: usize,
    pub weather: Vec<WeatherTotal>,
    pub temperature: Vec<TemperaturePoint>,
    pub monthly: Vec<MonthTotal>,
    pub binning: Binning,
}

impl DashboardViews {
    pub fn is_empty(&self) -> bool {
        self.days_in_range == 0
    }
}

/// Validate → filter → map → aggregate. Recomputed from scratch on every call.
pub fn run_pipeline(
    dataset: &Dataset,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<DashboardViews, PipelineError> {
    let range = DateRange::new(start, end)?;
    let filtered = filter_by_range(dataset, &range);
    let labeled = map_weather(&filtered)?;

    log::debug!(
        "pipeline {}..={}: {} of {} days in range",
        range.start(),
        range.end(),
        labeled.len(),
        dataset.len()
    );

    Ok(DashboardViews {
        days_in_range: labeled.len(),
        weather: aggregate::weather_impact(&labeled),
        temperature: aggregate::temperature_impact(&labeled),
        monthly: aggregate::monthly_trend(&labeled),
        binning: aggregate::binning(&labeled),
    })
}
