use std::path::Path;

use chrono::NaiveDate;

use crate::data::cache::DatasetCache;
use crate::data::pipeline::{DashboardViews, run_pipeline};
use crate::error::{LoadError, PipelineError};
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset source, loaded once and read-only afterwards.
    pub cache: DatasetCache,

    /// Date picker values. May be inverted; the pipeline validates them.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Picker values restored by "Reset".
    default_range: (NaiveDate, NaiveDate),

    /// Chart tables for the current selection (None when the pipeline failed).
    pub views: Option<DashboardViews>,

    /// Why `views` is None for this selection, shown in the side panel.
    pub pipeline_error: Option<PipelineError>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state around a dataset that has already been loaded.
    pub fn new(cache: DatasetCache, settings: &Settings) -> Self {
        let mut state = Self {
            cache,
            start_date: settings.start_date,
            end_date: settings.end_date,
            default_range: (settings.start_date, settings.end_date),
            views: None,
            pipeline_error: None,
            status_message: None,
        };
        state.refresh();
        state
    }

    /// Re-run the whole pipeline for the current picker values.
    pub fn refresh(&mut self) {
        let result = match self.cache.dataset() {
            Ok(ds) => run_pipeline(ds, self.start_date, self.end_date),
            Err(e) => {
                log::error!("{e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                self.views = None;
                return;
            }
        };

        match result {
            Ok(views) => {
                self.views = Some(views);
                self.pipeline_error = None;
            }
            Err(e) => {
                match &e {
                    PipelineError::Validation(v) => log::warn!("{v}"),
                    PipelineError::Mapping(m) => log::error!("{m}"),
                }
                self.views = None;
                self.pipeline_error = Some(e);
            }
        }
    }

    /// Update both bounds; recompute only when something changed.
    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) {
        if (start, end) != (self.start_date, self.end_date) {
            self.start_date = start;
            self.end_date = end;
            self.refresh();
        }
    }

    pub fn reset_range(&mut self) {
        let (start, end) = self.default_range;
        self.set_range(start, end);
    }

    /// Swap in the dataset at `path`. The current one stays if loading fails.
    pub fn open_dataset(&mut self, path: &Path) -> Result<(), LoadError> {
        let cache = DatasetCache::new(path);
        cache.dataset()?;
        self.cache = cache;
        self.status_message = None;
        self.refresh();
        Ok(())
    }

    /// Number of days in the loaded dataset.
    pub fn total_days(&self) -> usize {
        self.cache.dataset().map_or(0, |ds| ds.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write_csv(dir: &tempfile::TempDir, name: &str, rows: &[&str]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "dteday,weathersit,temp,cnt").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        path
    }

    fn state_for(path: PathBuf) -> AppState {
        let settings = Settings {
            data_path: path.clone(),
            start_date: day(2011, 1, 1),
            end_date: day(2012, 12, 31),
        };
        AppState::new(DatasetCache::new(path), &settings)
    }

    #[test]
    fn inverted_range_clears_views_until_fixed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "day.csv",
            &["2011-01-01,1,0.2,500", "2011-01-02,2,0.3,4000", "2011-01-03,1,0.4,7000"],
        );
        let mut state = state_for(path);
        assert_eq!(state.views.as_ref().unwrap().days_in_range, 3);

        state.set_range(day(2011, 1, 3), day(2011, 1, 1));
        assert!(state.views.is_none());
        assert!(matches!(state.pipeline_error, Some(PipelineError::Validation(_))));

        state.set_range(day(2011, 1, 2), day(2011, 1, 3));
        assert_eq!(state.views.as_ref().unwrap().days_in_range, 2);
        assert!(state.pipeline_error.is_none());

        state.reset_range();
        assert_eq!((state.start_date, state.end_date), (day(2011, 1, 1), day(2012, 12, 31)));
        assert_eq!(state.views.as_ref().unwrap().days_in_range, 3);
    }

    #[test]
    fn failed_open_keeps_the_current_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "day.csv", &["2011-01-01,1,0.2,500"]);
        let mut state = state_for(path.clone());

        let bad = write_csv(&dir, "bad.csv", &["not-a-date,1,0.2,500"]);
        assert!(state.open_dataset(&bad).is_err());
        assert_eq!(state.cache.path(), path.as_path());
        assert_eq!(state.total_days(), 1);

        let other = write_csv(&dir, "other.csv", &["2011-01-01,1,0.2,5", "2011-01-02,1,0.2,6"]);
        state.open_dataset(&other).unwrap();
        assert_eq!(state.total_days(), 2);
        assert_eq!(state.views.as_ref().unwrap().days_in_range, 2);
    }
}
