use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types shared by the data layer and the UI
// ---------------------------------------------------------------------------

/// The dataset file could not be opened or parsed. Fatal at startup.
#[derive(Debug, Error)]
#[error("failed to load dataset {}: {cause:#}", path.display())]
pub struct LoadError {
    pub path: PathBuf,
    /// Context chain from the format-specific reader.
    pub cause: anyhow::Error,
}

impl LoadError {
    pub fn new(path: impl Into<PathBuf>, cause: anyhow::Error) -> Self {
        Self {
            path: path.into(),
            cause,
        }
    }
}

/// The user picked a start date after the end date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("start date {start} is after end date {end}")]
pub struct ValidationError {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A record carries a weather code outside {1, 2, 3}.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record dated {date} has unknown weather code {code}")]
pub struct MappingError {
    pub date: NaiveDate,
    pub code: i64,
}

/// Anything that stops one render cycle of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_message_carries_context_chain() {
        let inner = anyhow::anyhow!("no such column").context("reading CSV headers");
        let err = LoadError::new("data/day.csv", inner);
        assert_eq!(
            err.to_string(),
            "failed to load dataset data/day.csv: reading CSV headers: no such column"
        );
    }

    #[test]
    fn pipeline_error_is_transparent() {
        let start = NaiveDate::from_ymd_opt(2012, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2012, 1, 1).unwrap();
        let err = PipelineError::from(ValidationError { start, end });
        assert_eq!(err.to_string(), "start date 2012-01-02 is after end date 2012-01-01");
    }
}
