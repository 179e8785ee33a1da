use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Date32Array, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{Dataset, Record};
use crate::error::LoadError;

pub const DATE_COLUMN: &str = "dteday";
pub const WEATHER_COLUMN: &str = "weathersit";
pub const TEMP_COLUMN: &str = "temp";
pub const COUNT_COLUMN: &str = "cnt";

/// Days between 0001-01-01 and 1970-01-01 (Arrow `Date32` epoch).
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a day-level bike-sharing dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least `dteday`, `weathersit`, `temp`, `cnt`
/// * `.json`    – `[{ "dteday": "2011-01-01", "weathersit": 1, ... }, ...]`,
///                `dteday` as a date string or epoch milliseconds
/// * `.parquet` – same four columns; `dteday` as Utf8 or Date32
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    load_any(path).map_err(|e| LoadError::new(path, e))
}

fn load_any(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Parse the "ISO-ish" date strings found in exported day tables.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    bail!("'{s}' is not a date")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one row per day.
/// Columns other than the four required ones are ignored.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let date_idx = column(DATE_COLUMN)?;
    let weather_idx = column(WEATHER_COLUMN)?;
    let temp_idx = column(TEMP_COLUMN)?;
    let count_idx = column(COUNT_COLUMN)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| row.get(idx).unwrap_or("").trim();

        let date = parse_date(field(date_idx))
            .with_context(|| format!("CSV row {row_no}: bad '{DATE_COLUMN}'"))?;
        let weather_code = field(weather_idx)
            .parse::<i64>()
            .with_context(|| format!("CSV row {row_no}: bad '{WEATHER_COLUMN}'"))?;
        let temperature = field(temp_idx)
            .parse::<f64>()
            .with_context(|| format!("CSV row {row_no}: bad '{TEMP_COLUMN}'"))?;
        let rental_count = field(count_idx)
            .parse::<u64>()
            .with_context(|| format!("CSV row {row_no}: bad '{COUNT_COLUMN}'"))?;

        records.push(Record {
            date,
            weather_code,
            temperature,
            rental_count,
        });
    }

    Ok(Dataset::new(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct JsonRow {
    dteday: JsonDate,
    weathersit: i64,
    temp: f64,
    cnt: u64,
}

/// pandas writes datetime columns as epoch milliseconds unless
/// `date_format="iso"` is given; plain string columns stay text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonDate {
    EpochMillis(i64),
    Text(String),
}

impl JsonDate {
    fn to_date(&self) -> Result<NaiveDate> {
        match self {
            JsonDate::EpochMillis(ms) => DateTime::<Utc>::from_timestamp_millis(*ms)
                .map(|dt| dt.date_naive())
                .with_context(|| format!("{ms} is out of range for an epoch timestamp")),
            JsonDate::Text(s) => parse_date(s),
        }
    }
}

fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<JsonRow> = serde_json::from_str(&text).context("parsing JSON")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let date = row
                .dteday
                .to_date()
                .with_context(|| format!("Row {i}: bad '{DATE_COLUMN}'"))?;
            Ok(Record {
                date,
                weather_code: row.weathersit,
                temperature: row.temp,
                rental_count: row.cnt,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Dataset::new(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by **Pandas** (`df.to_parquet()`),
/// **Polars** (`df.write_parquet()`) or the bundled `generate_sample` binary.
///
/// Expected schema:
/// - `dteday`: Utf8 / LargeUtf8 date strings or Date32
/// - `weathersit`, `cnt`: Int32 or Int64
/// - `temp`: Float32 or Float64
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &str| {
            schema
                .index_of(name)
                .map(|idx| batch.column(idx))
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };
        let date_col = column(DATE_COLUMN)?;
        let weather_col = column(WEATHER_COLUMN)?;
        let temp_col = column(TEMP_COLUMN)?;
        let count_col = column(COUNT_COLUMN)?;

        for row in 0..batch.num_rows() {
            let date = extract_date(date_col, row)
                .with_context(|| format!("Row {row}: failed to read '{DATE_COLUMN}'"))?;
            let weather_code = extract_i64(weather_col, row)
                .with_context(|| format!("Row {row}: failed to read '{WEATHER_COLUMN}'"))?;
            let temperature = extract_f64(temp_col, row)
                .with_context(|| format!("Row {row}: failed to read '{TEMP_COLUMN}'"))?;
            let count = extract_i64(count_col, row)
                .with_context(|| format!("Row {row}: failed to read '{COUNT_COLUMN}'"))?;
            let rental_count = u64::try_from(count)
                .with_context(|| format!("Row {row}: negative rental count {count}"))?;

            records.push(Record {
                date,
                weather_code,
                temperature,
                rental_count,
            });
        }
    }

    Ok(Dataset::new(records))
}

// -- Parquet / Arrow helpers --

fn extract_date(col: &Arc<dyn Array>, row: usize) -> Result<NaiveDate> {
    if col.is_null(row) {
        bail!("null date");
    }
    match col.data_type() {
        DataType::Date32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Date32Array>()
                .context("expected Date32Array")?;
            NaiveDate::from_num_days_from_ce_opt(arr.value(row) + UNIX_EPOCH_DAYS_FROM_CE)
                .context("Date32 value out of range")
        }
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            parse_date(arr.value(row))
        }
        DataType::LargeUtf8 => parse_date(col.as_string::<i64>().value(row)),
        other => bail!("Expected Utf8 or Date32 column, got {other:?}"),
    }
}

fn extract_i64(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        other => bail!("Expected Int32 or Int64 column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        other => bail!("Expected Float32 or Float64 column, got {other:?}"),
    }
}
