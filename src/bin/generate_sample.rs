use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;

/// One synthetic day, laid out like the UCI bike-sharing `day.csv`.
struct Day {
    date: NaiveDate,
    weathersit: i64,
    temp: f64,
    cnt: i64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn generate_days(first: NaiveDate, last: NaiveDate, rng: &mut SimpleRng) -> Vec<Day> {
    first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|date| {
            // Seasonal temperature peaking mid-July, normalised to roughly 0..1.
            let phase = (date.ordinal() as f64 - 200.0) / 365.0 * 2.0 * std::f64::consts::PI;
            let temp = (0.5 + 0.3 * phase.cos() + rng.gauss(0.0, 0.05)).clamp(0.05, 0.95);

            let roll = rng.next_f64();
            let weathersit = if roll < 0.63 {
                1
            } else if roll < 0.97 {
                2
            } else {
                3
            };
            let weather_factor = match weathersit {
                1 => 1.0,
                2 => 0.82,
                _ => 0.4,
            };

            // Second year grows, as in the real data.
            let growth = if date.year() > first.year() { 1.6 } else { 1.0 };
            let base = 1200.0 + 5200.0 * temp;
            let cnt = (base * weather_factor * growth + rng.gauss(0.0, 450.0))
                .round()
                .max(22.0) as i64;

            Day {
                date,
                weathersit,
                temp,
                cnt,
            }
        })
        .collect()
}

fn write_csv(path: &Path, days: &[Day]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(["instant", "dteday", "weathersit", "temp", "cnt"])?;
    for (i, d) in days.iter().enumerate() {
        writer.write_record([
            (i + 1).to_string(),
            d.date.format("%Y-%m-%d").to_string(),
            d.weathersit.to_string(),
            format!("{:.6}", d.temp),
            d.cnt.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, days: &[Day]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("dteday", DataType::Utf8, false),
        Field::new("weathersit", DataType::Int64, false),
        Field::new("temp", DataType::Float64, false),
        Field::new("cnt", DataType::Int64, false),
    ]));

    let dates: Vec<String> = days.iter().map(|d| d.date.to_string()).collect();
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                dates.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                days.iter().map(|d| d.weathersit).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                days.iter().map(|d| d.temp).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                days.iter().map(|d| d.cnt).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let first = NaiveDate::from_ymd_opt(2011, 1, 1).context("invalid start date")?;
    let last = NaiveDate::from_ymd_opt(2012, 12, 31).context("invalid end date")?;
    let days = generate_days(first, last, &mut rng);

    let out_dir = Path::new("data");
    std::fs::create_dir_all(out_dir).context("creating data directory")?;
    write_csv(&out_dir.join("day.csv"), &days)?;
    write_parquet(&out_dir.join("day.parquet"), &days)?;

    println!(
        "Wrote {} days ({first} … {last}) to data/day.csv and data/day.parquet",
        days.len()
    );
    Ok(())
}
