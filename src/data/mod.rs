/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset   (held by cache, loaded once)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  DateRange [start, end] → &Record view
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  mapper   │  weather code → WeatherLabel
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  weather / temperature / monthly / binning tables
///   └───────────┘
/// ```
///
/// `pipeline` chains filter → mapper → aggregate for one render cycle.

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod mapper;
pub mod model;
pub mod pipeline;
