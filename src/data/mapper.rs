use super::model::{LabeledRecord, Record, WeatherLabel};
use crate::error::MappingError;

/// Replace raw weather codes by their labels.
///
/// Fails on the first record whose code is outside {1, 2, 3}.
pub fn map_weather(records: &[&Record]) -> Result<Vec<LabeledRecord>, MappingError> {
    records
        .iter()
        .map(|rec| {
            let weather = WeatherLabel::from_code(rec.weather_code).ok_or(MappingError {
                date: rec.date,
                code: rec.weather_code,
            })?;
            Ok(LabeledRecord {
                date: rec.date,
                weather,
                temperature: rec.temperature,
                rental_count: rec.rental_count,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(d: u32, code: i64) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2011, 3, d).unwrap(),
            weather_code: code,
            temperature: 0.41,
            rental_count: 1000 + d as u64,
        }
    }

    #[test]
    fn maps_every_known_code_and_keeps_other_fields() {
        let recs = [record(1, 1), record(2, 2), record(3, 3)];
        let refs: Vec<&Record> = recs.iter().collect();
        let out = map_weather(&refs).unwrap();
        let labels: Vec<WeatherLabel> = out.iter().map(|r| r.weather).collect();
        assert_eq!(
            labels,
            vec![
                WeatherLabel::ClearPartlyCloudy,
                WeatherLabel::MistCloudy,
                WeatherLabel::LightRainSnow
            ]
        );
        assert_eq!(out[1].rental_count, 1002);
        assert_eq!(out[2].date, recs[2].date);
        assert_eq!(out[0].temperature, 0.41);
    }

    #[test]
    fn unknown_code_fails_fast() {
        let recs = [record(1, 1), record(2, 4), record(3, 0)];
        let refs: Vec<&Record> = recs.iter().collect();
        let err = map_weather(&refs).unwrap_err();
        assert_eq!(err.code, 4);
        assert_eq!(err.date, recs[1].date);
    }

    #[test]
    fn empty_input_maps_to_empty_output() {
        assert!(map_weather(&[]).unwrap().is_empty());
    }
}
