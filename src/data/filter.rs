use chrono::NaiveDate;

use super::model::{DateRange, Dataset, Record};
use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Range filter: inclusive [start, end] over record dates
// ---------------------------------------------------------------------------

impl DateRange {
    /// Validate user input. Bounds are never swapped or clamped.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError { start, end });
        }
        Ok(DateRange { start, end })
    }
}

/// Return the records whose date lies within `range`, in dataset order.
///
/// Bounds outside the dataset's span are accepted and simply match nothing.
pub fn filter_by_range<'a>(dataset: &'a Dataset, range: &DateRange) -> Vec<&'a Record> {
    dataset
        .records
        .iter()
        .filter(|rec| range.contains(rec.date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dataset_from(first: NaiveDate, days: u32) -> Dataset {
        let records = first
            .iter_days()
            .take(days as usize)
            .enumerate()
            .map(|(i, date)| Record {
                date,
                weather_code: (i % 3) as i64 + 1,
                temperature: 0.2,
                rental_count: (i as u64) * 37,
            })
            .collect();
        Dataset::new(records)
    }

    #[test]
    fn rejects_start_after_end() {
        let err = DateRange::new(day(2012, 5, 2), day(2012, 5, 1)).unwrap_err();
        assert_eq!(err.start, day(2012, 5, 2));
        assert_eq!(err.end, day(2012, 5, 1));
    }

    #[test]
    fn single_day_range_is_valid() {
        let ds = dataset_from(day(2011, 1, 1), 10);
        let range = DateRange::new(day(2011, 1, 4), day(2011, 1, 4)).unwrap();
        let out = filter_by_range(&ds, &range);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, day(2011, 1, 4));
    }

    #[test]
    fn bounds_are_inclusive() {
        let ds = dataset_from(day(2011, 1, 1), 10);
        let range = DateRange::new(day(2011, 1, 3), day(2011, 1, 6)).unwrap();
        let dates: Vec<NaiveDate> = filter_by_range(&ds, &range).iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![day(2011, 1, 3), day(2011, 1, 4), day(2011, 1, 5), day(2011, 1, 6)]
        );
    }

    #[test]
    fn out_of_span_range_yields_empty_view() {
        let ds = dataset_from(day(2011, 1, 1), 10);
        let range = DateRange::new(day(2015, 1, 1), day(2015, 12, 31)).unwrap();
        assert!(filter_by_range(&ds, &range).is_empty());
    }

    proptest! {
        #[test]
        fn filter_keeps_exactly_the_days_in_range(a in 0u32..60, b in 0u32..60) {
            let first = day(2011, 12, 1);
            let ds = dataset_from(first, 45);
            let (lo, hi) = (a.min(b), a.max(b));
            let start = first + chrono::Duration::days(lo as i64);
            let end = first + chrono::Duration::days(hi as i64);
            let range = DateRange::new(start, end).unwrap();

            let out = filter_by_range(&ds, &range);
            let expected: Vec<&Record> = ds
                .records
                .iter()
                .filter(|r| start <= r.date && r.date <= end)
                .collect();
            prop_assert_eq!(out, expected);
        }

        #[test]
        fn inverted_bounds_never_validate(a in 1u32..400) {
            let end = day(2011, 1, 1);
            let start = end + chrono::Duration::days(a as i64);
            prop_assert!(DateRange::new(start, end).is_err());
        }
    }
}
