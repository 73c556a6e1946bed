//! Reduction of the raw 3-hourly forecast feed to one entry per day.

use chrono::{NaiveDate, Timelike};
use std::collections::{BTreeMap, btree_map::Entry};

use crate::model::ForecastEntry;

/// Reference time of day for the daily sample, as seconds from midnight.
const NOON_SECONDS: u32 = 12 * 60 * 60;

/// Keep, per calendar day, the sample closest to noon; ties go to the
/// earlier-seen sample. Output is ordered by ascending date regardless of
/// input order. Days without any sample are simply absent; nothing is ever
/// synthesized.
pub fn reduce_to_daily(entries: &[ForecastEntry]) -> Vec<ForecastEntry> {
    let mut by_day: BTreeMap<NaiveDate, &ForecastEntry> = BTreeMap::new();

    for entry in entries {
        match by_day.entry(entry.at.date()) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
            Entry::Occupied(mut slot) => {
                if noon_distance(entry) < noon_distance(slot.get()) {
                    slot.insert(entry);
                }
            }
        }
    }

    by_day.into_values().cloned().collect()
}

fn noon_distance(entry: &ForecastEntry) -> u32 {
    entry.at.time().num_seconds_from_midnight().abs_diff(NOON_SECONDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDateTime};

    fn sample(at: &str, temperature_c: f64) -> ForecastEntry {
        ForecastEntry {
            at: NaiveDateTime::parse_from_str(at, "%Y-%m-%d %H:%M:%S").expect("test timestamp"),
            temperature_c,
            description: "clear sky".to_string(),
        }
    }

    /// Full 3-hourly feed: eight samples per day over five days.
    fn canonical_feed() -> Vec<ForecastEntry> {
        let mut feed = Vec::new();
        for day in 1..=5 {
            for hour in (0..24).step_by(3) {
                let at = format!("2026-08-{day:02} {hour:02}:00:00");
                feed.push(sample(&at, f64::from(day * 10 + hour)));
            }
        }
        feed
    }

    #[test]
    fn canonical_feed_yields_the_noon_sample_per_day() {
        let daily = reduce_to_daily(&canonical_feed());

        assert_eq!(daily.len(), 5);
        for (i, entry) in daily.iter().enumerate() {
            assert_eq!(entry.at.time().hour(), 12);
            assert_eq!(entry.at.date().day() as usize, i + 1);
        }
    }

    #[test]
    fn empty_feed_yields_empty_output() {
        assert!(reduce_to_daily(&[]).is_empty());
    }

    #[test]
    fn shifted_feed_falls_back_to_nearest_sample() {
        // No 12:00 sample at all; 11:00 is closer to noon than 14:00.
        let feed = vec![
            sample("2026-08-01 11:00:00", 20.0),
            sample("2026-08-01 14:00:00", 23.0),
            sample("2026-08-02 11:00:00", 21.0),
            sample("2026-08-02 14:00:00", 24.0),
        ];

        let daily = reduce_to_daily(&feed);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].temperature_c, 20.0);
        assert_eq!(daily[1].temperature_c, 21.0);
    }

    #[test]
    fn output_is_ascending_by_date_even_for_unordered_input() {
        let feed = vec![
            sample("2026-08-03 12:00:00", 3.0),
            sample("2026-08-01 12:00:00", 1.0),
            sample("2026-08-02 12:00:00", 2.0),
        ];

        let daily = reduce_to_daily(&feed);
        let temps: Vec<f64> = daily.iter().map(|e| e.temperature_c).collect();
        assert_eq!(temps, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn days_without_samples_are_absent() {
        // Short-horizon feed near the request boundary: only two days present.
        let feed = vec![
            sample("2026-08-01 18:00:00", 17.0),
            sample("2026-08-01 21:00:00", 15.0),
            sample("2026-08-04 09:00:00", 19.0),
        ];

        let daily = reduce_to_daily(&feed);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].temperature_c, 17.0);
        assert_eq!(daily[1].temperature_c, 19.0);
    }

    #[test]
    fn equidistant_samples_resolve_to_the_earlier_seen() {
        let feed = vec![
            sample("2026-08-01 09:00:00", 10.0),
            sample("2026-08-01 15:00:00", 16.0),
        ];

        let daily = reduce_to_daily(&feed);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].temperature_c, 10.0);
    }
}
