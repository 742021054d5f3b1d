//! Observation domain helpers and the canonical seed data set

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

/// One entry of the fixed seed set used to populate an empty store
#[derive(Debug, Clone)]
pub struct SeedObservation {
    pub region: &'static str,
    pub temperature: Decimal,
    pub precipitation: Decimal,
    pub date: NaiveDate,
}

/// The fixed seed set: five named regions with preset values.
///
/// Inserted at startup when the store is empty, and by the reseed
/// endpoint after wiping the store.
pub fn seed_observations() -> Vec<SeedObservation> {
    vec![
        SeedObservation {
            region: "Москва",
            temperature: Decimal::new(-52, 1),
            precipitation: Decimal::new(125, 1),
            date: ymd(2024, 1, 15),
        },
        SeedObservation {
            region: "Санкт-Петербург",
            temperature: Decimal::new(87, 1),
            precipitation: Decimal::new(32, 1),
            date: ymd(2024, 1, 15),
        },
        SeedObservation {
            region: "Новосибирск",
            temperature: Decimal::new(-158, 1),
            precipitation: Decimal::new(81, 1),
            date: ymd(2024, 1, 14),
        },
        SeedObservation {
            region: "Сочи",
            temperature: Decimal::new(223, 1),
            precipitation: Decimal::new(5, 1),
            date: ymd(2024, 1, 16),
        },
        SeedObservation {
            region: "Якутск",
            temperature: Decimal::new(-284, 1),
            precipitation: Decimal::new(152, 1),
            date: ymd(2024, 1, 16),
        },
    ]
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

/// Convert a calendar date to the instant it was measured: midnight UTC
pub fn measurement_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// The half-open UTC window covering one calendar day.
///
/// Inclusive of the day's midnight, exclusive of the next day's midnight.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = measurement_instant(date);
    (start, start + Duration::days(1))
}
