mod gaps_tests;
mod histogram_tests;
mod report_tests;

use crate::pipeline::Timestamp;
use chrono::{Duration, TimeZone, Utc};

pub(crate) fn at_ms(offset_ms: i64) -> Timestamp {
    Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap() + Duration::milliseconds(offset_ms)
}

pub(crate) fn at_secs(offset: f64) -> Timestamp {
    at_ms((offset * 1000.0).round() as i64)
}
