//! Timestamps used to name workflow executions.
//!
//! Names must not collide even when two invocations run within the same
//! microsecond, so every issued instant is strictly greater than the previous
//! one handed out by this process.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

static LAST_ISSUED_MICROS: AtomicI64 = AtomicI64::new(i64::MIN);

/// Current UTC time, bumped forward when needed so it never repeats within the process.
pub fn next_unique_timestamp() -> DateTime<Utc> {
    unique_after(Utc::now())
}

fn unique_after(now: DateTime<Utc>) -> DateTime<Utc> {
    let candidate = now.timestamp_micros();
    let mut previous = LAST_ISSUED_MICROS.load(Ordering::Acquire);
    loop {
        let next = candidate.max(previous.saturating_add(1));
        match LAST_ISSUED_MICROS.compare_exchange_weak(previous, next, Ordering::AcqRel, Ordering::Acquire) {
            Ok(_) => return DateTime::from_timestamp_micros(next).unwrap_or(now),
            Err(actual) => previous = actual,
        }
    }
}

/// `20250814_212901_443120` style stamp used in instantiation names.
pub fn instantiation_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d_%H%M%S_%6f").to_string()
}

/// `20250815T150238531200` style stamp used in generated environment names.
///
/// All six fractional digits are kept so names stay distinct at the clock's 1 µs step.
pub fn environment_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%S%6f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn same_instant_is_bumped_forward() {
        let instant = Utc.with_ymd_and_hms(2021, 1, 2, 3, 4, 5).unwrap();
        let first = unique_after(instant);
        let second = unique_after(instant);
        assert!(second > first);
    }

    #[test]
    fn rapid_calls_never_repeat() {
        let stamps: Vec<String> = (0..50).map(|_| instantiation_timestamp(next_unique_timestamp())).collect();
        let mut deduped = stamps.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), stamps.len());
    }

    #[test]
    fn formats_match_platform_naming() {
        let instant = Utc.with_ymd_and_hms(2025, 8, 14, 21, 29, 1).unwrap() + chrono::Duration::microseconds(443_120);
        assert_eq!(instantiation_timestamp(instant), "20250814_212901_443120");
        assert_eq!(environment_timestamp(instant), "20250814T212901443120");
    }
}
