//! Checked fixed-point and calendar helpers.
//!
//! Helpers that can overflow return `None` so callers can map the failure
//! onto their own error type.

pub const SECONDS_IN_DAY: u64 = 86_400;

/// `floor(a * b / d)`.
pub fn mul_div_floor(a: u128, b: u128, d: u128) -> Option<u128> {
    if d == 0 {
        return None;
    }
    a.checked_mul(b).map(|p| p / d)
}

/// Day-aligns `ts` (unix seconds) to the start of its UTC day.
pub fn start_of_day(ts: u64) -> u64 {
    ts - ts % SECONDS_IN_DAY
}
