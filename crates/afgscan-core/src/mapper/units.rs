//! Exact decimal formatting of raw token and wei amounts.

use alloy_primitives::U256;
use chrono::{DateTime, SecondsFormat};

/// Formats `raw / 10^decimals` exactly, trimming trailing fractional zeros.
///
/// ```
/// use afgscan_core::mapper::units::format_units;
/// use alloy_primitives::U256;
///
/// assert_eq!(format_units(U256::from(1_500_000_000_000_000_000u64), 18), "1.5");
/// assert_eq!(format_units(U256::from(42u64), 0), "42");
/// ```
#[must_use]
pub fn format_units(raw: U256, decimals: u8) -> String {
    if decimals == 0 {
        return raw.to_string();
    }

    // 10^78 no longer fits in 256 bits; every representable value is then a pure fraction
    let (whole, remainder) = U256::from(10u8)
        .checked_pow(U256::from(decimals))
        .map_or((U256::ZERO, raw), |divisor| raw.div_rem(divisor));

    if remainder.is_zero() {
        return whole.to_string();
    }

    let fraction = format!("{:0>width$}", remainder.to_string(), width = usize::from(decimals));
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}

/// Parses a decimal string back into a raw amount with `decimals` places.
///
/// Returns `None` for malformed input or more fractional digits than `decimals`.
#[must_use]
pub fn parse_units(value: &str, decimals: u8) -> Option<U256> {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    let decimals = usize::from(decimals);

    if whole.is_empty() ||
        fraction.len() > decimals ||
        !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let digits = format!("{whole}{fraction:0<decimals$}");
    U256::from_str_radix(&digits, 10).ok()
}

/// Unix seconds as an ISO-8601 UTC timestamp with millisecond precision.
///
/// ```
/// use afgscan_core::mapper::units::iso_timestamp;
///
/// assert_eq!(iso_timestamp(1_600_000_000).as_deref(), Some("2020-09-13T12:26:40.000Z"));
/// ```
#[must_use]
pub fn iso_timestamp(secs: u64) -> Option<String> {
    let secs = i64::try_from(secs).ok()?;
    DateTime::from_timestamp(secs, 0).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
